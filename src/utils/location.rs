use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Latitude must be within -90 to 90 degrees, got {0}")]
    Latitude(f64),

    #[error("Longitude must be within -180 to 180 degrees, got {0}")]
    Longitude(f64),
}

/// A validated latitude/longitude pair in degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]. The fields are private, so the
/// only way to change a `Location` is to build a new one through [`Location::with_lat`] or
/// [`Location::with_lon`], both of which re-validate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    lat: f64,
    lon: f64,
}

impl Location {
    pub const NORTH_POLE: Location = Location { lat: 90.0, lon: 0.0 };

    pub fn new(lat: f64, lon: f64) -> Result<Location, LocationError> {
        // Written so that NaN fails both checks
        if !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::Longitude(lon));
        }
        Ok(Location { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn with_lat(&self, lat: f64) -> Result<Location, LocationError> {
        Location::new(lat, self.lon)
    }

    pub fn with_lon(&self, lon: f64) -> Result<Location, LocationError> {
        Location::new(self.lat, lon)
    }
}

impl TryFrom<(f64, f64)> for Location {
    type Error = LocationError;

    fn try_from((lat, lon): (f64, f64)) -> Result<Self, Self::Error> {
        Location::new(lat, lon)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
