use crate::convert::error::ConvertError;
use crate::convert::oracle::{CoordinateOracle, Direction};
use crate::convert::time::TimeInput;
use crate::utils::geometry::wrap_longitude;
use crate::utils::location::Location;
use ndarray::{Array1, ArrayBase, Data, Dimension};
use tracing::trace;

type Result<T> = std::result::Result<T, ConvertError>;

/// Converts between geographic and magnetic coordinates through a [`CoordinateOracle`], at a
/// fixed altitude.
#[derive(Debug, Clone)]
pub struct MagneticConverter<O> {
    oracle: O,
    altitude_km: f64,
}

impl<O: CoordinateOracle> MagneticConverter<O> {
    /// A converter working at ground level
    pub fn new(oracle: O) -> Self {
        MagneticConverter {
            oracle,
            altitude_km: 0.0,
        }
    }

    pub fn with_altitude(self, altitude_km: f64) -> Self {
        MagneticConverter {
            altitude_km,
            ..self
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_km
    }

    fn convert_location(
        &self,
        loc: &Location,
        time: impl TimeInput,
        direction: Direction,
    ) -> Result<Location> {
        let time = time.resolve_utc()?;
        let (lat, lon) =
            self.oracle
                .convert(loc.lat(), loc.lon(), self.altitude_km, &time, direction)?;
        Ok(Location::new(lat, wrap_longitude(lon))?)
    }

    /// Converts a location given in magnetic coordinates into geographic coordinates.
    pub fn to_geographic(&self, loc: &Location, time: impl TimeInput) -> Result<Location> {
        self.convert_location(loc, time, Direction::MagneticToGeographic)
    }

    /// Converts a location given in geographic coordinates into magnetic coordinates.
    pub fn to_magnetic(&self, loc: &Location, time: impl TimeInput) -> Result<Location> {
        self.convert_location(loc, time, Direction::GeographicToMagnetic)
    }

    fn convert_array<S1, S2, D1, D2>(
        &self,
        lat: &ArrayBase<S1, D1>,
        lon: &ArrayBase<S2, D2>,
        time: impl TimeInput,
        direction: Direction,
    ) -> Result<(Array1<f64>, Array1<f64>)>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        check_flat("lat", lat.ndim())?;
        check_flat("lon", lon.ndim())?;
        if lon.len() != lat.len() {
            Err(ConvertError::LengthMismatch {
                name: "lon",
                found: lon.len(),
                expected: lat.len(),
            })?
        }
        let time = time.resolve_utc()?;

        let lat: Vec<f64> = lat.iter().copied().collect();
        let lon: Vec<f64> = lon.iter().copied().collect();
        trace!(points = lat.len(), ?direction, "converting coordinate arrays");
        let (new_lat, new_lon) =
            self.oracle
                .convert_array(&lat, &lon, self.altitude_km, &time, direction)?;

        if new_lat.len() != lat.len() || new_lon.len() != lat.len() {
            Err(ConvertError::Oracle(format!(
                "returned {}/{} coordinates for {} points",
                new_lat.len(),
                new_lon.len(),
                lat.len()
            )))?
        }
        Ok((Array1::from(new_lat), Array1::from(new_lon)))
    }

    /// Converts flat arrays of magnetic latitude and longitude into geographic coordinates.
    ///
    /// # Errors
    /// Will return `Err` if either array is not one-dimensional, if they differ in length, or if
    /// the time cannot be understood.
    pub fn to_geographic_array<S1, S2, D1, D2>(
        &self,
        lat: &ArrayBase<S1, D1>,
        lon: &ArrayBase<S2, D2>,
        time: impl TimeInput,
    ) -> Result<(Array1<f64>, Array1<f64>)>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        self.convert_array(lat, lon, time, Direction::MagneticToGeographic)
    }

    /// Converts flat arrays of geographic latitude and longitude into magnetic coordinates.
    ///
    /// # Errors
    /// Same conditions as [`MagneticConverter::to_geographic_array`].
    pub fn to_magnetic_array<S1, S2, D1, D2>(
        &self,
        lat: &ArrayBase<S1, D1>,
        lon: &ArrayBase<S2, D2>,
        time: impl TimeInput,
    ) -> Result<(Array1<f64>, Array1<f64>)>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D1: Dimension,
        D2: Dimension,
    {
        self.convert_array(lat, lon, time, Direction::GeographicToMagnetic)
    }

    pub fn magnetic_local_time(&self, mlon: f64, time: impl TimeInput) -> Result<f64> {
        self.oracle.magnetic_local_time(mlon, &time.resolve_utc()?)
    }

    pub fn magnetic_local_time_array(&self, mlon: &[f64], time: impl TimeInput) -> Result<Vec<f64>> {
        self.oracle
            .magnetic_local_time_array(mlon, &time.resolve_utc()?)
    }
}

fn check_flat(name: &'static str, ndim: usize) -> Result<()> {
    if ndim != 1 {
        Err(ConvertError::Shape { name, ndim })?
    }
    Ok(())
}
