use crate::utils::constants::RADIUS_EARTH_KM;
use crate::utils::location::{Location, LocationError};
use itertools::Itertools;
use nalgebra::Vector3;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Anything other than a latitude or longitude axis
    #[error("axis only accepts 'longitude' or 'latitude', got '{0}'")]
    InvalidAxis(String),

    /// Parallel coordinate arrays of different lengths
    #[error("{name} has {found} elements but {expected} were expected")]
    LengthMismatch {
        name: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("{0}")]
    Location(#[from] LocationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl FromStr for Axis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "latitude" => Ok(Axis::Latitude),
            "longitude" => Ok(Axis::Longitude),
            _ => Err(GeometryError::InvalidAxis(s.to_string())),
        }
    }
}

/// Calculates the opposite latitude or longitude.
///
/// For longitude the result is 180 degrees around the circle, with the sign chosen so the
/// magnitude stays within 180. For latitude the sign is flipped.
pub fn antipode(value: f64, axis: Axis) -> f64 {
    match axis {
        Axis::Latitude => -value,
        Axis::Longitude => {
            let opposite = 180.0 - value.abs();
            if value > 0.0 {
                -opposite
            } else {
                opposite
            }
        }
    }
}

/// Brings a longitude back into [-180, 180]. Values already in range are returned untouched.
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Haversine distance in km between two points given in degrees, assuming a spherical Earth.
pub fn great_circle_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    RADIUS_EARTH_KM * central_angle(lon1, lat1, lon2, lat2)
}

/// Angle in radians subtended at the centre of the sphere by two points.
fn central_angle(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt())
}

fn unit_vector(loc: &Location) -> Vector3<f64> {
    let (lat, lon) = (loc.lat().to_radians(), loc.lon().to_radians());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

fn location_from_vector(v: &Vector3<f64>) -> std::result::Result<Location, LocationError> {
    let lat = v[2].atan2(v[0].hypot(v[1])).to_degrees();
    let lon = v[1].atan2(v[0]).to_degrees();
    Location::new(lat.clamp(-90.0, 90.0), lon.clamp(-180.0, 180.0))
}

/// Finds a point on the great circle between `start` and `end`.
///
/// The point is not the arc-length midpoint: the fraction along the arc is proportional to how far
/// each end is from the antimeridian, `(180 - |lon_a|) / ((180 - |lon_a|) + (180 - |lon_b|))`, so
/// the returned point sits close to where the arc crosses 180 degrees.
pub fn intermediate_point(start: &Location, end: &Location) -> Result<Location> {
    let from_dateline_start = 180.0 - start.lon().abs();
    let from_dateline_end = 180.0 - end.lon().abs();
    let total = from_dateline_start + from_dateline_end;
    let fraction = if total == 0.0 {
        0.5
    } else {
        from_dateline_start / total
    };

    let delta = central_angle(start.lon(), start.lat(), end.lon(), end.lat());
    // Coincident or antipodal ends have no unique great circle
    if delta.sin().abs() < f64::EPSILON {
        return Ok(*start);
    }

    let weight_start = ((1.0 - fraction) * delta).sin() / delta.sin();
    let weight_end = (fraction * delta).sin() / delta.sin();
    let v = unit_vector(start) * weight_start + unit_vector(end) * weight_end;

    Ok(location_from_vector(&v)?)
}

/// Outcome of [`normalize_dateline_crossing`].
#[derive(Debug, Clone, PartialEq)]
pub enum DatelineCrossing {
    /// No consecutive points are more than 180 degrees apart in longitude
    NoCrossing(Vec<Location>),
    /// The sequence was rotated (and optionally closed) so the crossing sits at its ends
    Resolved(Vec<Location>),
    /// The crossing could not be moved to the ends of the sequence; points are as given
    Unresolved(Vec<Location>),
}

impl DatelineCrossing {
    pub fn points(&self) -> &[Location] {
        match self {
            DatelineCrossing::NoCrossing(p)
            | DatelineCrossing::Resolved(p)
            | DatelineCrossing::Unresolved(p) => p,
        }
    }

    pub fn into_points(self) -> Vec<Location> {
        match self {
            DatelineCrossing::NoCrossing(p)
            | DatelineCrossing::Resolved(p)
            | DatelineCrossing::Unresolved(p) => p,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, DatelineCrossing::Resolved(_))
    }
}

/// Indices of the points which follow a jump of more than 180 degrees in longitude.
fn dateline_crossings(points: &[Location]) -> Vec<usize> {
    points
        .iter()
        .tuple_windows()
        .positions(|(a, b)| (b.lon() - a.lon()).abs() > 180.0)
        .map(|i| i + 1)
        .collect()
}

/// Rearranges a roughly circular path so that its single dateline crossing falls between the last
/// and first points.
///
/// With `close`, two extra points are added on the antimeridian at the latitude where the great
/// circle between the (rotated) first and last points crosses it, so a polyline drawn from the
/// result ends cleanly at +/-180 on both sides. Paths with several crossings, or whose rotation
/// leaves a crossing behind, come back unchanged as [`DatelineCrossing::Unresolved`].
pub fn normalize_dateline_crossing(points: &[Location], close: bool) -> Result<DatelineCrossing> {
    let crossings = dateline_crossings(points);

    let crossing = match crossings.as_slice() {
        [] => return Ok(DatelineCrossing::NoCrossing(points.to_vec())),
        [i] => *i,
        _ => {
            debug!(
                count = crossings.len(),
                "multiple dateline crossings, leaving path unchanged"
            );
            return Ok(DatelineCrossing::Unresolved(points.to_vec()));
        }
    };

    let mut rotated = points.to_vec();
    rotated.rotate_right(points.len() - crossing);

    if !dateline_crossings(&rotated).is_empty() {
        debug!(crossing, "dateline crossing remains after rotation, leaving path unchanged");
        return Ok(DatelineCrossing::Unresolved(points.to_vec()));
    }

    if close {
        // rotated has at least two points since there was a crossing between two of them
        let first = rotated[0];
        let last = rotated[rotated.len() - 1];
        let midpoint = intermediate_point(&first, &last)?;
        let dateline = if first.lon() >= 0.0 { 180.0 } else { -180.0 };

        rotated.insert(0, Location::new(midpoint.lat(), dateline)?);
        rotated.push(Location::new(midpoint.lat(), -dateline)?);
    }

    Ok(DatelineCrossing::Resolved(rotated))
}
