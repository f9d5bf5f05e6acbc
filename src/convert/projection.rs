use crate::convert::error::ConvertError;
use std::f64::consts::PI;

/// Default equatorward edge of the polar plot, in degrees of magnetic latitude
pub const DEFAULT_MIN_LAT: f64 = 50.0;

/// Maps a magnetic latitude and local time onto the polar plot.
///
/// The radius is 0 at the pole and 1 at `min_lat`; points equatorward of `min_lat` land outside the
/// unit circle. 06 MLT is on the positive x axis and local noon on the positive y axis.
pub fn polar_projection(mlat: f64, mlt: f64, min_lat: f64) -> (f64, f64) {
    let radius = (90.0 - mlat.abs()) / (90.0 - min_lat);
    let angle = (mlt - 6.0) / 12.0 * PI;
    (radius * angle.cos(), radius * angle.sin())
}

/// [`polar_projection`] over parallel arrays, returning the x and y arrays.
pub fn polar_projection_array(
    mlat: &[f64],
    mlt: &[f64],
    min_lat: f64,
) -> Result<(Vec<f64>, Vec<f64>), ConvertError> {
    if mlt.len() != mlat.len() {
        Err(ConvertError::LengthMismatch {
            name: "mlt",
            found: mlt.len(),
            expected: mlat.len(),
        })?
    }
    Ok(mlat
        .iter()
        .zip(mlt)
        .map(|(&lat, &lt)| polar_projection(lat, lt, min_lat))
        .unzip())
}

/// Re-expresses an azimuth given in the local magnetic frame at plot position `(x, y)` as an angle
/// relative to the direction of the plot origin. The result is in degrees, within [0, 360).
pub fn reproject_angle_to_origin(x: f64, y: f64, angle: f64) -> f64 {
    let angle_from_origin = y.atan2(x).to_degrees();
    let step = 180.0 - (180.0 - angle) - angle_from_origin;
    let reprojected = (180.0 - step).rem_euclid(360.0);
    // rem_euclid can round up to the modulus itself for tiny negative inputs
    if reprojected >= 360.0 {
        0.0
    } else {
        reprojected
    }
}
