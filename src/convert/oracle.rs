use crate::convert::error::ConvertError;
use chrono::{DateTime, Utc};

type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    GeographicToMagnetic,
    MagneticToGeographic,
}

/// A source of absolute geographic/magnetic coordinate mappings and magnetic local time.
///
/// Implementors only need the two single-point operations; the array forms default to calling
/// them point by point and can be overridden when the model has a cheaper batched path. Outputs
/// are trusted as-is, apart from checking that array forms return one value per input.
pub trait CoordinateOracle: Send + Sync {
    /// Converts a single point, returning `(lat, lon)` in degrees.
    fn convert(
        &self,
        lat: f64,
        lon: f64,
        altitude_km: f64,
        time: &DateTime<Utc>,
        direction: Direction,
    ) -> Result<(f64, f64)>;

    /// Magnetic local time in hours, [0, 24), of a magnetic longitude.
    fn magnetic_local_time(&self, mlon: f64, time: &DateTime<Utc>) -> Result<f64>;

    fn convert_array(
        &self,
        lat: &[f64],
        lon: &[f64],
        altitude_km: f64,
        time: &DateTime<Utc>,
        direction: Direction,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        let converted = lat
            .iter()
            .zip(lon)
            .map(|(&la, &lo)| self.convert(la, lo, altitude_km, time, direction))
            .collect::<Result<Vec<_>>>()?;
        Ok(converted.into_iter().unzip())
    }

    fn magnetic_local_time_array(&self, mlon: &[f64], time: &DateTime<Utc>) -> Result<Vec<f64>> {
        mlon.iter()
            .map(|&m| self.magnetic_local_time(m, time))
            .collect()
    }
}
