use crate::convert::error::ConvertError;
use crate::convert::oracle::CoordinateOracle;
use crate::convert::time::ut_hours;
use crate::utils::constants::{HOURS_PER_DAY, MLT_EPOCH_HOURS};
use chrono::{DateTime, Utc};
use std::fmt;

/// Closed-form magnetic local time, consistent with the 4.73 h epoch of the map-potential model:
/// `(mlon / 15 + (ut - 4.73) + 48) mod 24`.
pub fn approximate_mlt(mlon: f64, ut_hours: f64) -> f64 {
    let mlt = (mlon / 15.0 + (ut_hours - MLT_EPOCH_HOURS) + 2.0 * HOURS_PER_DAY) % HOURS_PER_DAY;
    mlt.rem_euclid(HOURS_PER_DAY)
}

/// How magnetic local time is derived from magnetic longitude.
///
/// The two give measurably different results, so callers choose explicitly.
#[derive(Clone, Copy)]
pub enum MltStrategy<'a> {
    /// Ask the coordinate oracle
    Oracle(&'a dyn CoordinateOracle),
    /// Use [`approximate_mlt`]
    Approximate,
}

impl MltStrategy<'_> {
    pub fn magnetic_local_time(&self, mlon: f64, time: &DateTime<Utc>) -> Result<f64, ConvertError> {
        match self {
            MltStrategy::Oracle(oracle) => oracle.magnetic_local_time(mlon, time),
            MltStrategy::Approximate => Ok(approximate_mlt(mlon, ut_hours(time))),
        }
    }

    pub fn magnetic_local_times(
        &self,
        mlon: &[f64],
        time: &DateTime<Utc>,
    ) -> Result<Vec<f64>, ConvertError> {
        match self {
            MltStrategy::Oracle(oracle) => {
                let mlts = oracle.magnetic_local_time_array(mlon, time)?;
                if mlts.len() != mlon.len() {
                    Err(ConvertError::Oracle(format!(
                        "returned {} magnetic local times for {} longitudes",
                        mlts.len(),
                        mlon.len()
                    )))?
                }
                Ok(mlts)
            }
            MltStrategy::Approximate => {
                let ut = ut_hours(time);
                Ok(mlon.iter().map(|&m| approximate_mlt(m, ut)).collect())
            }
        }
    }
}

impl fmt::Debug for MltStrategy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MltStrategy::Oracle(_) => write!(f, "Oracle"),
            MltStrategy::Approximate => write!(f, "Approximate"),
        }
    }
}
