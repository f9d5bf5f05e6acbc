use crate::convert::mlt::MltStrategy;
use crate::convert::time::{ut_seconds, TimeInput};
use crate::potential::error::MapPotentialError;
use crate::potential::model::{FittedVector, PotentialModel};
use rayon::prelude::*;
use tracing::debug;

type Result<T> = std::result::Result<T, MapPotentialError>;

/// Fitted vectors for a set of points, as parallel arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FittedVectors {
    pub azimuths: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl PotentialModel {
    /// Calculates fitted velocity vectors at magnetic latitude/longitude points.
    ///
    /// The coefficients are given on a magnetic longitude grid; they are rotated once to local
    /// time for `time`, and each longitude is converted to local time with `strategy`.
    ///
    /// # Errors
    /// Will return `Err` if the coefficient vector is too short, `mlat` and `mlon` differ in
    /// length, the time cannot be parsed, or the oracle fails.
    pub fn fitted_vectors(
        &self,
        coeffs: &[f64],
        mlat: &[f64],
        mlon: &[f64],
        time: impl TimeInput,
        min_lat: f64,
        strategy: MltStrategy,
    ) -> Result<FittedVectors> {
        self.check_coefficients(coeffs)?;
        if mlon.len() != mlat.len() {
            Err(MapPotentialError::LengthMismatch {
                name: "mlon",
                found: mlon.len(),
                expected: mlat.len(),
            })?
        }
        let time = time.resolve_utc()?;

        let rotated = self.rotate_to_mlt(coeffs, ut_seconds(&time));
        let mlts = strategy.magnetic_local_times(mlon, &time)?;
        debug!(points = mlat.len(), ?strategy, "calculating fitted vectors");

        let (azimuths, magnitudes) = mlat
            .par_iter()
            .zip(mlts.par_iter())
            .map(|(&lat, &lt)| {
                let v = self.fitted_vector(&rotated, min_lat, lat, lt);
                (v.azimuth, v.magnitude)
            })
            .unzip();

        Ok(FittedVectors {
            azimuths,
            magnitudes,
        })
    }

    /// Fitted velocity vector at a single magnetic latitude/longitude.
    pub fn fitted_vector_at(
        &self,
        coeffs: &[f64],
        hmb_lat: f64,
        mag_lat: f64,
        mag_lon: f64,
        time: impl TimeInput,
        strategy: MltStrategy,
    ) -> Result<FittedVector> {
        self.check_coefficients(coeffs)?;
        let time = time.resolve_utc()?;

        let mag_lt = strategy.magnetic_local_time(mag_lon, &time)?;
        let rotated = self.rotate_to_mlt(coeffs, ut_seconds(&time));
        Ok(self.fitted_vector(&rotated, hmb_lat, mag_lat, mag_lt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::dipole::DipoleOracle;
    use crate::convert::mlt::approximate_mlt;
    use crate::convert::time::parse_time;

    const TIME: &str = "2012-06-15 22:02";

    fn coefficients() -> Vec<f64> {
        (0..49).map(|k| ((k * 13 % 17) as f64 - 8.0) * 250.0).collect()
    }

    #[test]
    fn batch_matches_single_points() {
        let model = PotentialModel::default();
        let coeffs = coefficients();
        let mlat = [62.0, 70.0, 78.5, 85.0];
        let mlon = [-150.0, -20.0, 45.0, 170.0];

        let batch = model
            .fitted_vectors(&coeffs, &mlat, &mlon, TIME, 50.0, MltStrategy::Approximate)
            .unwrap();
        assert_eq!(batch.azimuths.len(), 4);

        for i in 0..mlat.len() {
            let single = model
                .fitted_vector_at(&coeffs, 50.0, mlat[i], mlon[i], TIME, MltStrategy::Approximate)
                .unwrap();
            assert_eq!(single.azimuth, batch.azimuths[i]);
            assert_eq!(single.magnitude, batch.magnitudes[i]);
        }
    }

    #[test]
    fn approximate_strategy_uses_closed_form() {
        let model = PotentialModel::default();
        let coeffs = coefficients();
        let time = parse_time(TIME).unwrap();
        let ut = ut_seconds(&time);

        let rotated = model.rotate_to_mlt(&coeffs, ut);
        let expected = model.fitted_vector(&rotated, 50.0, 72.0, approximate_mlt(33.0, ut / 3600.0));
        let batch = model
            .fitted_vectors(&coeffs, &[72.0], &[33.0], time, 50.0, MltStrategy::Approximate)
            .unwrap();
        assert_eq!(batch.azimuths[0], expected.azimuth);
        assert_eq!(batch.magnitudes[0], expected.magnitude);
    }

    #[test]
    fn strategies_differ() {
        let model = PotentialModel::default();
        let coeffs = coefficients();
        let oracle = DipoleOracle::default();
        let approx = model
            .fitted_vectors(&coeffs, &[70.0], &[10.0], TIME, 50.0, MltStrategy::Approximate)
            .unwrap();
        let dipole = model
            .fitted_vectors(&coeffs, &[70.0], &[10.0], TIME, 50.0, MltStrategy::Oracle(&oracle))
            .unwrap();
        assert_ne!(approx, dipole);
    }

    #[test]
    fn mismatched_points() {
        let model = PotentialModel::default();
        let err = model
            .fitted_vectors(&coefficients(), &[70.0, 71.0], &[10.0], TIME, 50.0, MltStrategy::Approximate)
            .unwrap_err();
        assert_eq!(
            err,
            MapPotentialError::LengthMismatch {
                name: "mlon",
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn short_coefficients() {
        let model = PotentialModel::default();
        let result = model.fitted_vectors(&[1.0; 10], &[70.0], &[10.0], TIME, 50.0, MltStrategy::Approximate);
        assert!(matches!(result, Err(MapPotentialError::Coefficients { .. })));
    }

    #[test]
    fn bad_time() {
        let model = PotentialModel::default();
        let result = model.fitted_vectors(&coefficients(), &[70.0], &[10.0], "noon", 50.0, MltStrategy::Approximate);
        assert!(matches!(result, Err(MapPotentialError::Convert(_))));
    }
}
