use crate::potential::config::ModelConfig;
use crate::potential::error::MapPotentialError;
use crate::potential::harmonics::real_harmonic;
use crate::utils::constants::{HOURS_PER_DAY, SECONDS_PER_HOUR};
use std::f64::consts::PI;

type Result<T> = std::result::Result<T, MapPotentialError>;

/// Meridional (northward) and zonal (eastward) components of a vector at a point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Components {
    pub meridional: f64,
    pub zonal: f64,
}

/// A fitted convection velocity in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FittedVector {
    pub azimuth: f64,   // degrees east of magnetic north, [0, 360)
    pub magnitude: f64, // m/s
}

/// Position of the cosine coefficient of degree `l` and order `m` in a coefficient vector. The
/// sine coefficient, when `m > 0`, immediately follows it.
pub fn coefficient_index(l: usize, m: usize) -> usize {
    if l == 0 {
        0
    } else if m == 0 {
        l * l
    } else {
        l * l + 2 * m - 1
    }
}

/// The map-potential model: a truncated real spherical harmonic expansion of the electrostatic
/// potential over the polar cap, and the fields derived from it.
///
/// Coefficient slices handed to the model must hold at least `config.num_coefficients()` values.
/// Per-point methods index them directly and panic on a shorter slice; the batched entry points
/// check the length up front and return an error instead.
#[derive(Debug, Clone, Default)]
pub struct PotentialModel {
    config: ModelConfig,
}

impl PotentialModel {
    pub fn new(config: ModelConfig) -> PotentialModel {
        PotentialModel { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn check_coefficients(&self, coeffs: &[f64]) -> Result<()> {
        let expected = self.config.num_coefficients();
        if coeffs.len() < expected {
            Err(MapPotentialError::Coefficients {
                found: coeffs.len(),
                expected,
            })?
        }
        Ok(())
    }

    /// Expands the series to give the electrostatic potential (V) at a magnetic latitude and
    /// local time.
    ///
    /// Colatitude is stretched so that `hmb_lat` maps to pi. Points equatorward of that edge are
    /// outside the model and get a potential of exactly 0.
    pub fn potential(&self, coeffs: &[f64], hmb_lat: f64, mag_lat: f64, mag_lt: f64) -> f64 {
        let phi = 2.0 * PI * mag_lt / HOURS_PER_DAY;
        let theta = PI * (90.0 - mag_lat) / (90.0 - hmb_lat.abs());
        if theta > PI {
            return 0.0;
        }

        let mut potential = 0.0;
        for l in 0..=self.config.order {
            for m in 0..=l {
                let k = coefficient_index(l, m);
                let (re, im) = real_harmonic(l as u32, m as i32, theta, phi);
                potential += coeffs[k] * re;
                // sin(0 * phi) is zero, and for l = 0 there is no slot after k
                if m > 0 {
                    potential += coeffs[k + 1] * im;
                }
            }
        }
        potential
    }

    /// Rotates the expansion about the polar axis by `d_phi` radians, returning new coefficients.
    pub fn rotate(&self, coeffs: &[f64], d_phi: f64) -> Vec<f64> {
        let mut rotated = coeffs.to_vec();
        for m in 1..=self.config.order {
            let (sin, cos) = (m as f64 * d_phi).sin_cos();
            for l in m..=self.config.order {
                let k = coefficient_index(l, m);
                rotated[k] = coeffs[k] * cos - coeffs[k + 1] * sin;
                rotated[k + 1] = coeffs[k + 1] * cos + coeffs[k] * sin;
            }
        }
        rotated
    }

    /// Rotates coefficients from a magnetic longitude grid onto a magnetic local time grid for a
    /// time given in seconds since midnight UT.
    pub fn rotate_to_mlt(&self, coeffs: &[f64], ut_seconds: f64) -> Vec<f64> {
        let ut_hours = ut_seconds / SECONDS_PER_HOUR;
        let d_phi = 2.0 * PI * (ut_hours - self.config.mlt_epoch) / HOURS_PER_DAY;
        self.rotate(coeffs, d_phi)
    }

    /// Meridional and zonal electric field (V/m), from forward differences of the potential one
    /// step poleward and one step later in local time.
    pub fn electric_field(
        &self,
        coeffs: &[f64],
        hmb_lat: f64,
        mag_lat: f64,
        mag_lt: f64,
    ) -> Components {
        let ModelConfig {
            delta_lat,
            delta_lt,
            radius_earth,
            ..
        } = self.config;

        let pot0 = self.potential(coeffs, hmb_lat, mag_lat, mag_lt);
        let pot1 = self.potential(coeffs, hmb_lat, mag_lat + delta_lat, mag_lt);
        let pot2 = self.potential(coeffs, hmb_lat, mag_lat, mag_lt + delta_lt);

        let colatitude = (90.0 - mag_lat).to_radians();
        Components {
            meridional: (pot1 - pot0) / (2.0 * PI * radius_earth * (delta_lat / 360.0)),
            zonal: (pot2 - pot0)
                / (2.0 * PI * radius_earth * colatitude.sin() * (delta_lt / HOURS_PER_DAY)),
        }
    }

    /// Magnitude of the dipole field (T) at the model altitude.
    pub fn field_strength(&self, mag_lat: f64) -> f64 {
        let ModelConfig {
            radius_earth,
            altitude,
            b_equatorial,
            ..
        } = self.config;
        let colatitude = (90.0 - mag_lat).to_radians();
        b_equatorial
            * (1.0 + 3.0 * colatitude.cos().powi(2)).sqrt()
            * (radius_earth / (radius_earth + altitude)).powi(3)
    }

    /// Meridional and zonal E x B plasma drift velocity (m/s).
    pub fn drift_velocity(
        &self,
        coeffs: &[f64],
        hmb_lat: f64,
        mag_lat: f64,
        mag_lt: f64,
    ) -> Components {
        let e_field = self.electric_field(coeffs, hmb_lat, mag_lat, mag_lt);
        let b = self.field_strength(mag_lat);
        Components {
            meridional: -e_field.zonal / b,
            zonal: e_field.meridional / b,
        }
    }

    /// Fitted velocity azimuth and magnitude, for coefficients already rotated to local time.
    pub fn fitted_vector(
        &self,
        coeffs: &[f64],
        hmb_lat: f64,
        mag_lat: f64,
        mag_lt: f64,
    ) -> FittedVector {
        let v = self.drift_velocity(coeffs, hmb_lat, mag_lat, mag_lt);
        let azimuth = v.zonal.atan2(v.meridional).to_degrees().rem_euclid(360.0);
        FittedVector {
            azimuth: if azimuth >= 360.0 { 0.0 } else { azimuth },
            magnitude: v.zonal.hypot(v.meridional),
        }
    }
}
