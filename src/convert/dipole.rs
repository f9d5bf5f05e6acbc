//! A centred tilted dipole stand-in for a full geomagnetic coordinate model.
//!
//! Magnetic coordinates are obtained by rotating the geographic frame so that its Z axis lies
//! along the dipole axis. The magnetic Y axis is perpendicular to both the dipole axis and the
//! geographic south pole, and X completes the right-handed set. Magnetic local time is measured
//! from the magnetic meridian of the subsolar point, which sits at 12 MLT.

use crate::convert::error::ConvertError;
use crate::convert::oracle::{CoordinateOracle, Direction};
use crate::convert::time::ut_hours;
use crate::utils::constants::HOURS_PER_DAY;
use crate::utils::geometry::wrap_longitude;
use crate::utils::location::Location;
use chrono::{DateTime, Datelike, Utc};
use nalgebra::{Rotation3, Vector3};
use rayon::prelude::*;
use std::f64::consts::PI;

type Result<T> = std::result::Result<T, ConvertError>;

/// Geographic location of the northern dipole pole (IGRF epoch 2015).
pub const DEFAULT_DIPOLE_POLE: (f64, f64) = (80.37, -72.62);

const OBLIQUITY_DEG: f64 = 23.44;

#[derive(Debug, Clone)]
pub struct DipoleOracle {
    pole: Location,
    /// Takes magnetic cartesian vectors to geographic ones
    mag_to_geo: Rotation3<f64>,
}

impl DipoleOracle {
    pub fn new(pole: Location) -> DipoleOracle {
        let z = unit_vector(pole.lat(), pole.lon());
        let y = Vector3::z()
            .cross(&z)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::y);
        let x = y.cross(&z);

        DipoleOracle {
            pole,
            mag_to_geo: Rotation3::from_basis_unchecked(&[x, y, z]),
        }
    }

    pub fn pole(&self) -> Location {
        self.pole
    }

    fn to_magnetic(&self, lat: f64, lon: f64) -> (f64, f64) {
        lat_lon(&(self.mag_to_geo.inverse() * unit_vector(lat, lon)))
    }

    fn to_geographic(&self, mlat: f64, mlon: f64) -> (f64, f64) {
        lat_lon(&(self.mag_to_geo * unit_vector(mlat, mlon)))
    }

    fn subsolar_mlon(&self, time: &DateTime<Utc>) -> f64 {
        let (lat, lon) = subsolar_point(time);
        self.to_magnetic(lat, lon).1
    }
}

impl Default for DipoleOracle {
    fn default() -> Self {
        let (lat, lon) = DEFAULT_DIPOLE_POLE;
        DipoleOracle::new(Location::new(lat, lon).unwrap_or(Location::NORTH_POLE))
    }
}

fn unit_vector(lat: f64, lon: f64) -> Vector3<f64> {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

fn lat_lon(v: &Vector3<f64>) -> (f64, f64) {
    (
        v[2].atan2(v[0].hypot(v[1])).to_degrees(),
        v[1].atan2(v[0]).to_degrees(),
    )
}

/// Approximate geographic location of the subsolar point, using a cosine model of the solar
/// declination and the usual three-term equation of time.
pub fn subsolar_point(time: &DateTime<Utc>) -> (f64, f64) {
    let day = time.ordinal() as f64;
    let declination = -OBLIQUITY_DEG * (2.0 * PI / 365.0 * (day + 10.0)).cos();

    let b = 2.0 * PI * (day - 81.0) / 364.0;
    let equation_of_time_min = 9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin();
    let lon = -15.0 * (ut_hours(time) - 12.0 + equation_of_time_min / 60.0);

    (declination, wrap_longitude(lon))
}

fn mlt_from_subsolar(mlon: f64, subsolar_mlon: f64) -> f64 {
    let mlt = (12.0 + (mlon - subsolar_mlon) / 15.0).rem_euclid(HOURS_PER_DAY);
    if mlt >= HOURS_PER_DAY {
        0.0
    } else {
        mlt
    }
}

impl CoordinateOracle for DipoleOracle {
    fn convert(
        &self,
        lat: f64,
        lon: f64,
        _altitude_km: f64,
        _time: &DateTime<Utc>,
        direction: Direction,
    ) -> Result<(f64, f64)> {
        Ok(match direction {
            Direction::GeographicToMagnetic => self.to_magnetic(lat, lon),
            Direction::MagneticToGeographic => self.to_geographic(lat, lon),
        })
    }

    fn magnetic_local_time(&self, mlon: f64, time: &DateTime<Utc>) -> Result<f64> {
        Ok(mlt_from_subsolar(mlon, self.subsolar_mlon(time)))
    }

    fn convert_array(
        &self,
        lat: &[f64],
        lon: &[f64],
        _altitude_km: f64,
        _time: &DateTime<Utc>,
        direction: Direction,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        Ok(lat
            .par_iter()
            .zip(lon.par_iter())
            .map(|(&la, &lo)| match direction {
                Direction::GeographicToMagnetic => self.to_magnetic(la, lo),
                Direction::MagneticToGeographic => self.to_geographic(la, lo),
            })
            .unzip())
    }

    fn magnetic_local_time_array(&self, mlon: &[f64], time: &DateTime<Utc>) -> Result<Vec<f64>> {
        let subsolar = self.subsolar_mlon(time);
        Ok(mlon.iter().map(|&m| mlt_from_subsolar(m, subsolar)).collect())
    }
}
