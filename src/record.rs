//! Extraction of the fields this crate needs from a decoded convection map record.
use crate::convert::mlt::MltStrategy;
use crate::convert::time::TimeInput;
use crate::potential::error::MapPotentialError;
use crate::potential::fitted::FittedVectors;
use crate::potential::model::PotentialModel;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Field {0} missing from record")]
    MissingField(String),

    #[error("Field {name} should be a {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
    },

    #[error("Field {name} has {found} elements but {expected} were expected")]
    LengthMismatch {
        name: String,
        found: usize,
        expected: usize,
    },
}

/// A single field of a decoded record
#[derive(Debug, Clone, PartialEq)]
pub enum MapField {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl From<f64> for MapField {
    fn from(value: f64) -> Self {
        MapField::Scalar(value)
    }
}

impl From<Vec<f64>> for MapField {
    fn from(value: Vec<f64>) -> Self {
        MapField::Vector(value)
    }
}

/// The parts of a convection map record used for plotting: the model boundary, the gridded
/// line-of-sight vectors and, when the record was fitted, the map-potential coefficients.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvectionMap {
    pub boundary_mlat: Vec<f64>,    // boundary.mlat in RST
    pub boundary_mlon: Vec<f64>,    // boundary.mlon in RST
    pub vector_mlat: Vec<f64>,      // vector.mlat in RST
    pub vector_mlon: Vec<f64>,      // vector.mlon in RST
    pub velocity_median: Vec<f64>,  // vector.vel.median in RST, m/s
    pub kvect: Vec<f64>,            // vector.kvect in RST, degrees
    pub coefficients: Option<Vec<f64>>, // N+2 in RST
    pub hmb_lat: Option<f64>,       // latmin in RST
}

fn vector_field(rec: &IndexMap<String, MapField>, name: &str) -> Result<Vec<f64>, RecordError> {
    match rec.get(name) {
        Some(MapField::Vector(v)) => Ok(v.clone()),
        Some(MapField::Scalar(_)) => Err(RecordError::WrongType {
            name: name.to_string(),
            expected: "vector",
        }),
        None => Err(RecordError::MissingField(name.to_string())),
    }
}

fn optional_vector_field(
    rec: &IndexMap<String, MapField>,
    name: &str,
) -> Result<Option<Vec<f64>>, RecordError> {
    match rec.get(name) {
        None => Ok(None),
        Some(_) => vector_field(rec, name).map(Some),
    }
}

fn optional_scalar_field(
    rec: &IndexMap<String, MapField>,
    name: &str,
) -> Result<Option<f64>, RecordError> {
    match rec.get(name) {
        Some(MapField::Scalar(x)) => Ok(Some(*x)),
        Some(MapField::Vector(_)) => Err(RecordError::WrongType {
            name: name.to_string(),
            expected: "scalar",
        }),
        None => Ok(None),
    }
}

fn check_length(name: &str, found: usize, expected: usize) -> Result<(), RecordError> {
    if found != expected {
        Err(RecordError::LengthMismatch {
            name: name.to_string(),
            found,
            expected,
        })?
    }
    Ok(())
}

impl TryFrom<&IndexMap<String, MapField>> for ConvectionMap {
    type Error = RecordError;

    fn try_from(rec: &IndexMap<String, MapField>) -> Result<Self, Self::Error> {
        let map = ConvectionMap {
            boundary_mlat: vector_field(rec, "boundary.mlat")?,
            boundary_mlon: vector_field(rec, "boundary.mlon")?,
            vector_mlat: vector_field(rec, "vector.mlat")?,
            vector_mlon: vector_field(rec, "vector.mlon")?,
            velocity_median: vector_field(rec, "vector.vel.median")?,
            kvect: vector_field(rec, "vector.kvect")?,
            coefficients: optional_vector_field(rec, "N+2")?,
            hmb_lat: optional_scalar_field(rec, "latmin")?,
        };

        check_length("boundary.mlon", map.boundary_mlon.len(), map.boundary_mlat.len())?;
        let num_vectors = map.vector_mlat.len();
        check_length("vector.mlon", map.vector_mlon.len(), num_vectors)?;
        check_length("vector.vel.median", map.velocity_median.len(), num_vectors)?;
        check_length("vector.kvect", map.kvect.len(), num_vectors)?;

        Ok(map)
    }
}

impl ConvectionMap {
    /// Fitted vectors at the positions of the line-of-sight vectors, or `None` if the record
    /// carries no coefficients. The record's boundary latitude is used when present, otherwise
    /// `default_min_lat`.
    pub fn fitted_vectors(
        &self,
        model: &PotentialModel,
        time: impl TimeInput,
        default_min_lat: f64,
        strategy: MltStrategy,
    ) -> Result<Option<FittedVectors>, MapPotentialError> {
        let Some(coeffs) = &self.coefficients else {
            return Ok(None);
        };
        let min_lat = self.hmb_lat.unwrap_or(default_min_lat);
        model
            .fitted_vectors(
                coeffs,
                &self.vector_mlat,
                &self.vector_mlon,
                time,
                min_lat,
                strategy,
            )
            .map(Some)
    }
}
