use crate::convert::mlt::MltStrategy;
use crate::convert::projection::{reproject_angle_to_origin, DEFAULT_MIN_LAT};
use crate::error::PlotdarnError;
use crate::potential::{ModelConfig, PotentialModel};
use crate::utils::boundary::point_in_polygon;
use crate::utils::geometry::{antipode, Axis};
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::PyModule;
use pyo3::{pyfunction, pymodule, wrap_pyfunction, Bound, PyErr, PyResult, Python};

impl From<PlotdarnError> for PyErr {
    fn from(value: PlotdarnError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

/// Samples the electrostatic potential on the model grid.
#[pyfunction]
#[pyo3(name = "potential_grid")]
#[pyo3(signature = (coefficients, hmb_lat, order = 6))]
fn potential_grid_py<'py>(
    py: Python<'py>,
    coefficients: Vec<f64>,
    hmb_lat: f64,
    order: usize,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let model = PotentialModel::new(ModelConfig::default().with_order(order));
    let grid = model
        .potential_grid(&coefficients, hmb_lat)
        .map_err(PlotdarnError::from)?;
    Ok(grid.into_pyarray_bound(py))
}

/// Fitted velocity azimuths and magnitudes at magnetic latitude/longitude points, using the
/// closed-form magnetic local time.
#[pyfunction]
#[pyo3(name = "fitted_vectors")]
#[pyo3(signature = (coefficients, mlat, mlon, time, hmb_lat = DEFAULT_MIN_LAT, order = 6))]
fn fitted_vectors_py(
    coefficients: Vec<f64>,
    mlat: Vec<f64>,
    mlon: Vec<f64>,
    time: String,
    hmb_lat: f64,
    order: usize,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let model = PotentialModel::new(ModelConfig::default().with_order(order));
    let vectors = model
        .fitted_vectors(
            &coefficients,
            &mlat,
            &mlon,
            time,
            hmb_lat,
            MltStrategy::Approximate,
        )
        .map_err(PlotdarnError::from)?;
    Ok((vectors.azimuths, vectors.magnitudes))
}

/// Which points lie within the polygon traced by the boundary arrays.
#[pyfunction]
#[pyo3(name = "points_inside_boundary")]
#[pyo3(signature = (points_x, points_y, boundary_x, boundary_y, radius = 0.0))]
fn points_inside_boundary_py(
    points_x: Vec<f64>,
    points_y: Vec<f64>,
    boundary_x: Vec<f64>,
    boundary_y: Vec<f64>,
    radius: f64,
) -> PyResult<Vec<bool>> {
    let inside = point_in_polygon(&points_x, &points_y, &boundary_x, &boundary_y, radius)
        .map_err(PlotdarnError::from)?;
    Ok(inside)
}

/// The value on the opposite side of the globe, for `axis` "latitude" or "longitude".
#[pyfunction]
#[pyo3(name = "antipode")]
#[pyo3(signature = (value, axis = String::from("longitude")))]
fn antipode_py(value: f64, axis: String) -> PyResult<f64> {
    let axis: Axis = axis.parse().map_err(PlotdarnError::from)?;
    Ok(antipode(value, axis))
}

#[pyfunction]
#[pyo3(name = "reproject_angle_to_origin")]
fn reproject_angle_to_origin_py(x: f64, y: f64, angle: f64) -> f64 {
    reproject_angle_to_origin(x, y, angle)
}

/// Geometry and map-potential functions for SuperDARN convection maps.
#[pymodule]
fn plotdarn(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(potential_grid_py, m)?)?;
    m.add_function(wrap_pyfunction!(fitted_vectors_py, m)?)?;
    m.add_function(wrap_pyfunction!(points_inside_boundary_py, m)?)?;
    m.add_function(wrap_pyfunction!(antipode_py, m)?)?;
    m.add_function(wrap_pyfunction!(reproject_angle_to_origin_py, m)?)?;

    Ok(())
}
