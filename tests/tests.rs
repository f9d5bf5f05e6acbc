use indexmap::IndexMap;
use is_close::is_close;
use ndarray::arr1;
use plotdarn::convert::{DipoleOracle, MagneticConverter, MltStrategy};
use plotdarn::overlay::{gridlines, los_vectors, boundary_xy};
use plotdarn::potential::{MapPotentialError, ModelConfig, PotentialModel};
use plotdarn::record::{ConvectionMap, MapField};
use plotdarn::utils::geometry::{normalize_dateline_crossing, DatelineCrossing};
use plotdarn::utils::location::Location;
use plotdarn::PlotdarnError;

const TIME: &str = "2012-06-15 22:02";

/// 49 coefficients dominated by a two-cell (l = 1, m = 1) pattern
fn two_cell_coefficients() -> Vec<f64> {
    let mut coeffs = vec![0.0; 49];
    coeffs[2] = 20_000.0;
    coeffs[3] = -8_000.0;
    coeffs[4] = 1_500.0;
    coeffs[6] = 3_000.0;
    coeffs
}

#[test]
fn dipole_round_trip_through_converter() {
    let converter = MagneticConverter::new(DipoleOracle::default()).with_altitude(300.0);
    let saskatoon = Location::new(52.16, -106.53).unwrap();

    let mag = converter.to_magnetic(&saskatoon, TIME).unwrap();
    assert!(mag.lat() > saskatoon.lat());
    let geo = converter.to_geographic(&mag, TIME).unwrap();
    assert!(is_close!(geo.lat(), saskatoon.lat(), abs_tol = 1e-9));
    assert!(is_close!(geo.lon(), saskatoon.lon(), abs_tol = 1e-9));
}

#[test]
fn converter_accepts_any_time_form() {
    let converter = MagneticConverter::new(DipoleOracle::default());
    let from_str = converter.magnetic_local_time(30.0, TIME).unwrap();
    let from_string = converter.magnetic_local_time(30.0, TIME.to_string()).unwrap();
    let from_offset = converter
        .magnetic_local_time(30.0, "2012-06-16 00:02 +0200")
        .unwrap();
    assert_eq!(from_str, from_string);
    assert!(is_close!(from_str, from_offset));
    assert!(converter.magnetic_local_time(30.0, "15/06/2012").is_err());
}

#[test]
fn converter_arrays() {
    let converter = MagneticConverter::new(DipoleOracle::default());
    let (mlat, mlon) = converter
        .to_magnetic_array(&arr1(&[52.16, 62.8]), &arr1(&[-106.53, -150.0]), TIME)
        .unwrap();
    assert_eq!(mlat.len(), 2);
    assert!(mlon.iter().all(|lon| (-180.0..=180.0).contains(lon)));

    let mismatch = converter.to_magnetic_array(&arr1(&[52.16]), &arr1(&[1.0, 2.0]), TIME);
    assert!(mismatch.is_err());
}

#[test]
fn fitted_vector_scenario() {
    let model = PotentialModel::default();
    let coeffs = two_cell_coefficients();

    let first = model
        .fitted_vectors(&coeffs, &[70.0], &[0.0], TIME, 50.0, MltStrategy::Approximate)
        .unwrap();
    let second = model
        .fitted_vectors(&coeffs, &[70.0], &[0.0], TIME, 50.0, MltStrategy::Approximate)
        .unwrap();
    assert_eq!(first, second);

    let azimuth = first.azimuths[0];
    let magnitude = first.magnitudes[0];
    assert!(azimuth.is_finite() && (0.0..360.0).contains(&azimuth));
    assert!(magnitude.is_finite() && magnitude > 0.0);
}

#[test]
fn dipole_and_approximate_mlt_both_work() {
    let model = PotentialModel::default();
    let coeffs = two_cell_coefficients();
    let oracle = DipoleOracle::default();
    let mlat = [65.0, 72.0, 80.0];
    let mlon = [-60.0, 10.0, 120.0];

    for strategy in [MltStrategy::Oracle(&oracle), MltStrategy::Approximate] {
        let vectors = model
            .fitted_vectors(&coeffs, &mlat, &mlon, TIME, 55.0, strategy)
            .unwrap();
        assert_eq!(vectors.magnitudes.len(), 3);
        assert!(vectors.magnitudes.iter().all(|m| m.is_finite()));
    }
}

#[test]
fn short_coefficients_rejected() {
    let model = PotentialModel::new(ModelConfig::default().with_order(8));
    let result = model.fitted_vectors(
        &two_cell_coefficients(),
        &[70.0],
        &[0.0],
        TIME,
        50.0,
        MltStrategy::Approximate,
    );
    assert_eq!(
        result,
        Err(MapPotentialError::Coefficients {
            found: 49,
            expected: 81
        })
    );
}

#[test]
fn potential_grid_is_zero_outside_boundary() {
    let model = PotentialModel::default();
    let grid = model.potential_grid(&two_cell_coefficients(), 60.0).unwrap();
    assert_eq!(grid.dim(), (80, 80));
    // corners are equatorward of any boundary
    assert_eq!(grid[[0, 0]], 0.0);
    assert!(grid.iter().any(|v| *v != 0.0));
}

#[test]
fn record_to_fitted_vectors() {
    let mut rec = IndexMap::new();
    rec.insert("boundary.mlat".to_string(), MapField::Vector(vec![60.0; 4]));
    rec.insert(
        "boundary.mlon".to_string(),
        MapField::Vector(vec![-180.0, -90.0, 0.0, 90.0]),
    );
    rec.insert("vector.mlat".to_string(), MapField::Vector(vec![70.0, 54.0]));
    rec.insert("vector.mlon".to_string(), MapField::Vector(vec![0.0, 30.0]));
    rec.insert("vector.vel.median".to_string(), MapField::Vector(vec![500.0, 300.0]));
    rec.insert("vector.kvect".to_string(), MapField::Vector(vec![30.0, -60.0]));
    rec.insert("N+2".to_string(), MapField::Vector(two_cell_coefficients()));
    rec.insert("latmin".to_string(), MapField::Scalar(58.0));

    let map = ConvectionMap::try_from(&rec).unwrap();
    let model = PotentialModel::default();
    let fitted = map
        .fitted_vectors(&model, TIME, 50.0, MltStrategy::Approximate)
        .unwrap()
        .unwrap();
    assert_eq!(fitted.azimuths.len(), 2);
    // the second vector lies equatorward of latmin
    assert_eq!(fitted.magnitudes[1], 0.0);

    let boundary = boundary_xy(
        &map.boundary_mlat,
        &map.boundary_mlon,
        TIME,
        MltStrategy::Approximate,
        50.0,
    )
    .unwrap();
    let los = los_vectors(
        &map.vector_mlat,
        &map.vector_mlon,
        &map.velocity_median,
        &map.kvect,
        &boundary,
        TIME,
        MltStrategy::Approximate,
        50.0,
    )
    .unwrap();
    assert_eq!(los.inside.len(), 1);
    assert_eq!(los.outside.len(), 1);
}

#[test]
fn crate_error_wraps_module_errors() {
    let err: PlotdarnError = Location::new(91.0, 0.0).unwrap_err().into();
    assert!(matches!(err, PlotdarnError::Location(_)));

    let err = boundary_xy(&[60.0], &[], TIME, MltStrategy::Approximate, 50.0).unwrap_err();
    assert!(matches!(err, PlotdarnError::Geometry(_)));

    let err = boundary_xy(&[60.0], &[1.0], "yesterday", MltStrategy::Approximate, 50.0)
        .unwrap_err();
    assert!(matches!(err, PlotdarnError::Convert(_)));
}

#[test]
fn dateline_path_is_continuous() {
    let path: Vec<Location> = [
        (60.0, 170.0),
        (61.0, -175.0),
        (62.0, -100.0),
        (61.0, 0.0),
        (60.0, 100.0),
        (60.0, 160.0),
    ]
        .into_iter()
        .map(|(lat, lon)| Location::new(lat, lon).unwrap())
        .collect();
    let crossing = normalize_dateline_crossing(&path, false).unwrap();
    assert!(matches!(crossing, DatelineCrossing::Resolved(_)));
    assert_eq!(crossing.points()[0].lon(), -175.0);
    let lons: Vec<f64> = crossing.points().iter().map(|p| p.lon()).collect();
    assert!(lons.windows(2).all(|w| (w[1] - w[0]).abs() < 180.0));
}

#[test]
fn gridlines_cover_plot() {
    let lines = gridlines(50.0);
    assert_eq!(lines.len(), 12);
}
