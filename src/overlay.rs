//! Plot-space data for drawing convection maps: grid lines, the model boundary, coastlines and
//! line-of-sight vectors, all projected onto the polar plot.
use crate::convert::mlt::MltStrategy;
use crate::convert::projection::{polar_projection, reproject_angle_to_origin};
use crate::convert::time::TimeInput;
use crate::error::PlotdarnError;
use crate::utils::boundary::Polygon;
use crate::utils::geometry::GeometryError;
use itertools::{izip, Either, Itertools};

type Result<T> = std::result::Result<T, PlotdarnError>;

/// Plot length of a 1000 m/s vector
pub const DEFAULT_VECTOR_LENGTH: f64 = 5.0;

/// Converts a velocity (m/s) into a plot length, where 1000 m/s is `length` long.
pub fn scale_velocity(velocity: f64, length: f64) -> f64 {
    velocity / 1000.0 * length
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Polyline {
    fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Polyline {
        let (x, y) = points.into_iter().unzip();
        Polyline { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Lines of constant MLT every three hours from 80 degrees down to `min_lat`, then circles of
/// constant latitude at 80, 70, 60 and 50 degrees.
pub fn gridlines(min_lat: f64) -> Vec<Polyline> {
    let meridians = (0..8).map(|i| {
        let mlt = 3.0 * i as f64;
        Polyline::from_points([
            polar_projection(80.0, mlt, min_lat),
            polar_projection(min_lat, mlt, min_lat),
        ])
    });
    let circles = [80.0, 70.0, 60.0, 50.0].into_iter().map(|lat| {
        Polyline::from_points((0..49).map(|i| polar_projection(lat, i as f64 / 2.0, min_lat)))
    });
    meridians.chain(circles).collect()
}

/// Projects a boundary (or any line) given in magnetic latitude and longitude onto the plot.
pub fn boundary_xy(
    mlat: &[f64],
    mlon: &[f64],
    time: impl TimeInput,
    strategy: MltStrategy,
    min_lat: f64,
) -> Result<Polyline> {
    if mlon.len() != mlat.len() {
        Err(GeometryError::LengthMismatch {
            name: "mlon",
            found: mlon.len(),
            expected: mlat.len(),
        })?
    }
    let time = time.resolve_utc()?;
    let mlts = strategy.magnetic_local_times(mlon, &time)?;
    Ok(Polyline::from_points(
        mlat.iter()
            .zip(mlts)
            .map(|(&lat, lt)| polar_projection(lat, lt, min_lat)),
    ))
}

/// Projects several lines, such as coastlines already converted to magnetic coordinates.
pub fn polylines_xy(
    mlats: &[Vec<f64>],
    mlons: &[Vec<f64>],
    time: impl TimeInput,
    strategy: MltStrategy,
    min_lat: f64,
) -> Result<Vec<Polyline>> {
    if mlons.len() != mlats.len() {
        Err(GeometryError::LengthMismatch {
            name: "mlons",
            found: mlons.len(),
            expected: mlats.len(),
        })?
    }
    let time = time.resolve_utc()?;
    mlats
        .iter()
        .zip(mlons)
        .map(|(mlat, mlon)| boundary_xy(mlat, mlon, time, strategy, min_lat))
        .collect()
}

/// A line-of-sight velocity prepared for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct LosVector {
    pub x: f64,
    pub y: f64,
    pub magnitude: f64,  // m/s
    pub length: f64,     // plot units
    pub angle: f64,      // degrees, relative to the direction of the plot origin
    pub mlat: f64,
    pub mlon: f64,
    pub mlt: f64,
    pub kvect: f64,      // degrees, as measured
}

/// Line-of-sight vectors split by whether they fall inside the model boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LosVectors {
    pub inside: Vec<LosVector>,
    pub outside: Vec<LosVector>,
}

/// Projects line-of-sight vectors onto the plot and sorts them against `boundary`, which must
/// already be in plot coordinates.
#[allow(clippy::too_many_arguments)]
pub fn los_vectors(
    mlat: &[f64],
    mlon: &[f64],
    magnitude: &[f64],
    kvect: &[f64],
    boundary: &Polyline,
    time: impl TimeInput,
    strategy: MltStrategy,
    min_lat: f64,
) -> Result<LosVectors> {
    for (name, found) in [
        ("mlon", mlon.len()),
        ("magnitude", magnitude.len()),
        ("kvect", kvect.len()),
    ] {
        if found != mlat.len() {
            Err(GeometryError::LengthMismatch {
                name,
                found,
                expected: mlat.len(),
            })?
        }
    }
    let time = time.resolve_utc()?;
    let mlts = strategy.magnetic_local_times(mlon, &time)?;
    let polygon = Polygon::new(&boundary.x, &boundary.y)?;

    let (inside, outside): (Vec<_>, Vec<_>) = izip!(mlat, mlon, magnitude, kvect, mlts).partition_map(
        |(&mlat, &mlon, &magnitude, &kvect, mlt)| {
            let (x, y) = polar_projection(mlat, mlt, min_lat);
            let vector = LosVector {
                x,
                y,
                magnitude,
                length: scale_velocity(magnitude, DEFAULT_VECTOR_LENGTH),
                angle: reproject_angle_to_origin(x, y, kvect),
                mlat,
                mlon,
                mlt,
                kvect,
            };
            if polygon.contains(x, y, 0.0) {
                Either::Left(vector)
            } else {
                Either::Right(vector)
            }
        },
    );
    Ok(LosVectors { inside, outside })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::mlt::approximate_mlt;
    use is_close::is_close;

    const TIME: &str = "2012-06-15 22:02";

    #[test]
    fn scale() {
        assert!(is_close!(scale_velocity(1000.0, 0.2), 0.2));
        assert!(is_close!(scale_velocity(500.0, 0.2), 0.1));
        assert!(is_close!(scale_velocity(2000.0, 0.2), 0.4));
        assert!(is_close!(scale_velocity(1.0, 0.2), 0.0002));
        assert!(is_close!(scale_velocity(1.0, 3.0), 0.003));
        assert!(is_close!(scale_velocity(2.0, 3.0), 0.006));
        assert!(is_close!(scale_velocity(5.0, DEFAULT_VECTOR_LENGTH), 0.025));
    }

    #[test]
    fn grid() {
        let lines = gridlines(50.0);
        assert_eq!(lines.len(), 12);
        assert!(lines[..8].iter().all(|l| l.len() == 2));
        assert!(lines[8..].iter().all(|l| l.len() == 49));
        // the 50 degree circle is the unit circle
        let outer = &lines[11];
        for (x, y) in outer.x.iter().zip(&outer.y) {
            assert!(is_close!(x.hypot(*y), 1.0));
        }
    }

    #[test]
    fn boundary_projection() {
        let line = boundary_xy(&[60.0, 60.0], &[0.0, 90.0], TIME, MltStrategy::Approximate, 50.0)
            .unwrap();
        assert_eq!(line.len(), 2);
        let mlt = approximate_mlt(0.0, 22.0 + 2.0 / 60.0);
        let (x, y) = polar_projection(60.0, mlt, 50.0);
        assert!(is_close!(line.x[0], x, abs_tol = 1e-9));
        assert!(is_close!(line.y[0], y, abs_tol = 1e-9));
        assert!(boundary_xy(&[60.0], &[0.0, 1.0], TIME, MltStrategy::Approximate, 50.0).is_err());
    }

    #[test]
    fn several_polylines() {
        let lines = polylines_xy(
            &[vec![70.0, 71.0], vec![65.0]],
            &[vec![10.0, 12.0], vec![-80.0]],
            TIME,
            MltStrategy::Approximate,
            50.0,
        )
        .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].len(), 1);
    }

    #[test]
    fn los_split() {
        // a circle at 60 degrees encloses everything poleward of it
        let mlons: Vec<f64> = (0..36).map(|i| -180.0 + 10.0 * i as f64).collect();
        let boundary = boundary_xy(
            &vec![60.0; mlons.len()],
            &mlons,
            TIME,
            MltStrategy::Approximate,
            50.0,
        )
        .unwrap();

        let vectors = los_vectors(
            &[75.0, 55.0, 80.0],
            &[10.0, 10.0, -100.0],
            &[400.0, 900.0, 1000.0],
            &[0.0, 45.0, 90.0],
            &boundary,
            TIME,
            MltStrategy::Approximate,
            50.0,
        )
        .unwrap();

        assert_eq!(vectors.inside.len(), 2);
        assert_eq!(vectors.outside.len(), 1);
        assert_eq!(vectors.outside[0].mlat, 55.0);
        assert!(is_close!(vectors.inside[1].length, 5.0));
        let v = &vectors.inside[0];
        assert!(is_close!(v.angle, reproject_angle_to_origin(v.x, v.y, 0.0)));
    }

    #[test]
    fn los_length_mismatch() {
        let result = los_vectors(
            &[75.0],
            &[10.0],
            &[400.0, 1.0],
            &[0.0],
            &Polyline::default(),
            TIME,
            MltStrategy::Approximate,
            50.0,
        );
        assert!(result.is_err());
    }
}
