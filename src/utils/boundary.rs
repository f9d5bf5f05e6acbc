use crate::utils::geometry::GeometryError;
use rayon::prelude::*;

type Result<T> = std::result::Result<T, GeometryError>;

/// Points closer than this to an edge are treated as lying on it
const EDGE_TOLERANCE: f64 = 1e-12;

/// A closed polygon in plot space. The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<(f64, f64)>,
}

impl Polygon {
    pub fn new(boundary_x: &[f64], boundary_y: &[f64]) -> Result<Polygon> {
        check_lengths("boundary_y", boundary_y.len(), boundary_x.len())?;
        Ok(Polygon {
            vertices: boundary_x
                .iter()
                .copied()
                .zip(boundary_y.iter().copied())
                .collect(),
        })
    }

    fn edges(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Even-odd ray casting test of the polygon interior, ignoring `radius`.
    fn crosses_odd(&self, x: f64, y: f64) -> bool {
        let mut inside = false;
        for ((xi, yi), (xj, yj)) in self.edges() {
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
        }
        inside
    }

    fn distance_to_edge(&self, x: f64, y: f64) -> f64 {
        self.edges()
            .map(|((xi, yi), (xj, yj))| {
                let (dx, dy) = (xj - xi, yj - yi);
                let length_squared = dx * dx + dy * dy;
                let t = if length_squared == 0.0 {
                    0.0
                } else {
                    (((x - xi) * dx + (y - yi) * dy) / length_squared).clamp(0.0, 1.0)
                };
                (x - (xi + t * dx)).hypot(y - (yi + t * dy))
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether the point lies inside the polygon.
    ///
    /// A positive `radius` grows the polygon, admitting points within `radius` of an edge. Zero or
    /// negative radius shrinks it, so points on (or within `|radius|` of) an edge are outside.
    pub fn contains(&self, x: f64, y: f64, radius: f64) -> bool {
        let inside = self.crosses_odd(x, y);
        let distance = self.distance_to_edge(x, y);
        if radius > 0.0 {
            inside || distance <= radius
        } else {
            inside && distance > (-radius).max(EDGE_TOLERANCE)
        }
    }
}

fn check_lengths(name: &'static str, found: usize, expected: usize) -> Result<()> {
    if found != expected {
        Err(GeometryError::LengthMismatch {
            name,
            found,
            expected,
        })?
    }
    Ok(())
}

/// Tests each point `(points_x[i], points_y[i])` against the polygon traced by the boundary arrays.
///
/// # Errors
/// Will return `Err` if either pair of parallel arrays differs in length.
pub fn point_in_polygon(
    points_x: &[f64],
    points_y: &[f64],
    boundary_x: &[f64],
    boundary_y: &[f64],
    radius: f64,
) -> Result<Vec<bool>> {
    check_lengths("points_y", points_y.len(), points_x.len())?;
    let polygon = Polygon::new(boundary_x, boundary_y)?;

    Ok(points_x
        .par_iter()
        .zip(points_y.par_iter())
        .map(|(&x, &y)| polygon.contains(x, y, radius))
        .collect())
}

/// Like [`point_in_polygon`], but also returns the complementary outside mask.
pub fn points_around_boundary(
    points_x: &[f64],
    points_y: &[f64],
    boundary_x: &[f64],
    boundary_y: &[f64],
    radius: f64,
) -> Result<(Vec<bool>, Vec<bool>)> {
    let inside = point_in_polygon(points_x, points_y, boundary_x, boundary_y, radius)?;
    let outside = inside.iter().map(|i| !i).collect();
    Ok((inside, outside))
}
