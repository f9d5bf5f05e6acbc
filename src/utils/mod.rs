pub mod boundary;
pub(crate) mod constants;
pub mod geometry;
pub mod location;

pub use boundary::{point_in_polygon, points_around_boundary, Polygon};
pub use geometry::{
    antipode, great_circle_distance, intermediate_point, normalize_dateline_crossing, Axis,
    DatelineCrossing, GeometryError,
};
pub use location::{Location, LocationError};
