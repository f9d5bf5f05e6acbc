use crate::utils::constants::{
    B_FIELD_EQUATORIAL_T, IONOSPHERE_ALTITUDE_M, MLT_EPOCH_HOURS, RADIUS_EARTH_M,
};

/// Parameters of the map-potential model. The defaults are those of the reference model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub order: usize,        // truncation degree of the expansion
    pub delta_lat: f64,      // finite difference step, degrees
    pub delta_lt: f64,       // finite difference step, hours
    pub radius_earth: f64,   // m
    pub altitude: f64,       // m
    pub b_equatorial: f64,   // T
    pub grid_size: usize,    // cells per side of the potential grid
    pub mlt_epoch: f64,      // UT hours
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            order: 6,
            delta_lat: 0.05,
            delta_lt: 0.05,
            radius_earth: RADIUS_EARTH_M,
            altitude: IONOSPHERE_ALTITUDE_M,
            b_equatorial: B_FIELD_EQUATORIAL_T,
            grid_size: 80,
            mlt_epoch: MLT_EPOCH_HOURS,
        }
    }
}

impl ModelConfig {
    pub fn with_order(self, order: usize) -> Self {
        ModelConfig { order, ..self }
    }

    /// Length of a coefficient vector for this order, `(order + 1)^2`
    pub fn num_coefficients(&self) -> usize {
        (self.order + 1) * (self.order + 1)
    }
}
