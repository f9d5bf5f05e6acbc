use crate::potential::error::MapPotentialError;
use crate::potential::model::PotentialModel;
use crate::utils::constants::HOURS_PER_DAY;
use ndarray::{Array2, Zip};
use std::f64::consts::PI;
use tracing::debug;

impl PotentialModel {
    /// Magnetic latitude and local time at the centre of grid cell `(i, j)`.
    ///
    /// Cells are one degree of latitude apart, centred on the pole, with local midnight towards
    /// increasing `j`.
    pub fn grid_cell_position(&self, i: usize, j: usize) -> (f64, f64) {
        let centre = self.config().grid_size as f64 / 2.0 - 0.5;
        let x = i as f64 - centre;
        let y = j as f64 - centre;
        let mag_lat = 90.0 - x.hypot(y);
        let mag_lt = HOURS_PER_DAY * x.atan2(-y) / (2.0 * PI);
        (mag_lat, mag_lt)
    }

    /// Samples the potential over a square grid of cells, for contouring. `coeffs` should already
    /// be rotated to local time.
    ///
    /// # Errors
    /// Will return `Err` if the coefficient vector is too short for the model order.
    pub fn potential_grid(
        &self,
        coeffs: &[f64],
        hmb_lat: f64,
    ) -> Result<Array2<f64>, MapPotentialError> {
        self.check_coefficients(coeffs)?;
        let n = self.config().grid_size;
        debug!(size = n, hmb_lat, "sampling potential grid");

        let mut grid = Array2::<f64>::zeros((n, n));
        Zip::indexed(&mut grid).par_for_each(|(i, j), cell| {
            let (mag_lat, mag_lt) = self.grid_cell_position(i, j);
            *cell = self.potential(coeffs, hmb_lat, mag_lat, mag_lt);
        });
        Ok(grid)
    }
}
