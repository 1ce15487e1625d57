//! Bounded Adjusted Measure.

use super::base::{WeightMatrices, WeightStrategy};
use crate::utils::{column_max, column_min, finite_or_zero};
use ndarray::{Array2, ArrayView2};

/// Per-observation weights scaled by the distance to the observed bound.
///
/// Inputs: `1 / ((m + s) * (x_ij - min_j))`. Outputs:
/// `1 / ((m + s) * (max_j - y_ij))`. An observation sitting on its bound
/// gets weight zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bam;

impl WeightStrategy for Bam {
    fn name(&self) -> &'static str {
        "BAM"
    }

    fn compute(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> WeightMatrices {
        let nmeasures = (x.ncols() + y.ncols()) as f64;
        let min_x = column_min(x);
        let max_y = column_max(y);
        let wx = Array2::from_shape_fn(x.dim(), |(i, j)| {
            finite_or_zero(1.0 / (nmeasures * (x[[i, j]] - min_x[j])))
        });
        let wy = Array2::from_shape_fn(y.dim(), |(i, j)| {
            finite_or_zero(1.0 / (nmeasures * (max_y[j] - y[[i, j]])))
        });
        WeightMatrices::new(wx, wy)
    }
}
