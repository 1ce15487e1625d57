//! Normalized weighted additive model.

use super::base::{WeightMatrices, WeightStrategy};
use crate::utils::{column_std, finite_or_zero};
use ndarray::{Array1, Array2, ArrayView2};

/// Reciprocal of the sample standard deviation of each column.
///
/// Constant columns (and single-observation data, where the standard deviation
/// is undefined) get weight zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalized;

fn broadcast_rows(w: &Array1<f64>, n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, w.len()), |(_, j)| w[j])
}

impl WeightStrategy for Normalized {
    fn name(&self) -> &'static str {
        "Normalized"
    }

    fn compute(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> WeightMatrices {
        let wx = column_std(x).mapv(|sd| finite_or_zero(1.0 / sd));
        let wy = column_std(y).mapv(|sd| finite_or_zero(1.0 / sd));
        WeightMatrices::new(broadcast_rows(&wx, x.nrows()), broadcast_rows(&wy, y.nrows()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sample_std;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_normalized_reciprocal_std() {
        let x = array![[5.0, 13.0], [16.0, 12.0], [16.0, 26.0], [17.0, 15.0]];
        let y = array![[12.0], [14.0], [25.0], [26.0]];
        let w = Normalized.compute(&x.view(), &y.view());
        let sd0 = sample_std(&x.column(0));
        for i in 0..4 {
            assert_relative_eq!(w.wx[[i, 0]], 1.0 / sd0, epsilon = 1e-12);
            assert_eq!(w.wy[[i, 0]], w.wy[[0, 0]]);
        }
    }

    #[test]
    fn test_normalized_constant_column_is_zero() {
        let x = array![[5.0, 3.0], [16.0, 3.0], [7.0, 3.0]];
        let y = array![[1.0], [1.0], [1.0]];
        let w = Normalized.compute(&x.view(), &y.view());
        assert!(w.wx.column(1).iter().all(|&v| v == 0.0));
        assert!(w.wy.iter().all(|&v| v == 0.0));
        assert!(w.wx.column(0).iter().all(|&v| v > 0.0 && v.is_finite()));
    }
}
