//! Range Adjusted Measure.

use super::base::{WeightMatrices, WeightStrategy};
use crate::utils::{column_range, finite_or_zero};
use ndarray::{Array2, ArrayView2};

/// `1 / ((m + s) * range)` for every column; zero-range columns weigh zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ram;

impl WeightStrategy for Ram {
    fn name(&self) -> &'static str {
        "RAM"
    }

    fn compute(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> WeightMatrices {
        let nmeasures = (x.ncols() + y.ncols()) as f64;
        let rx = column_range(x);
        let ry = column_range(y);
        let wx = Array2::from_shape_fn(x.dim(), |(_, j)| {
            finite_or_zero(1.0 / (nmeasures * rx[j]))
        });
        let wy = Array2::from_shape_fn(y.dim(), |(_, j)| {
            finite_or_zero(1.0 / (nmeasures * ry[j]))
        });
        WeightMatrices::new(wx, wy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_ram_weights() {
        let x = array![[5.0, 13.0], [16.0, 12.0], [42.0, 25.0]];
        let y = array![[12.0], [14.0], [26.0]];
        let w = Ram.compute(&x.view(), &y.view());
        assert_relative_eq!(w.wx[[1, 0]], 1.0 / (3.0 * 37.0));
        assert_relative_eq!(w.wx[[2, 1]], 1.0 / (3.0 * 13.0));
        assert_relative_eq!(w.wy[[0, 0]], 1.0 / (3.0 * 14.0));
    }

    #[test]
    fn test_ram_zero_range_is_zero() {
        let x = array![[5.0, 2.0], [6.0, 2.0]];
        let y = array![[4.0], [4.0]];
        let w = Ram.compute(&x.view(), &y.view());
        assert_eq!(w.wx.column(1).to_vec(), vec![0.0, 0.0]);
        assert_eq!(w.wy.column(0).to_vec(), vec![0.0, 0.0]);
    }
}
