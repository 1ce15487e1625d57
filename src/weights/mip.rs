//! Measure of Inefficiency Proportions.

use super::base::{WeightMatrices, WeightStrategy};
use ndarray::ArrayView2;

/// Weight of each slack is the reciprocal of the observation it belongs to.
///
/// Unlike the column-based schemes, a zero observation is left as an infinite
/// weight: MIP is undefined for zero-valued data and the infinity marks it.
/// Solving with such weights is rejected before the first LP is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mip;

impl WeightStrategy for Mip {
    fn name(&self) -> &'static str {
        "MIP"
    }

    fn compute(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> WeightMatrices {
        WeightMatrices::new(x.mapv(|v| 1.0 / v), y.mapv(|v| 1.0 / v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mip_reciprocals() {
        let x = array![[5.0, 13.0], [16.0, 12.0]];
        let y = array![[12.0], [14.0]];
        let w = Mip.compute(&x.view(), &y.view());
        assert_relative_eq!(w.wx[[0, 0]], 0.2);
        assert_relative_eq!(w.wx[[1, 1]], 1.0 / 12.0);
        assert_relative_eq!(w.wy[[1, 0]], 1.0 / 14.0);
    }

    #[test]
    fn test_mip_zero_observation_stays_infinite() {
        let x = array![[0.0, 13.0], [16.0, 12.0]];
        let y = array![[12.0], [0.0]];
        let w = Mip.compute(&x.view(), &y.view());
        assert_eq!(w.wx[[0, 0]], f64::INFINITY);
        assert_eq!(w.wy[[1, 0]], f64::INFINITY);
        assert!(w.wx[[1, 0]].is_finite());
    }
}
