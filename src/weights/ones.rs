//! Plain additive model: every slack weighs one.

use super::base::{WeightMatrices, WeightStrategy};
use ndarray::{Array2, ArrayView2};

/// Unit weights for every slack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ones;

impl WeightStrategy for Ones {
    fn name(&self) -> &'static str {
        "Ones"
    }

    fn compute(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> WeightMatrices {
        WeightMatrices::new(Array2::ones(x.dim()), Array2::ones(y.dim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_ones_shapes_and_values() {
        let x = array![[5.0, 13.0], [16.0, 12.0], [16.0, 26.0]];
        let y = array![[12.0], [14.0], [25.0]];
        let w = Ones.compute(&x.view(), &y.view());
        assert_eq!(w.wx, Array2::<f64>::ones((3, 2)));
        assert_eq!(w.wy, Array2::<f64>::ones((3, 1)));
    }
}
