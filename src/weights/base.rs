//! Weight strategy trait and the closed set of weighting schemes.

use super::{Bam, Mip, Normalized, Ones, Ram};
use crate::error::{AdditiveDeaError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weighting scheme of the additive model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AdditiveModel {
    /// Unweighted slacks.
    #[default]
    Ones,
    /// Measure of Inefficiency Proportions: reciprocal of each observation.
    #[serde(rename = "MIP")]
    Mip,
    /// Reciprocal of the column standard deviation.
    Normalized,
    /// Range Adjusted Measure.
    #[serde(rename = "RAM")]
    Ram,
    /// Bounded Adjusted Measure.
    #[serde(rename = "BAM")]
    Bam,
    /// Weights supplied by the caller.
    Custom,
}

static ONES: Ones = Ones;
static MIP: Mip = Mip;
static NORMALIZED: Normalized = Normalized;
static RAM: Ram = Ram;
static BAM: Bam = Bam;

impl AdditiveModel {
    /// All schemes, in declaration order.
    pub const ALL: [AdditiveModel; 6] = [
        AdditiveModel::Ones,
        AdditiveModel::Mip,
        AdditiveModel::Normalized,
        AdditiveModel::Ram,
        AdditiveModel::Bam,
        AdditiveModel::Custom,
    ];

    /// Get the display name of the scheme.
    pub fn name(&self) -> &'static str {
        match self {
            AdditiveModel::Ones => "Ones",
            AdditiveModel::Mip => "MIP",
            AdditiveModel::Normalized => "Normalized",
            AdditiveModel::Ram => "RAM",
            AdditiveModel::Bam => "BAM",
            AdditiveModel::Custom => "Custom",
        }
    }

    /// The weight computation behind this scheme, `None` for `Custom`.
    pub fn strategy(&self) -> Option<&'static dyn WeightStrategy> {
        match self {
            AdditiveModel::Ones => Some(&ONES),
            AdditiveModel::Mip => Some(&MIP),
            AdditiveModel::Normalized => Some(&NORMALIZED),
            AdditiveModel::Ram => Some(&RAM),
            AdditiveModel::Bam => Some(&BAM),
            AdditiveModel::Custom => None,
        }
    }

    /// Compute `(wX, wY)` for the observation set.
    ///
    /// Fails with `InvalidModel` for `Custom`, whose weights only the caller
    /// can provide.
    pub fn weights(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> Result<WeightMatrices> {
        let strategy = self.strategy().ok_or_else(|| {
            AdditiveDeaError::InvalidModel(
                "Custom weighting requires user-supplied wX and wY".to_string(),
            )
        })?;
        Ok(strategy.compute(x, y))
    }
}

impl fmt::Display for AdditiveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for AdditiveModel {
    type Err = AdditiveDeaError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        AdditiveModel::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(tag))
            .ok_or_else(|| {
                AdditiveDeaError::InvalidModel(format!(
                    "`{}` (expected Ones, MIP, Normalized, RAM, BAM or Custom)",
                    s
                ))
            })
    }
}

/// Pair of weight matrices with the shapes of `X` and `Y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrices {
    /// Input slack weights (n x m).
    pub wx: Array2<f64>,
    /// Output slack weights (n x s).
    pub wy: Array2<f64>,
}

impl WeightMatrices {
    pub fn new(wx: Array2<f64>, wy: Array2<f64>) -> Self {
        Self { wx, wy }
    }

    /// Check that the weights line up with `X` and `Y`.
    pub fn check_shapes(&self, x_dim: (usize, usize), y_dim: (usize, usize)) -> Result<()> {
        if self.wx.dim() != x_dim {
            return Err(AdditiveDeaError::shape("wX vs X", x_dim, self.wx.dim()));
        }
        if self.wy.dim() != y_dim {
            return Err(AdditiveDeaError::shape("wY vs Y", y_dim, self.wy.dim()));
        }
        Ok(())
    }

    /// Input and output weight rows of one DMU.
    pub fn row(&self, dmu: usize) -> (ArrayView1<'_, f64>, ArrayView1<'_, f64>) {
        (self.wx.row(dmu), self.wy.row(dmu))
    }

    /// Index of the first DMU whose weights contain a non-finite value.
    pub fn first_non_finite_row(&self) -> Option<usize> {
        (0..self.wx.nrows()).find(|&i| {
            let (wx, wy) = self.row(i);
            wx.iter().chain(wy.iter()).any(|v| !v.is_finite())
        })
    }
}

/// A pure weight computation for one scheme.
///
/// Implementations must return matrices of exactly the shapes of `x` and `y`.
pub trait WeightStrategy: Send + Sync {
    /// Name of the scheme (e.g. "RAM").
    fn name(&self) -> &'static str;

    /// Compute `(wX, wY)`.
    fn compute(&self, x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> WeightMatrices;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_model_from_str() {
        assert_eq!("MIP".parse::<AdditiveModel>().unwrap(), AdditiveModel::Mip);
        assert_eq!("ram".parse::<AdditiveModel>().unwrap(), AdditiveModel::Ram);
        assert_eq!(
            " Normalized ".parse::<AdditiveModel>().unwrap(),
            AdditiveModel::Normalized
        );
        assert!(matches!(
            "SBM".parse::<AdditiveModel>(),
            Err(AdditiveDeaError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_strategy_table_names_match() {
        for model in AdditiveModel::ALL {
            match model.strategy() {
                Some(s) => assert_eq!(s.name(), model.name()),
                None => assert_eq!(model, AdditiveModel::Custom),
            }
        }
    }

    #[test]
    fn test_custom_has_no_strategy() {
        let x = array![[1.0], [2.0]];
        let y = array![[1.0], [2.0]];
        let err = AdditiveModel::Custom.weights(&x.view(), &y.view()).unwrap_err();
        assert!(matches!(err, AdditiveDeaError::InvalidModel(_)));
    }

    #[test]
    fn test_check_shapes() {
        let w = WeightMatrices::new(Array2::ones((3, 2)), Array2::ones((3, 1)));
        assert!(w.check_shapes((3, 2), (3, 1)).is_ok());
        assert!(matches!(
            w.check_shapes((3, 2), (4, 1)),
            Err(AdditiveDeaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_first_non_finite_row() {
        let w = WeightMatrices::new(
            array![[1.0, 2.0], [f64::INFINITY, 1.0]],
            array![[1.0], [1.0]],
        );
        assert_eq!(w.first_non_finite_row(), Some(1));
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&AdditiveModel::Mip).unwrap(), "\"MIP\"");
        let m: AdditiveModel = serde_json::from_str("\"BAM\"").unwrap();
        assert_eq!(m, AdditiveModel::Bam);
    }
}
