//! Column statistics and numeric clean-up helpers.
//!
//! The weighting schemes reduce each data column to a statistic (minimum,
//! maximum, range, standard deviation) and turn it into a reciprocal weight.
//! Reciprocals of zero are mapped to zero by `finite_or_zero`.

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use statrs::statistics::Statistics;

/// Column-wise minimum.
pub fn column_min(x: &ArrayView2<f64>) -> Array1<f64> {
    x.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| f64::min(acc, v))
}

/// Column-wise maximum.
pub fn column_max(x: &ArrayView2<f64>) -> Array1<f64> {
    x.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| f64::max(acc, v))
}

/// Column-wise range (max - min).
pub fn column_range(x: &ArrayView2<f64>) -> Array1<f64> {
    column_max(x) - column_min(x)
}

/// Sample standard deviation (n - 1 denominator) of a single column.
///
/// Returns NaN for fewer than two observations.
pub fn sample_std(col: &ArrayView1<f64>) -> f64 {
    col.iter().std_dev()
}

/// Column-wise sample standard deviation.
pub fn column_std(x: &ArrayView2<f64>) -> Array1<f64> {
    Array1::from_iter(x.columns().into_iter().map(|c| sample_std(&c)))
}

/// Replace infinite and NaN values with zero.
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Snap values within `tol` of zero to exactly zero.
pub fn chop(x: f64, tol: f64) -> f64 {
    if x.abs() < tol { 0.0 } else { x }
}
