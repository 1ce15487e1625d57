//! Weighting schemes for the additive objective.
//!
//! Each scheme maps the observation set `(X, Y)` to a pair of weight matrices
//! `(wX, wY)` of the same shapes. The weight of a slack in the objective of
//! DMU `i` is read from row `i`.

pub mod base;
mod bam;
mod mip;
mod normalized;
mod ones;
mod ram;

pub use base::{AdditiveModel, WeightMatrices, WeightStrategy};
pub use bam::Bam;
pub use mip::Mip;
pub use normalized::Normalized;
pub use ones::Ones;
pub use ram::Ram;
