//! # additive-dea
//!
//! Weighted additive Data Envelopment Analysis.
//!
//! Every decision-making unit (DMU) is scored by a linear program that
//! maximizes a weighted sum of its input and output slacks against the
//! production possibility set spanned by a reference set of peers. A score of
//! zero means the DMU lies on the frontier.
//!
//! Supported weighting schemes: `Ones`, `MIP`, `Normalized`, `RAM`, `BAM` and
//! `Custom`, under constant or variable returns to scale.
//!
//! ## Features
//!
//! - `microlp` (default) - LP backend built on the pure-Rust `microlp` simplex.
//!   Without it, bring a backend through [`solver::LpSolver`] and call
//!   [`additive::deaadd_with_solver`].
//!
//! ## Example
//!
//! ```ignore
//! use additive_dea::prelude::*;
//! use ndarray::array;
//!
//! let x = array![[5.0, 13.0], [16.0, 12.0], [16.0, 26.0], [17.0, 15.0]];
//! let y = array![12.0, 14.0, 25.0, 26.0];
//!
//! let config = AdditiveConfig::default()
//!     .with_model(AdditiveModel::Mip)
//!     .with_rts(ReturnsToScale::Variable);
//! let model = deaadd(&x, &y, &config)?;
//!
//! for (i, eff) in model.efficiency().iter().enumerate() {
//!     println!("DMU {}: {:.6} peers {:?}", i, eff, model.peers_of(i));
//! }
//! ```

pub mod additive;
pub mod error;
pub mod formulation;
pub mod model;
pub mod solver;
pub mod types;
pub mod utils;
pub mod weights;

pub mod prelude {
    //! Convenient re-exports of commonly used types.
    #[cfg(feature = "microlp")]
    pub use crate::additive::{deaadd, deaadd_with};
    pub use crate::additive::{AdditiveConfig, AdditiveInputs, deaadd_with_solver};
    pub use crate::error::{AdditiveDeaError, Result};
    pub use crate::model::{AdditiveDEAModel, PeerWeights};
    pub use crate::solver::{LpFailure, LpSolver};
    pub use crate::types::{InputData, Orientation, ReturnsToScale};
    pub use crate::weights::{AdditiveModel, WeightMatrices, WeightStrategy};

    #[cfg(feature = "microlp")]
    pub use crate::solver::MicroLpSolver;
}
