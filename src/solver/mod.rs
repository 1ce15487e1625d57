//! LP solver backends.
//!
//! This module provides a unified interface to linear programming solvers
//! through the `LpSolver` trait. The formulation layer builds a
//! `LinearProgram` per DMU and hands it to whichever backend is configured.

mod traits;

#[cfg(feature = "microlp")]
pub mod microlp_backend;

pub use traits::{ConstraintOp, LinearConstraint, LinearProgram, LpFailure, LpSolution, LpSolver};

#[cfg(feature = "microlp")]
pub use microlp_backend::MicroLpSolver;
