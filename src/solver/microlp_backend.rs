//! microlp backend implementation.
//!
//! Every call builds a fresh `microlp::Problem`, so concurrent solves never
//! share solver state.

use super::traits::{ConstraintOp, LinearProgram, LpFailure, LpSolution, LpSolver};
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

/// Pure-Rust simplex backend built on `microlp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn comparison(op: ConstraintOp) -> ComparisonOp {
    match op {
        ConstraintOp::Eq => ComparisonOp::Eq,
        ConstraintOp::Le => ComparisonOp::Le,
        ConstraintOp::Ge => ComparisonOp::Ge,
    }
}

impl From<microlp::Error> for LpFailure {
    fn from(err: microlp::Error) -> Self {
        match err {
            microlp::Error::Infeasible => LpFailure::Infeasible,
            microlp::Error::Unbounded => LpFailure::Unbounded,
            microlp::Error::InternalError(msg) => LpFailure::Numerical(msg),
        }
    }
}

impl LpSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, lp: &LinearProgram) -> Result<LpSolution, LpFailure> {
        let mut problem = Problem::new(OptimizationDirection::Maximize);
        let vars: Vec<_> = lp
            .objective()
            .iter()
            .map(|&c| problem.add_var(c, (0.0, f64::INFINITY)))
            .collect();

        for constraint in lp.constraints() {
            let mut expr = LinearExpr::empty();
            for &(idx, coeff) in &constraint.terms {
                expr.add(vars[idx], coeff);
            }
            problem.add_constraint(expr, comparison(constraint.op), constraint.rhs);
        }

        let solution = problem.solve()?;
        let objective = solution.objective();
        if !objective.is_finite() {
            return Err(LpFailure::Numerical(format!(
                "non-finite objective value {}",
                objective
            )));
        }
        let x = vars.iter().map(|&v| solution[v]).collect();
        Ok(LpSolution { objective, x })
    }
}
