//! Solver trait definitions.

use thiserror::Error;

/// Relation between the left- and right-hand side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// `lhs == rhs`
    Eq,
    /// `lhs <= rhs`
    Le,
    /// `lhs >= rhs`
    Ge,
}

/// A single linear constraint `sum(coeff * var) op rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// `(variable index, coefficient)` pairs; each variable appears at most once.
    pub terms: Vec<(usize, f64)>,
    /// Comparison operator.
    pub op: ConstraintOp,
    /// Right-hand side.
    pub rhs: f64,
}

/// A maximization problem over non-negative variables.
///
/// ```text
/// max  c'x
/// st   a_k'x (==|<=|>=) b_k   for every constraint k
///      x >= 0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl LinearProgram {
    /// Start a problem maximizing `objective'x`; one variable per coefficient.
    pub fn maximize(objective: Vec<f64>) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint. Terms with a zero coefficient are dropped.
    pub fn add_constraint(
        &mut self,
        terms: impl IntoIterator<Item = (usize, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) {
        let terms = terms.into_iter().filter(|&(_, c)| c != 0.0).collect();
        self.constraints.push(LinearConstraint { terms, op, rhs });
    }

    /// Number of decision variables.
    pub fn n_vars(&self) -> usize {
        self.objective.len()
    }

    /// Objective coefficients.
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }
}

/// Optimal point returned by a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Optimal objective value.
    pub objective: f64,
    /// Optimal variable values, indexed like the objective.
    pub x: Vec<f64>,
}

/// Why a solver did not return an optimum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpFailure {
    /// The constraints cannot be satisfied together.
    #[error("problem is infeasible")]
    Infeasible,
    /// The objective grows without bound.
    #[error("problem is unbounded")]
    Unbounded,
    /// The backend failed for numerical or internal reasons.
    #[error("numerical failure: {0}")]
    Numerical(String),
}

/// An LP backend.
///
/// `solve` receives the whole problem and must not keep state between calls:
/// batches call it concurrently from several threads.
pub trait LpSolver: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    /// Maximize the program and return the optimum.
    fn solve(&self, lp: &LinearProgram) -> Result<LpSolution, LpFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_terms_dropped() {
        let mut lp = LinearProgram::maximize(vec![1.0, 0.0, 2.0]);
        lp.add_constraint([(0, 1.0), (1, 0.0), (2, 3.0)], ConstraintOp::Le, 4.0);
        assert_eq!(lp.n_vars(), 3);
        assert_eq!(lp.constraints().len(), 1);
        assert_eq!(lp.constraints()[0].terms, vec![(0, 1.0), (2, 3.0)]);
        assert_eq!(lp.constraints()[0].op, ConstraintOp::Le);
    }
}
