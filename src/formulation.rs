//! Per-DMU linear program of the weighted additive model.
//!
//! Variables are laid out as `[sX (m) | sY (s) | lambda (nref)]`:
//!
//! ```text
//! max  wX_i'sX + wY_i'sY
//! st   Xref'lambda + sX == x_i
//!      Yref'lambda - sY == y_i
//!      sum(lambda) == 1                          (VRS)
//!      Xref'lambda >= min(X), Yref'lambda <= max(Y)   (CRS with BAM)
//!      sX, sY, lambda >= 0
//! ```

use crate::error::{AdditiveDeaError, Result};
use crate::solver::{ConstraintOp, LinearProgram, LpFailure, LpSolution, LpSolver};
use crate::types::ReturnsToScale;
use crate::utils::{chop, column_max, column_min};
use crate::weights::AdditiveModel;
use ndarray::{Array1, ArrayView1, ArrayView2};
use tracing::{debug, warn};

/// Extra constraint on the peer weights implied by the regime and scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleConstraint {
    /// Conic combination of peers (CRS).
    None,
    /// Convex combination of peers (VRS).
    Convexity,
    /// CRS with the composite unit kept inside the observed bounding box (BAM).
    BoundingBox,
}

impl ScaleConstraint {
    pub fn new(rts: ReturnsToScale, model: AdditiveModel) -> Self {
        match (rts, model) {
            (ReturnsToScale::Variable, _) => ScaleConstraint::Convexity,
            (ReturnsToScale::Constant, AdditiveModel::Bam) => ScaleConstraint::BoundingBox,
            (ReturnsToScale::Constant, _) => ScaleConstraint::None,
        }
    }
}

/// Read-only data shared by every per-DMU problem of a batch.
#[derive(Debug, Clone)]
pub struct ReferenceData<'a> {
    xref: ArrayView2<'a, f64>,
    yref: ArrayView2<'a, f64>,
    /// Column minima of the observed inputs.
    min_x: Array1<f64>,
    /// Column maxima of the observed outputs.
    max_y: Array1<f64>,
    scale: ScaleConstraint,
}

impl<'a> ReferenceData<'a> {
    /// Bundle the reference set with the observed bounds of `x` and `y`.
    pub fn new(
        x: &ArrayView2<f64>,
        y: &ArrayView2<f64>,
        xref: ArrayView2<'a, f64>,
        yref: ArrayView2<'a, f64>,
        scale: ScaleConstraint,
    ) -> Self {
        Self {
            xref,
            yref,
            min_x: column_min(x),
            max_y: column_max(y),
            scale,
        }
    }

    /// Number of reference units.
    pub fn nref(&self) -> usize {
        self.xref.nrows()
    }

    pub fn ninputs(&self) -> usize {
        self.xref.ncols()
    }

    pub fn noutputs(&self) -> usize {
        self.yref.ncols()
    }

    pub fn scale(&self) -> ScaleConstraint {
        self.scale
    }
}

/// Observation and objective weights of a single DMU.
#[derive(Debug, Clone, Copy)]
pub struct DmuData<'a> {
    pub x: ArrayView1<'a, f64>,
    pub y: ArrayView1<'a, f64>,
    pub wx: ArrayView1<'a, f64>,
    pub wy: ArrayView1<'a, f64>,
}

/// Optimum of one DMU, already cleaned of solver noise.
#[derive(Debug, Clone, PartialEq)]
pub struct DmuSolution {
    pub efficiency: f64,
    pub slack_x: Array1<f64>,
    pub slack_y: Array1<f64>,
    /// Non-zero peer weights as `(reference index, lambda)`.
    pub lambda: Vec<(usize, f64)>,
}

/// Build the linear program of one DMU.
pub fn build_program(dmu: &DmuData, reference: &ReferenceData) -> LinearProgram {
    let m = reference.ninputs();
    let s = reference.noutputs();
    let nref = reference.nref();
    let lambda = |k: usize| m + s + k;

    let objective: Vec<f64> = dmu
        .wx
        .iter()
        .chain(dmu.wy.iter())
        .copied()
        .chain(std::iter::repeat_n(0.0, nref))
        .collect();
    let mut lp = LinearProgram::maximize(objective);

    for j in 0..m {
        let col = reference.xref.column(j);
        let terms = col.iter().enumerate().map(|(k, &v)| (lambda(k), v));
        lp.add_constraint(
            terms.chain(std::iter::once((j, 1.0))),
            ConstraintOp::Eq,
            dmu.x[j],
        );
    }

    for j in 0..s {
        let col = reference.yref.column(j);
        let terms = col.iter().enumerate().map(|(k, &v)| (lambda(k), v));
        lp.add_constraint(
            terms.chain(std::iter::once((m + j, -1.0))),
            ConstraintOp::Eq,
            dmu.y[j],
        );
    }

    match reference.scale {
        ScaleConstraint::None => {}
        ScaleConstraint::Convexity => {
            lp.add_constraint((0..nref).map(|k| (lambda(k), 1.0)), ConstraintOp::Eq, 1.0);
        }
        ScaleConstraint::BoundingBox => {
            for j in 0..m {
                let col = reference.xref.column(j);
                lp.add_constraint(
                    col.iter().enumerate().map(|(k, &v)| (lambda(k), v)),
                    ConstraintOp::Ge,
                    reference.min_x[j],
                );
            }
            for j in 0..s {
                let col = reference.yref.column(j);
                lp.add_constraint(
                    col.iter().enumerate().map(|(k, &v)| (lambda(k), v)),
                    ConstraintOp::Le,
                    reference.max_y[j],
                );
            }
        }
    }

    lp
}

/// Split a solver optimum into efficiency, slacks and peer weights.
///
/// Values within `tol` of zero are reported as exactly zero and slacks are
/// clamped at zero. The efficiency is recomputed as `wX'sX + wY'sY` from the
/// cleaned slacks, so it is never negative and agrees with them.
pub fn extract_solution(solution: &LpSolution, dmu: &DmuData, tol: f64) -> DmuSolution {
    let m = dmu.wx.len();
    let s = dmu.wy.len();
    let x = &solution.x;
    let slack = |v: f64| chop(v, tol).max(0.0);
    let slack_x = Array1::from_iter(x[..m].iter().map(|&v| slack(v)));
    let slack_y = Array1::from_iter(x[m..m + s].iter().map(|&v| slack(v)));
    let efficiency = chop(dmu.wx.dot(&slack_x) + dmu.wy.dot(&slack_y), tol);
    DmuSolution {
        efficiency,
        slack_x,
        slack_y,
        lambda: x[m + s..]
            .iter()
            .enumerate()
            .filter_map(|(k, &v)| {
                let v = chop(v, tol);
                (v != 0.0).then_some((k, v))
            })
            .collect(),
    }
}

/// Formulate, solve and extract one DMU.
pub fn solve_dmu<S: LpSolver + ?Sized>(
    index: usize,
    dmu: &DmuData,
    reference: &ReferenceData,
    solver: &S,
    tol: f64,
) -> Result<DmuSolution> {
    let lp = build_program(dmu, reference);
    let solution = solver.solve(&lp).map_err(|reason| {
        warn!(dmu = index, solver = solver.name(), %reason, "LP did not reach an optimum");
        AdditiveDeaError::SolveFailed { dmu: index, reason }
    })?;
    if solution.x.len() != lp.n_vars() {
        let reason = LpFailure::Numerical(format!(
            "solver returned {} values for {} variables",
            solution.x.len(),
            lp.n_vars()
        ));
        warn!(dmu = index, solver = solver.name(), %reason, "malformed LP solution");
        return Err(AdditiveDeaError::SolveFailed { dmu: index, reason });
    }
    let result = extract_solution(&solution, dmu, tol);
    debug!(
        dmu = index,
        efficiency = result.efficiency,
        peers = result.lambda.len(),
        "DMU solved"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn reference<'a>(
        x: &'a ndarray::Array2<f64>,
        y: &'a ndarray::Array2<f64>,
        scale: ScaleConstraint,
    ) -> ReferenceData<'a> {
        ReferenceData::new(&x.view(), &y.view(), x.view(), y.view(), scale)
    }

    #[test]
    fn test_scale_constraint_selection() {
        use AdditiveModel::*;
        assert_eq!(
            ScaleConstraint::new(ReturnsToScale::Variable, Bam),
            ScaleConstraint::Convexity
        );
        assert_eq!(
            ScaleConstraint::new(ReturnsToScale::Constant, Bam),
            ScaleConstraint::BoundingBox
        );
        assert_eq!(
            ScaleConstraint::new(ReturnsToScale::Constant, Ram),
            ScaleConstraint::None
        );
    }

    #[test]
    fn test_program_layout_vrs() {
        let x = array![[5.0, 13.0], [16.0, 12.0], [16.0, 26.0]];
        let y = array![[12.0], [14.0], [25.0]];
        let wx = array![1.0, 2.0];
        let wy = array![3.0];
        let r = reference(&x, &y, ScaleConstraint::Convexity);
        let dmu = DmuData {
            x: x.row(1),
            y: y.row(1),
            wx: wx.view(),
            wy: wy.view(),
        };
        let lp = build_program(&dmu, &r);

        assert_eq!(lp.n_vars(), 2 + 1 + 3);
        assert_eq!(lp.objective(), &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        assert_eq!(lp.constraints().len(), 2 + 1 + 1);

        let input0 = &lp.constraints()[0];
        assert_eq!(input0.op, ConstraintOp::Eq);
        assert_eq!(input0.rhs, 16.0);
        assert_eq!(input0.terms, vec![(3, 5.0), (4, 16.0), (5, 16.0), (0, 1.0)]);

        let output0 = &lp.constraints()[2];
        assert_eq!(output0.rhs, 14.0);
        assert_eq!(output0.terms.last(), Some(&(2, -1.0)));

        let convexity = &lp.constraints()[3];
        assert_eq!(convexity.terms, vec![(3, 1.0), (4, 1.0), (5, 1.0)]);
        assert_eq!(convexity.rhs, 1.0);
    }

    #[test]
    fn test_program_crs_has_no_scale_row() {
        let x = array![[5.0], [16.0]];
        let y = array![[12.0], [14.0]];
        let w = array![1.0];
        let r = reference(&x, &y, ScaleConstraint::None);
        let dmu = DmuData {
            x: x.row(0),
            y: y.row(0),
            wx: w.view(),
            wy: w.view(),
        };
        assert_eq!(build_program(&dmu, &r).constraints().len(), 2);
    }

    #[test]
    fn test_program_bam_bounding_box() {
        let x = array![[5.0, 13.0], [16.0, 12.0]];
        let y = array![[12.0], [14.0]];
        let w = array![1.0, 1.0];
        let wy = array![1.0];
        let r = reference(&x, &y, ScaleConstraint::BoundingBox);
        let dmu = DmuData {
            x: x.row(0),
            y: y.row(0),
            wx: w.view(),
            wy: wy.view(),
        };
        let lp = build_program(&dmu, &r);
        let rows = lp.constraints();
        assert_eq!(rows.len(), 3 + 3);
        assert_eq!((rows[3].op, rows[3].rhs), (ConstraintOp::Ge, 5.0));
        assert_eq!((rows[4].op, rows[4].rhs), (ConstraintOp::Ge, 12.0));
        assert_eq!((rows[5].op, rows[5].rhs), (ConstraintOp::Le, 14.0));
    }

    #[test]
    fn test_extract_chops_noise() {
        let wx = array![1.0, 1.0];
        let wy = array![1.0];
        let obs = array![0.0, 0.0];
        let dmu = DmuData {
            x: obs.view(),
            y: wy.view(),
            wx: wx.view(),
            wy: wy.view(),
        };
        let solution = LpSolution {
            objective: 2.0,
            x: vec![1e-13, 2.0, 0.0, 1.0 - 1e-15, 3e-12],
        };
        let out = extract_solution(&solution, &dmu, 1e-9);
        assert_eq!(out.efficiency, 2.0);
        assert_eq!(out.slack_x, array![0.0, 2.0]);
        assert_eq!(out.slack_y, array![0.0]);
        assert_eq!(out.lambda, vec![(0, 1.0 - 1e-15)]);
    }

    #[test]
    fn test_extract_efficiency_follows_slacks() {
        let wx = array![0.5, 2.0];
        let wy = array![3.0];
        let obs = array![0.0, 0.0];
        let dmu = DmuData {
            x: obs.view(),
            y: wy.view(),
            wx: wx.view(),
            wy: wy.view(),
        };
        // frontier unit whose objective carries noise above the tolerance
        let solution = LpSolution {
            objective: -1.05e-9,
            x: vec![0.0, -2e-9, 0.0, 1.0 + 1.2e-11],
        };
        let out = extract_solution(&solution, &dmu, 1e-9);
        assert_eq!(out.efficiency, 0.0);
        assert_eq!(out.slack_x, array![0.0, 0.0]);

        let solution = LpSolution {
            objective: 6.25,
            x: vec![4.0, 1.0, 0.75, 1.0],
        };
        let out = extract_solution(&solution, &dmu, 1e-9);
        assert_eq!(out.efficiency, 0.5 * 4.0 + 2.0 * 1.0 + 3.0 * 0.75);
    }

    struct Failing;

    impl LpSolver for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn solve(&self, _lp: &LinearProgram) -> std::result::Result<LpSolution, LpFailure> {
            Err(LpFailure::Infeasible)
        }
    }

    #[test]
    fn test_solver_failure_carries_dmu() {
        let x = array![[5.0], [16.0]];
        let y = array![[12.0], [14.0]];
        let w = array![1.0];
        let r = reference(&x, &y, ScaleConstraint::Convexity);
        let dmu = DmuData {
            x: x.row(1),
            y: y.row(1),
            wx: w.view(),
            wy: w.view(),
        };
        let err = solve_dmu(1, &dmu, &r, &Failing, 1e-9).unwrap_err();
        assert_eq!(
            err,
            AdditiveDeaError::SolveFailed {
                dmu: 1,
                reason: LpFailure::Infeasible
            }
        );
    }

    struct Truncating;

    impl LpSolver for Truncating {
        fn name(&self) -> &'static str {
            "truncating"
        }

        fn solve(&self, lp: &LinearProgram) -> std::result::Result<LpSolution, LpFailure> {
            Ok(LpSolution {
                objective: 0.0,
                x: vec![0.0; lp.n_vars() - 1],
            })
        }
    }

    #[test]
    fn test_short_solution_is_rejected() {
        let x = array![[5.0], [16.0]];
        let y = array![[12.0], [14.0]];
        let w = array![1.0];
        let r = reference(&x, &y, ScaleConstraint::Convexity);
        let dmu = DmuData {
            x: x.row(0),
            y: y.row(0),
            wx: w.view(),
            wy: w.view(),
        };
        let err = solve_dmu(0, &dmu, &r, &Truncating, 1e-9).unwrap_err();
        assert!(matches!(
            err,
            AdditiveDeaError::SolveFailed {
                dmu: 0,
                reason: LpFailure::Numerical(_)
            }
        ));
    }
}
