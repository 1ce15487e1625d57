//! Weighted additive DEA entry points.
//!
//! Every call validates the whole problem first (shapes, scheme, weights),
//! then solves one linear program per DMU. The per-DMU solves are independent
//! and run on the rayon thread pool; results are collected in DMU order.

use crate::error::{AdditiveDeaError, Result};
use crate::formulation::{DmuData, DmuSolution, ReferenceData, ScaleConstraint, solve_dmu};
use crate::model::{AdditiveDEAModel, ModelParts, PeerWeights};
use crate::solver::LpSolver;
use crate::types::{InputData, Orientation, ReturnsToScale};
use crate::weights::{AdditiveModel, WeightMatrices};
use ndarray::{Array1, Array2, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration of an additive DEA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveConfig {
    /// Weighting scheme. Ignored (reported as `Custom`) when weights are supplied.
    pub model: AdditiveModel,
    /// Returns-to-scale regime.
    pub rts: ReturnsToScale,
    /// Which slacks enter the objective.
    pub orientation: Orientation,
    /// Values closer to zero than this are reported as zero.
    pub tolerance: f64,
    /// Solve DMUs in parallel.
    pub parallel: bool,
    /// Size of a dedicated thread pool; `None` uses the global rayon pool.
    pub n_threads: Option<usize>,
}

impl Default for AdditiveConfig {
    fn default() -> Self {
        Self {
            model: AdditiveModel::Ones,
            rts: ReturnsToScale::Variable,
            orientation: Orientation::Graph,
            tolerance: 1e-9,
            parallel: true,
            n_threads: None,
        }
    }
}

impl AdditiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weighting scheme.
    pub fn with_model(mut self, model: AdditiveModel) -> Self {
        self.model = model;
        self
    }

    /// Set the returns-to-scale regime.
    pub fn with_rts(mut self, rts: ReturnsToScale) -> Self {
        self.rts = rts;
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the zero tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable parallel solves.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run the batch in a dedicated pool of `n_threads` workers.
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = Some(n_threads);
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(AdditiveDeaError::InvalidInput(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if self.n_threads == Some(0) {
            return Err(AdditiveDeaError::InvalidInput(
                "n_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Data of an additive DEA run: observations plus optional weights,
/// reference set and DMU names.
#[derive(Debug, Clone)]
pub struct AdditiveInputs<'a> {
    x: InputData<'a>,
    y: InputData<'a>,
    weights: Option<(InputData<'a>, InputData<'a>)>,
    reference: Option<(InputData<'a>, InputData<'a>)>,
    names: Option<Vec<String>>,
}

impl<'a> AdditiveInputs<'a> {
    /// Observed inputs `x` (n x m) and outputs `y` (n x s).
    pub fn new(x: impl Into<InputData<'a>>, y: impl Into<InputData<'a>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            weights: None,
            reference: None,
            names: None,
        }
    }

    /// Use caller-supplied slack weights; the run is reported as `Custom`.
    pub fn with_weights(
        mut self,
        wx: impl Into<InputData<'a>>,
        wy: impl Into<InputData<'a>>,
    ) -> Self {
        self.weights = Some((wx.into(), wy.into()));
        self
    }

    /// Score against `xref`/`yref` instead of the observations themselves.
    pub fn with_reference(
        mut self,
        xref: impl Into<InputData<'a>>,
        yref: impl Into<InputData<'a>>,
    ) -> Self {
        self.reference = Some((xref.into(), yref.into()));
        self
    }

    /// Attach one name per DMU.
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Fully validated problem, ready to be solved.
struct PreparedProblem<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView2<'a, f64>,
    xref: ArrayView2<'a, f64>,
    yref: ArrayView2<'a, f64>,
    weights: WeightMatrices,
    model: AdditiveModel,
}

fn check_not_empty(label: &str, data: &ArrayView2<f64>) -> Result<()> {
    if data.nrows() == 0 || data.ncols() == 0 {
        return Err(AdditiveDeaError::InvalidInput(format!(
            "{} must have at least one row and one column, got {}x{}",
            label,
            data.nrows(),
            data.ncols()
        )));
    }
    Ok(())
}

fn orient_weights(mut weights: WeightMatrices, orientation: Orientation) -> WeightMatrices {
    match orientation {
        Orientation::Graph => {}
        Orientation::Input => weights.wy.fill(0.0),
        Orientation::Output => weights.wx.fill(0.0),
    }
    weights
}

fn prepare<'a>(inputs: &AdditiveInputs<'a>, config: &AdditiveConfig) -> Result<PreparedProblem<'a>> {
    config.validate()?;

    let x = inputs.x.as_matrix();
    let y = inputs.y.as_matrix();
    check_not_empty("X", &x)?;
    check_not_empty("Y", &y)?;
    if x.nrows() != y.nrows() {
        return Err(AdditiveDeaError::shape(
            "number of observations in Y vs X",
            (x.nrows(), y.ncols()),
            y.dim(),
        ));
    }

    let (xref, yref) = match &inputs.reference {
        Some((xr, yr)) => (xr.as_matrix(), yr.as_matrix()),
        None => (x, y),
    };
    check_not_empty("Xref", &xref)?;
    check_not_empty("Yref", &yref)?;
    if xref.nrows() != yref.nrows() {
        return Err(AdditiveDeaError::shape(
            "number of observations in Yref vs Xref",
            (xref.nrows(), yref.ncols()),
            yref.dim(),
        ));
    }
    if xref.ncols() != x.ncols() {
        return Err(AdditiveDeaError::shape(
            "number of inputs in Xref vs X",
            (xref.nrows(), x.ncols()),
            xref.dim(),
        ));
    }
    if yref.ncols() != y.ncols() {
        return Err(AdditiveDeaError::shape(
            "number of outputs in Yref vs Y",
            (yref.nrows(), y.ncols()),
            yref.dim(),
        ));
    }

    if let Some(names) = &inputs.names {
        if names.len() != x.nrows() {
            return Err(AdditiveDeaError::shape(
                "DMU names",
                (x.nrows(), 1),
                (names.len(), 1),
            ));
        }
    }

    let (weights, model) = match &inputs.weights {
        Some((wx, wy)) => {
            if config.model != AdditiveModel::Custom {
                debug!(
                    requested = %config.model,
                    "user weights supplied, running as Custom"
                );
            }
            (
                WeightMatrices::new(wx.to_matrix(), wy.to_matrix()),
                AdditiveModel::Custom,
            )
        }
        None => (config.model.weights(&x, &y)?, config.model),
    };
    weights.check_shapes(x.dim(), y.dim())?;
    let weights = orient_weights(weights, config.orientation);

    if let Some(dmu) = weights.first_non_finite_row() {
        return Err(AdditiveDeaError::NonFiniteWeights { dmu });
    }

    Ok(PreparedProblem {
        x,
        y,
        xref,
        yref,
        weights,
        model,
    })
}

/// Solve the weighted additive model with the default backend.
///
/// # Arguments
///
/// * `x` - Inputs, one row per DMU (a vector is read as a single input).
/// * `y` - Outputs, one row per DMU (a vector is read as a single output).
/// * `config` - Scheme, regime, orientation and numeric settings.
///
/// # Example
///
/// ```ignore
/// use additive_dea::prelude::*;
/// use ndarray::array;
///
/// let x = array![[5.0, 13.0], [16.0, 12.0], [16.0, 26.0]];
/// let y = array![12.0, 14.0, 25.0];
/// let config = AdditiveConfig::default().with_model(AdditiveModel::Mip);
/// let model = deaadd(&x, &y, &config)?;
/// println!("{}", model.efficiency());
/// ```
#[cfg(feature = "microlp")]
pub fn deaadd<'a>(
    x: impl Into<InputData<'a>>,
    y: impl Into<InputData<'a>>,
    config: &AdditiveConfig,
) -> Result<AdditiveDEAModel> {
    deaadd_with(&AdditiveInputs::new(x, y), config)
}

/// Solve a fully specified problem with the default backend.
#[cfg(feature = "microlp")]
pub fn deaadd_with(inputs: &AdditiveInputs, config: &AdditiveConfig) -> Result<AdditiveDEAModel> {
    deaadd_with_solver(inputs, config, &crate::solver::MicroLpSolver)
}

/// Solve a fully specified problem with an explicit LP backend.
///
/// No solver call happens unless every precondition holds.
pub fn deaadd_with_solver<S: LpSolver + ?Sized>(
    inputs: &AdditiveInputs,
    config: &AdditiveConfig,
    solver: &S,
) -> Result<AdditiveDEAModel> {
    let problem = prepare(inputs, config)?;
    let scale = ScaleConstraint::new(config.rts, problem.model);
    let reference = ReferenceData::new(&problem.x, &problem.y, problem.xref, problem.yref, scale);
    let n = problem.x.nrows();

    info!(
        dmus = n,
        reference_units = reference.nref(),
        weights = %problem.model,
        rts = %config.rts,
        orientation = %config.orientation,
        solver = solver.name(),
        "solving weighted additive DEA"
    );

    let solve_one = |i: usize| -> Result<DmuSolution> {
        let (wx, wy) = problem.weights.row(i);
        let dmu = DmuData {
            x: problem.x.row(i),
            y: problem.y.row(i),
            wx,
            wy,
        };
        solve_dmu(i, &dmu, &reference, solver, config.tolerance)
    };

    let solutions: Vec<DmuSolution> = if !config.parallel {
        (0..n).map(solve_one).collect::<Result<Vec<_>>>()?
    } else if let Some(threads) = config.n_threads {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| (0..n).into_par_iter().map(solve_one).collect::<Result<Vec<_>>>())?
    } else {
        (0..n).into_par_iter().map(solve_one).collect::<Result<Vec<_>>>()?
    };

    let model = assemble(&problem, config, inputs.names.clone(), solutions)?;
    info!(
        efficient = (0..n).filter(|&i| model.is_efficient(i)).count(),
        "weighted additive DEA finished"
    );
    Ok(model)
}

fn assemble(
    problem: &PreparedProblem,
    config: &AdditiveConfig,
    dmu_names: Option<Vec<String>>,
    solutions: Vec<DmuSolution>,
) -> Result<AdditiveDEAModel> {
    let (n, m) = problem.x.dim();
    let s = problem.y.ncols();
    let mut efficiency = Array1::zeros(n);
    let mut slack_x = Array2::zeros((n, m));
    let mut slack_y = Array2::zeros((n, s));
    let mut peers = Vec::with_capacity(n);

    for (i, sol) in solutions.into_iter().enumerate() {
        efficiency[i] = sol.efficiency;
        slack_x.row_mut(i).assign(&sol.slack_x);
        slack_y.row_mut(i).assign(&sol.slack_y);
        peers.push(sol.lambda);
    }

    let parts = ModelParts {
        rts: config.rts,
        orientation: config.orientation,
        weights: problem.model,
        dmu_names,
        efficiency,
        slack_x,
        slack_y,
        lambda: PeerWeights::from_rows(problem.xref.nrows(), peers)?,
    };
    AdditiveDEAModel::new(&problem.x, &problem.y, parts)
}
