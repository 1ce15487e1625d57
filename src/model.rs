use crate::error::{AdditiveDeaError, Result};
use crate::types::{Orientation, ReturnsToScale};
use crate::weights::AdditiveModel;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Sparse peer-weight matrix in coordinate (triplet) form.
///
/// Only reference units on the frontier act as peers, so most entries are
/// structurally zero. Triplets are stored sorted by row, then column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerWeights {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl PeerWeights {
    /// Build from one list of `(column, value)` pairs per row.
    pub fn from_rows(ncols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<Self> {
        let nrows = rows.len();
        let mut out = Self {
            nrows,
            ncols,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        };
        for (i, mut row) in rows.into_iter().enumerate() {
            row.sort_by_key(|&(j, _)| j);
            for (j, v) in row {
                if j >= ncols {
                    return Err(AdditiveDeaError::InvalidInput(format!(
                        "peer index {} out of range for {} reference units",
                        j, ncols
                    )));
                }
                if v != 0.0 {
                    out.rows.push(i);
                    out.cols.push(j);
                    out.values.push(v);
                }
            }
        }
        Ok(out)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`
    pub fn dim(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Entry `(i, j)`, zero when not stored.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.row(i)
            .into_iter()
            .find(|&(col, _)| col == j)
            .map_or(0.0, |(_, v)| v)
    }

    /// Stored entries of row `i` as `(column, value)`.
    pub fn row(&self, i: usize) -> Vec<(usize, f64)> {
        let start = self.rows.partition_point(|&r| r < i);
        let end = self.rows.partition_point(|&r| r <= i);
        (start..end).map(|k| (self.cols[k], self.values[k])).collect()
    }

    /// Iterate over `(row, column, value)` triplets.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&i, &j), &v)| (i, j, v))
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Array1<f64> {
        let mut sums = Array1::zeros(self.nrows);
        for (i, _, v) in self.iter() {
            sums[i] += v;
        }
        sums
    }

    /// Expand to a dense `(nrows x ncols)` matrix.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.nrows, self.ncols));
        for (i, j, v) in self.iter() {
            dense[[i, j]] = v;
        }
        dense
    }
}

/// Result of a weighted additive DEA run.
///
/// Built once from the per-DMU optima; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveDEAModel {
    n: usize,
    m: usize,
    s: usize,
    rts: ReturnsToScale,
    orientation: Orientation,
    weights: AdditiveModel,
    dmu_names: Option<Vec<String>>,
    efficiency: Array1<f64>,
    slack_x: Array2<f64>,
    slack_y: Array2<f64>,
    lambda: PeerWeights,
    target_x: Array2<f64>,
    target_y: Array2<f64>,
}

/// Everything needed to assemble an [`AdditiveDEAModel`].
#[derive(Debug, Clone)]
pub struct ModelParts {
    pub rts: ReturnsToScale,
    pub orientation: Orientation,
    pub weights: AdditiveModel,
    pub dmu_names: Option<Vec<String>>,
    pub efficiency: Array1<f64>,
    pub slack_x: Array2<f64>,
    pub slack_y: Array2<f64>,
    pub lambda: PeerWeights,
}

impl AdditiveDEAModel {
    /// Assemble the result, checking every shape against the observed data.
    ///
    /// Targets are the projections `X - sX` and `Y + sY`.
    pub fn new(x: &ArrayView2<f64>, y: &ArrayView2<f64>, parts: ModelParts) -> Result<Self> {
        let (n, m) = x.dim();
        let s = y.ncols();

        if y.nrows() != n {
            return Err(AdditiveDeaError::shape("Y rows", (n, s), y.dim()));
        }
        if parts.efficiency.len() != n {
            return Err(AdditiveDeaError::shape(
                "efficiency",
                (n, 1),
                (parts.efficiency.len(), 1),
            ));
        }
        if parts.slack_x.dim() != (n, m) {
            return Err(AdditiveDeaError::shape("input slacks", (n, m), parts.slack_x.dim()));
        }
        if parts.slack_y.dim() != (n, s) {
            return Err(AdditiveDeaError::shape("output slacks", (n, s), parts.slack_y.dim()));
        }
        if parts.lambda.nrows() != n {
            return Err(AdditiveDeaError::shape(
                "peer weights",
                (n, parts.lambda.ncols()),
                parts.lambda.dim(),
            ));
        }
        if let Some(names) = &parts.dmu_names {
            if names.len() != n {
                return Err(AdditiveDeaError::shape("DMU names", (n, 1), (names.len(), 1)));
            }
        }

        let target_x = x - &parts.slack_x;
        let target_y = y + &parts.slack_y;

        Ok(Self {
            n,
            m,
            s,
            rts: parts.rts,
            orientation: parts.orientation,
            weights: parts.weights,
            dmu_names: parts.dmu_names,
            efficiency: parts.efficiency,
            slack_x: parts.slack_x,
            slack_y: parts.slack_y,
            lambda: parts.lambda,
            target_x,
            target_y,
        })
    }

    /// Number of DMUs.
    pub fn nobs(&self) -> usize {
        self.n
    }

    /// Number of inputs.
    pub fn ninputs(&self) -> usize {
        self.m
    }

    /// Number of outputs.
    pub fn noutputs(&self) -> usize {
        self.s
    }

    /// Number of reference units.
    pub fn nref(&self) -> usize {
        self.lambda.ncols()
    }

    pub fn efficiency(&self) -> ArrayView1<'_, f64> {
        self.efficiency.view()
    }

    /// Input slacks (n x m).
    pub fn slacks_x(&self) -> ArrayView2<'_, f64> {
        self.slack_x.view()
    }

    /// Output slacks (n x s).
    pub fn slacks_y(&self) -> ArrayView2<'_, f64> {
        self.slack_y.view()
    }

    /// Peer weights (n x nref).
    pub fn peers(&self) -> &PeerWeights {
        &self.lambda
    }

    pub fn peers_dense(&self) -> Array2<f64> {
        self.lambda.to_dense()
    }

    /// Peers of DMU `i` as `(reference index, weight)`.
    pub fn peers_of(&self, i: usize) -> Vec<(usize, f64)> {
        self.lambda.row(i)
    }

    /// Input targets `X - sX`.
    pub fn targets_x(&self) -> ArrayView2<'_, f64> {
        self.target_x.view()
    }

    /// Output targets `Y + sY`.
    pub fn targets_y(&self) -> ArrayView2<'_, f64> {
        self.target_y.view()
    }

    pub fn rts(&self) -> ReturnsToScale {
        self.rts
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Weighting scheme used in the objective.
    pub fn weights(&self) -> AdditiveModel {
        self.weights
    }

    pub fn dmu_names(&self) -> Option<&[String]> {
        self.dmu_names.as_deref()
    }

    /// Whether DMU `i` has no slack at all (efficiency exactly zero).
    pub fn is_efficient(&self, i: usize) -> bool {
        self.efficiency[i] == 0.0
    }

    /// Serialize the result to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AdditiveDeaError::SerializationError(e.to_string()))
    }

    /// Save the result to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)
            .map_err(|e| AdditiveDeaError::SerializationError(e.to_string()))
    }

    /// Load a result saved with [`AdditiveDEAModel::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| AdditiveDeaError::SerializationError(e.to_string()))
    }
}
