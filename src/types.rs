//! Core data types: input shapes, returns to scale and orientation.

use crate::error::{AdditiveDeaError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enum to represent the shapes a data block can be supplied in.
///
/// A single input or output measure is naturally a vector; several measures
/// form a matrix with one row per DMU. Both are accepted wherever data is
/// expected and normalized to a matrix before any computation.
#[derive(Debug, Clone, Copy)]
pub enum InputData<'a> {
    /// A single measure, one value per DMU.
    Vector(ArrayView1<'a, f64>),
    /// Several measures, one row per DMU.
    Matrix(ArrayView2<'a, f64>),
}

impl<'a> InputData<'a> {
    /// Number of rows (DMUs).
    pub fn nrows(&self) -> usize {
        match self {
            InputData::Vector(v) => v.len(),
            InputData::Matrix(m) => m.nrows(),
        }
    }

    /// Number of columns (measures).
    pub fn ncols(&self) -> usize {
        match self {
            InputData::Vector(_) => 1,
            InputData::Matrix(m) => m.ncols(),
        }
    }

    /// Borrow the data as an `(n x k)` matrix view. A vector becomes `(n x 1)`.
    pub fn as_matrix(&self) -> ArrayView2<'a, f64> {
        match *self {
            InputData::Vector(v) => v.insert_axis(Axis(1)),
            InputData::Matrix(m) => m,
        }
    }

    /// Copy the data into an owned `(n x k)` matrix.
    pub fn to_matrix(&self) -> Array2<f64> {
        self.as_matrix().to_owned()
    }
}

impl<'a> From<ArrayView1<'a, f64>> for InputData<'a> {
    fn from(v: ArrayView1<'a, f64>) -> Self {
        InputData::Vector(v)
    }
}

impl<'a> From<ArrayView2<'a, f64>> for InputData<'a> {
    fn from(m: ArrayView2<'a, f64>) -> Self {
        InputData::Matrix(m)
    }
}

impl<'a> From<&'a Array1<f64>> for InputData<'a> {
    fn from(v: &'a Array1<f64>) -> Self {
        InputData::Vector(v.view())
    }
}

impl<'a> From<&'a Array2<f64>> for InputData<'a> {
    fn from(m: &'a Array2<f64>) -> Self {
        InputData::Matrix(m.view())
    }
}

/// Returns-to-scale regime of the production possibility set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReturnsToScale {
    /// Constant returns to scale (no convexity constraint).
    Constant,
    /// Variable returns to scale (peer weights sum to one).
    #[default]
    Variable,
}

impl ReturnsToScale {
    /// Short name used in reports ("CRS" / "VRS").
    pub fn name(&self) -> &'static str {
        match self {
            ReturnsToScale::Constant => "CRS",
            ReturnsToScale::Variable => "VRS",
        }
    }
}

impl fmt::Display for ReturnsToScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ReturnsToScale {
    type Err = AdditiveDeaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crs" | "constant" => Ok(ReturnsToScale::Constant),
            "vrs" | "variable" => Ok(ReturnsToScale::Variable),
            _ => Err(AdditiveDeaError::InvalidReturnsToScale(format!(
                "`{}` (expected CRS or VRS)",
                s
            ))),
        }
    }
}

/// Which slacks enter the objective of the additive model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Input and output slacks.
    #[default]
    Graph,
    /// Input slacks only.
    Input,
    /// Output slacks only.
    Output,
}

impl Orientation {
    /// Get the string name of the orientation.
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Graph => "Graph",
            Orientation::Input => "Input",
            Orientation::Output => "Output",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Orientation {
    type Err = AdditiveDeaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graph" => Ok(Orientation::Graph),
            "input" => Ok(Orientation::Input),
            "output" => Ok(Orientation::Output),
            _ => Err(AdditiveDeaError::InvalidOrientation(format!(
                "`{}` (expected Graph, Input or Output)",
                s
            ))),
        }
    }
}
