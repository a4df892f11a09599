//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - printed as a JSON report
//! - handed to any renderer without exposing fitter internals

use serde::Serialize;

use crate::error::FitError;

/// One observation: two features and the observed target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    pub x1: f64,
    pub x2: f64,
    pub target: f64,
}

impl Record {
    pub fn new(x1: f64, x2: f64, target: f64) -> Self {
        Self { x1, x2, target }
    }
}

/// Ordered, non-empty set of records.
///
/// The order is the iteration order of every epoch, so two datasets with the
/// same records in a different order are *not* interchangeable for training.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Self, FitError> {
        if records.is_empty() {
            return Err(FitError::InvalidInput("dataset has no records".to_string()));
        }
        Ok(Self { records })
    }

    /// Build a dataset from three parallel columns.
    pub fn from_columns(x1: &[f64], x2: &[f64], target: &[f64]) -> Result<Self, FitError> {
        if x1.len() != x2.len() || x1.len() != target.len() {
            return Err(FitError::InvalidInput(format!(
                "column lengths differ: x1={}, x2={}, target={}",
                x1.len(),
                x2.len(),
                target.len()
            )));
        }
        let records = x1
            .iter()
            .zip(x2)
            .zip(target)
            .map(|((&a, &b), &t)| Record::new(a, b, t))
            .collect();
        Self::new(records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn x1(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x1).collect()
    }

    pub fn x2(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x2).collect()
    }

    pub fn targets(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.target).collect()
    }

    /// Same records, visited in `order`.
    ///
    /// `order` must be a permutation of `0..len`.
    pub fn reordered(&self, order: &[usize]) -> Result<Self, FitError> {
        let mut seen = vec![false; self.len()];
        for &i in order {
            if i >= self.len() || seen[i] {
                return Err(FitError::InvalidInput(format!(
                    "row order is not a permutation of 0..{}",
                    self.len()
                )));
            }
            seen[i] = true;
        }
        if order.len() != self.len() {
            return Err(FitError::InvalidInput(format!(
                "row order has {} entries, dataset has {}",
                order.len(),
                self.len()
            )));
        }
        Ok(Self {
            records: order.iter().map(|&i| self.records[i]).collect(),
        })
    }

    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            n_records: self.len(),
            x1_min: f64::INFINITY,
            x1_max: f64::NEG_INFINITY,
            x2_min: f64::INFINITY,
            x2_max: f64::NEG_INFINITY,
            target_min: f64::INFINITY,
            target_max: f64::NEG_INFINITY,
        };
        for r in &self.records {
            stats.x1_min = stats.x1_min.min(r.x1);
            stats.x1_max = stats.x1_max.max(r.x1);
            stats.x2_min = stats.x2_min.min(r.x2);
            stats.x2_max = stats.x2_max.max(r.x2);
            stats.target_min = stats.target_min.min(r.target);
            stats.target_max = stats.target_max.max(r.target);
        }
        stats
    }
}

/// Basic ranges of a dataset (for summaries and plot bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetStats {
    pub n_records: usize,
    pub x1_min: f64,
    pub x1_max: f64,
    pub x2_min: f64,
    pub x2_max: f64,
    pub target_min: f64,
    pub target_max: f64,
}

/// Plane parameters: `out = w0 + w1*x1 + w2*x2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Params {
    pub w0: f64,
    pub w1: f64,
    pub w2: f64,
}

impl Params {
    pub const fn new(w0: f64, w1: f64, w2: f64) -> Self {
        Self { w0, w1, w2 }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.w0, self.w1, self.w2]
    }

    pub fn is_finite(&self) -> bool {
        self.w0.is_finite() && self.w1.is_finite() && self.w2.is_finite()
    }
}

/// Starting guess used when nothing else is configured.
pub const DEFAULT_INITIAL_PARAMS: Params = Params::new(2.0, 4.0, 6.0);
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_EPOCHS: usize = 4000;

/// Hyperparameters, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), FitError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(FitError::InvalidInput(format!(
                "learning rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

/// Where the training records come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataSource {
    /// The compiled-in six-row table.
    Builtin,
    /// Noisy samples drawn around a known plane.
    Synthetic { count: usize, seed: u64, noise: f64 },
}

/// Fitted value and residual for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordResidual {
    pub record: Record,
    pub fitted: f64,
    /// `fitted - target`, same sign convention as the training error.
    pub residual: f64,
}

/// Fully resolved run configuration (CLI flags + env + defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: DataSource,
    pub shuffle_seed: Option<u64>,
    pub initial: Params,
    pub train: TrainConfig,
    /// Record the per-epoch SSE history.
    pub trace: bool,
    pub summary: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub json: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Builtin,
            shuffle_seed: None,
            initial: DEFAULT_INITIAL_PARAMS,
            train: TrainConfig::default(),
            trace: false,
            summary: false,
            plot: false,
            plot_width: 60,
            plot_height: 24,
            json: false,
        }
    }
}
