//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - training data (`Record`, `Dataset`)
//! - the plane parameters and hyperparameters (`Params`, `TrainConfig`)
//! - resolved run configuration (`FitConfig`, `DataSource`)

pub mod types;

pub use types::*;
