//! Plane fitting.
//!
//! Responsibilities:
//!
//! - run per-record gradient descent for one set of hyperparameters (`fitter`)
//! - compare several learning rates in parallel (`sweep`)

pub mod fitter;
pub mod sweep;

pub use fitter::*;
pub use sweep::*;
