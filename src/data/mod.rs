//! Training data sources.
//!
//! - the compiled-in table (`builtin`)
//! - seeded synthetic samples and row shuffling (`sample`)

pub mod builtin;
pub mod sample;

pub use builtin::*;
pub use sample::*;

use crate::domain::{DataSource, Dataset, FitConfig};
use crate::error::FitError;

/// Build the dataset a run trains on.
pub fn resolve_dataset(config: &FitConfig) -> Result<Dataset, FitError> {
    let dataset = match config.source {
        DataSource::Builtin => builtin_dataset()?,
        DataSource::Synthetic { count, seed, noise } => generate_sample(count, seed, noise)?,
    };

    match config.shuffle_seed {
        Some(seed) => shuffle_rows(&dataset, seed),
        None => Ok(dataset),
    }
}
