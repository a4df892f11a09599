//! Shared "fit pipeline" logic used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> gradient descent -> residuals -> closed-form reference
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::resolve_dataset;
use crate::domain::{Dataset, FitConfig, Params, RecordResidual};
use crate::error::AppError;
use crate::fit::{FitOptions, FitOutcome, fit_plane};
use crate::math::closed_form_plane;
use crate::report::compute_residuals;

/// All computed outputs of a single `planefit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub outcome: FitOutcome,
    pub residuals: Vec<RecordResidual>,
    /// Exact least-squares plane, when the data determines one.
    pub reference: Option<Params>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let dataset = resolve_dataset(config)?;
    run_fit_on(dataset, config)
}

/// Execute the pipeline on an already built dataset.
pub fn run_fit_on(dataset: Dataset, config: &FitConfig) -> Result<RunOutput, AppError> {
    let opts = FitOptions {
        trace_history: config.trace,
    };
    let outcome = fit_plane(&dataset, config.initial, &config.train, &opts)?;
    let residuals = compute_residuals(&dataset, &outcome.params);
    let reference = closed_form_plane(&dataset);

    Ok(RunOutput {
        dataset,
        outcome,
        residuals,
        reference,
    })
}
