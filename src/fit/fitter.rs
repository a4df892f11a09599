//! Per-record stochastic gradient descent for the plane model.
//!
//! Given:
//! - a dataset of `(x1, x2, target)` records
//! - initial params `(w0, w1, w2)`
//! - a learning rate and an epoch count
//!
//! we visit every record in dataset order, once per epoch, and apply
//! [`crate::models::update`] with that record's raw residual. There is no
//! convergence check: the loop always performs `epochs * N` update steps.

use log::{debug, info, trace};
use serde::Serialize;

use crate::domain::{Dataset, Params, TrainConfig};
use crate::error::FitError;
use crate::models::{predict, sum_squared_residuals, update};

/// Options that change what the fitter records, never the parameter trajectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitOptions {
    /// Record the dataset SSE after every epoch.
    pub trace_history: bool,
}

/// Result of a complete training run.
#[derive(Debug, Clone, Serialize)]
pub struct FitOutcome {
    pub initial: Params,
    pub params: Params,
    pub epochs: usize,
    pub steps: usize,
    pub sse_initial: f64,
    pub sse_final: f64,
    /// `history[k]` is the SSE after epoch `k + 1`. Empty unless tracing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<f64>,
}

impl FitOutcome {
    pub fn rmse(&self, n: usize) -> f64 {
        (self.sse_final / n as f64).sqrt()
    }
}

/// Training state: the dataset, the current params and the step size.
pub struct Fitter<'a> {
    dataset: &'a Dataset,
    params: Params,
    learning_rate: f64,
    steps: usize,
}

impl<'a> Fitter<'a> {
    pub fn new(dataset: &'a Dataset, initial: Params, learning_rate: f64) -> Result<Self, FitError> {
        TrainConfig { learning_rate, epochs: 0 }.validate()?;
        Ok(Self {
            dataset,
            params: initial,
            learning_rate,
            steps: 0,
        })
    }

    pub fn params(&self) -> Params {
        self.params
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// One pass over every record, in dataset order.
    pub fn run_epoch(&mut self) {
        for r in self.dataset.records() {
            let error = predict(&self.params, r.x1, r.x2) - r.target;
            self.params = update(&self.params, error, self.learning_rate, r.x1, r.x2);
            self.steps += 1;
        }
    }
}

/// Train from `initial` and return the final params plus diagnostics.
pub fn fit_plane(
    dataset: &Dataset,
    initial: Params,
    train: &TrainConfig,
    opts: &FitOptions,
) -> Result<FitOutcome, FitError> {
    let mut fitter = Fitter::new(dataset, initial, train.learning_rate)?;

    let sse_initial = sum_squared_residuals(&initial, dataset);
    info!(
        "fitting plane: n={} lr={} epochs={} sse0={sse_initial:.6}",
        dataset.len(),
        train.learning_rate,
        train.epochs
    );

    let log_every = (train.epochs / 10).max(1);
    let mut history = Vec::with_capacity(if opts.trace_history { train.epochs } else { 0 });

    for epoch in 1..=train.epochs {
        fitter.run_epoch();

        if opts.trace_history {
            history.push(sum_squared_residuals(&fitter.params(), dataset));
        }
        if epoch % log_every == 0 && log::log_enabled!(log::Level::Debug) {
            let p = fitter.params();
            debug!(
                "epoch {epoch}/{}: w0={} w1={} w2={} sse={:.6e}",
                train.epochs,
                p.w0,
                p.w1,
                p.w2,
                sum_squared_residuals(&p, dataset)
            );
        } else {
            trace!("epoch {epoch} done");
        }
    }

    let params = fitter.params();
    let sse_final = sum_squared_residuals(&params, dataset);
    if params.is_finite() {
        info!("fit finished: steps={} sse={sse_final:.6e}", fitter.steps());
    } else {
        info!("fit finished with non-finite params after {} steps", fitter.steps());
    }

    Ok(FitOutcome {
        initial,
        params,
        epochs: train.epochs,
        steps: fitter.steps(),
        sse_initial,
        sse_final,
        history,
    })
}
