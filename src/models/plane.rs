//! Plane model evaluation and the per-record update rule.
//!
//! The fitter relies on two primitive operations:
//! - predict `out` for one record given the current params
//! - apply one gradient step given the signed error of that record
//!
//! Both are pure so they can be tested without running the training loop.

use crate::domain::{Dataset, Params};

/// `out = w0 + w1*x1 + w2*x2`.
pub fn predict(params: &Params, x1: f64, x2: f64) -> f64 {
    params.w0 + params.w1 * x1 + params.w2 * x2
}

/// One gradient step for a single record.
///
/// `error` is the raw residual `predict - target`, computed once before any
/// weight changes. It is deliberately not normalized by the record count or
/// scaled by two.
pub fn update(params: &Params, error: f64, learning_rate: f64, x1: f64, x2: f64) -> Params {
    Params {
        w0: params.w0 - learning_rate * error,
        w1: params.w1 - learning_rate * error * x1,
        w2: params.w2 - learning_rate * error * x2,
    }
}

/// Sum of squared residuals of `params` over the whole dataset.
pub fn sum_squared_residuals(params: &Params, dataset: &Dataset) -> f64 {
    dataset
        .records()
        .iter()
        .map(|r| {
            let e = predict(params, r.x1, r.x2) - r.target;
            e * e
        })
        .sum()
}
