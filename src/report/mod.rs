//! Reporting utilities: residuals, summaries, and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;

use crate::domain::{Dataset, Params, RecordResidual};
use crate::models::predict;

/// Fitted value and residual for every record, in dataset order.
pub fn compute_residuals(dataset: &Dataset, params: &Params) -> Vec<RecordResidual> {
    dataset
        .records()
        .iter()
        .map(|&record| {
            let fitted = predict(params, record.x1, record.x2);
            RecordResidual {
                record,
                fitted,
                residual: fitted - record.target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_residuals_basic() {
        let ds = Dataset::from_columns(&[1.0, 2.0], &[0.0, 1.0], &[3.0, 10.0]).unwrap();
        let residuals = compute_residuals(&ds, &Params::new(1.0, 2.0, 3.0));

        assert_eq!(residuals.len(), 2);
        assert_eq!(residuals[0].fitted, 3.0);
        assert_eq!(residuals[0].residual, 0.0);
        assert_eq!(residuals[1].fitted, 8.0);
        assert_eq!(residuals[1].residual, -2.0);
    }
}
