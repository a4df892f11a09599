//! The compiled-in training table.

use crate::domain::{Dataset, Record};
use crate::error::FitError;

/// `(x1, x2, target)` rows, in training order.
pub const BUILTIN_RECORDS: [(f64, f64, f64); 6] = [
    (1.0, 2.0, 9.0),
    (2.0, 1.0, 8.0),
    (3.0, 6.0, 25.0),
    (4.0, 3.0, 18.0),
    (5.0, -1.0, 8.0),
    (6.0, 0.0, 13.0),
];

pub fn builtin_dataset() -> Result<Dataset, FitError> {
    Dataset::new(
        BUILTIN_RECORDS
            .iter()
            .map(|&(x1, x2, t)| Record::new(x1, x2, t))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Params;
    use crate::models::predict;

    #[test]
    fn builtin_rows_lie_on_a_plane() {
        // The table is noise-free: every row satisfies out = 1 + 2*x1 + 3*x2.
        let ds = builtin_dataset().unwrap();
        let plane = Params::new(1.0, 2.0, 3.0);
        assert_eq!(ds.len(), 6);
        for r in ds.records() {
            assert_eq!(predict(&plane, r.x1, r.x2), r.target);
        }
    }
}
