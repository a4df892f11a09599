//! Closed-form least squares reference.
//!
//! The gradient-descent result is reported next to the exact minimizer of
//!
//! ```text
//! minimize Σ (target_i - (w0 + w1 x1_i + w2 x2_i))^2
//! ```
//!
//! so a run can be judged against the best plane the data allows. Nothing here
//! feeds back into training.
//!
//! We use SVD so tall design matrices (more rows than columns) are handled
//! without forming the normal equations. Nalgebra's `QR::solve` is intended for
//! square systems and will panic for non-square matrices.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, Params};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Exact least-squares plane for `dataset`.
///
/// Needs at least three records; returns `None` for underdetermined or
/// degenerate (collinear) data.
pub fn closed_form_plane(dataset: &Dataset) -> Option<Params> {
    let n = dataset.len();
    if n < 3 {
        return None;
    }

    let mut x = DMatrix::<f64>::zeros(n, 3);
    let mut y = DVector::<f64>::zeros(n);
    for (i, r) in dataset.records().iter().enumerate() {
        x[(i, 0)] = 1.0;
        x[(i, 1)] = r.x1;
        x[(i, 2)] = r.x2;
        y[i] = r.target;
    }

    // A rank-deficient design has a zero singular value; SVD would still
    // return a minimum-norm answer, which is not a unique plane.
    let sv = x.clone().singular_values();
    let max_sv = sv.max();
    if !(max_sv > 0.0) || sv.min() <= max_sv * 1e-12 {
        return None;
    }

    let beta = solve_least_squares(&x, &y)?;
    Some(Params::new(beta[0], beta[1], beta[2]))
}
