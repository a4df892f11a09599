//! Visualization of a fitted plane.
//!
//! Renderers only read the final params and the original dataset; nothing
//! flows back into fitting.

pub mod ascii;

pub use ascii::*;

use crate::domain::{Dataset, Params};
use crate::error::AppError;
use crate::models::predict;

/// A sink for the fitted plane and the data it was fitted on.
pub trait Renderer {
    fn render(&mut self, params: &Params, dataset: &Dataset) -> Result<(), AppError>;
}

/// Predicted values over the cross product of the observed feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    pub x1: Vec<f64>,
    pub x2: Vec<f64>,
    /// `out[j][i] = predict(params, x1[i], x2[j])`.
    pub out: Vec<Vec<f64>>,
}

impl SurfaceGrid {
    /// Wireframe polylines as `[x1, x2, out]`: one per x2 value (varying x1),
    /// then one per x1 value (varying x2).
    pub fn wires(&self) -> Vec<Vec<[f64; 3]>> {
        let mut lines = Vec::with_capacity(self.x1.len() + self.x2.len());
        for (j, &b) in self.x2.iter().enumerate() {
            lines.push(self.x1.iter().enumerate().map(|(i, &a)| [a, b, self.out[j][i]]).collect());
        }
        for (i, &a) in self.x1.iter().enumerate() {
            lines.push(self.x2.iter().enumerate().map(|(j, &b)| [a, b, self.out[j][i]]).collect());
        }
        lines
    }
}

/// Grid over the observed x1/x2 values.
///
/// Each axis is sorted and de-duplicated so consecutive grid points form
/// straight wireframe segments.
pub fn surface_grid(params: &Params, dataset: &Dataset) -> SurfaceGrid {
    let (x1, x2) = wire_axes(dataset);
    let out = x2
        .iter()
        .map(|&b| x1.iter().map(|&a| predict(params, a, b)).collect())
        .collect();
    SurfaceGrid { x1, x2, out }
}

/// Sorted, de-duplicated feature values used for wireframe lines.
fn wire_axes(dataset: &Dataset) -> (Vec<f64>, Vec<f64>) {
    (sorted_unique(dataset.x1()), sorted_unique(dataset.x2()))
}

fn sorted_unique(mut v: Vec<f64>) -> Vec<f64> {
    v.retain(|x| x.is_finite());
    v.sort_by(|a, b| a.total_cmp(b));
    v.dedup();
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_dataset;

    #[test]
    fn surface_grid_is_cross_product() {
        let ds = builtin_dataset().unwrap();
        let p = Params::new(1.0, 2.0, 3.0);
        let g = surface_grid(&p, &ds);

        assert_eq!(g.x1, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(g.x2, vec![-1.0, 0.0, 1.0, 2.0, 3.0, 6.0]);
        assert_eq!(g.out.len(), 6);
        assert!(g.out.iter().all(|row| row.len() == 6));
        // row j -> x2 = 6.0, column i -> x1 = 5.0
        assert_eq!(g.out[5][4], 1.0 + 2.0 * 5.0 + 3.0 * 6.0);
        // Every record's target sits on the grid.
        for r in ds.records() {
            let i = g.x1.iter().position(|&v| v == r.x1).unwrap();
            let j = g.x2.iter().position(|&v| v == r.x2).unwrap();
            assert_eq!(g.out[j][i], r.target);
        }
    }

    #[test]
    fn wires_read_from_grid_values() {
        let ds = Dataset::from_columns(&[0.0, 2.0], &[1.0, 3.0], &[0.0, 0.0]).unwrap();
        let g = surface_grid(&Params::new(1.0, 1.0, 10.0), &ds);
        let wires = g.wires();

        assert_eq!(wires.len(), 4);
        assert_eq!(wires[0], vec![[0.0, 1.0, 11.0], [2.0, 1.0, 13.0]]);
        assert_eq!(wires[3], vec![[2.0, 1.0, 13.0], [2.0, 3.0, 33.0]]);
    }

    #[test]
    fn wire_axes_sorted_and_unique() {
        let ds = Dataset::from_columns(&[3.0, 1.0, 3.0], &[0.0, -1.0, 2.0], &[0.0, 0.0, 0.0]).unwrap();
        let (a, b) = wire_axes(&ds);
        assert_eq!(a, vec![1.0, 3.0]);
        assert_eq!(b, vec![-1.0, 0.0, 2.0]);
    }
}
