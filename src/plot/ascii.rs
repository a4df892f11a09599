//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output
//!
//! The 3-D scene (x1, x2, out) is projected orthographically from a fixed
//! viewpoint (elevation 10°, azimuth 45°).
//!
//! Plot elements:
//! - fitted plane: `.` wireframe over the observed feature values
//! - observed records: `o`

use std::io::Write;

use crate::domain::{Dataset, Params};
use crate::error::AppError;
use crate::plot::{Renderer, surface_grid};

pub const DEFAULT_ELEVATION_DEG: f64 = 10.0;
pub const DEFAULT_AZIMUTH_DEG: f64 = 45.0;

/// Writes the ASCII figure to any `Write` sink (stdout in the binary).
pub struct AsciiRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, params: &Params, dataset: &Dataset) -> Result<(), AppError> {
        let txt = render_ascii_plot(params, dataset, self.width, self.height);
        self.out
            .write_all(txt.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| AppError::new(4, format!("Failed to write plot: {e}")))
    }
}

/// Render the fitted plane and the records as a character grid.
pub fn render_ascii_plot(params: &Params, dataset: &Dataset, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let wires = surface_grid(params, dataset).wires();
    let points: Vec<[f64; 3]> = dataset.records().iter().map(|r| [r.x1, r.x2, r.target]).collect();

    let view = View::fit(&wires, &points, DEFAULT_ELEVATION_DEG, DEFAULT_AZIMUTH_DEG);
    let mut grid = vec![vec![' '; width]; height];

    // Project everything first so the screen bounds cover plane and points.
    let wires_2d: Vec<Vec<(f64, f64)>> = wires
        .iter()
        .map(|line| line.iter().map(|p| view.project(*p)).collect())
        .collect();
    let points_2d: Vec<(f64, f64)> = points.iter().map(|p| view.project(*p)).collect();

    let (u_min, u_max, v_min, v_max) = screen_bounds(&wires_2d, &points_2d).unwrap_or((-1.0, 1.0, -1.0, 1.0));
    let (u_min, u_max) = pad_range(u_min, u_max, 0.05);
    let (v_min, v_max) = pad_range(v_min, v_max, 0.05);

    // Draw the plane first (so points can overlay).
    for line in &wires_2d {
        let mut prev = None;
        for &(u, v) in line {
            // A diverged fit has no drawable vertex here; break the polyline.
            if !(u.is_finite() && v.is_finite()) {
                prev = None;
                continue;
            }
            let x = map_x(u, u_min, u_max, width);
            let y = map_y(v, v_min, v_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, y, '.');
            } else if grid[y][x] == ' ' {
                grid[y][x] = '.';
            }
            prev = Some((x, y));
        }
    }

    for &(u, v) in &points_2d {
        if !(u.is_finite() && v.is_finite()) {
            continue;
        }
        let x = map_x(u, u_min, u_max, width);
        let y = map_y(v, v_min, v_max, height);
        grid[y][x] = 'o';
    }

    let [r1, r2, r3] = view.ranges;
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x1=[{:.2}, {:.2}] | x2=[{:.2}, {:.2}] | out=[{:.2}, {:.2}] | elev={DEFAULT_ELEVATION_DEG} azim={DEFAULT_AZIMUTH_DEG}\n",
        r1.0, r1.1, r2.0, r2.1, r3.0, r3.1
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(". plane of best fit   o datapoints\n");
    out
}

/// Orthographic camera over axis-normalized coordinates.
struct View {
    ranges: [(f64, f64); 3],
    sin_az: f64,
    cos_az: f64,
    sin_el: f64,
    cos_el: f64,
}

impl View {
    fn fit(wires: &[Vec<[f64; 3]>], points: &[[f64; 3]], elev_deg: f64, azim_deg: f64) -> Self {
        let mut ranges = [(f64::INFINITY, f64::NEG_INFINITY); 3];
        for p in wires.iter().flatten().chain(points.iter()) {
            for (k, r) in ranges.iter_mut().enumerate() {
                if p[k].is_finite() {
                    r.0 = r.0.min(p[k]);
                    r.1 = r.1.max(p[k]);
                }
            }
        }
        for r in ranges.iter_mut() {
            if !(r.0.is_finite() && r.1.is_finite()) {
                *r = (0.0, 1.0);
            }
        }

        let (sin_az, cos_az) = azim_deg.to_radians().sin_cos();
        let (sin_el, cos_el) = elev_deg.to_radians().sin_cos();
        Self {
            ranges,
            sin_az,
            cos_az,
            sin_el,
            cos_el,
        }
    }

    /// Scene point -> screen `(u, v)`, `v` pointing up.
    fn project(&self, p: [f64; 3]) -> (f64, f64) {
        let x = normalize(p[0], self.ranges[0]);
        let y = normalize(p[1], self.ranges[1]);
        let z = normalize(p[2], self.ranges[2]);

        let u = -x * self.sin_az + y * self.cos_az;
        let depth = x * self.cos_az + y * self.sin_az;
        let v = z * self.cos_el - depth * self.sin_el;
        (u, v)
    }
}

/// Map into `[-0.5, 0.5]`; a flat axis collapses to 0.
fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
    let span = max - min;
    if span > 0.0 { (value - min) / span - 0.5 } else { 0.0 }
}

fn screen_bounds(lines: &[Vec<(f64, f64)>], points: &[(f64, f64)]) -> Option<(f64, f64, f64, f64)> {
    let mut u_min = f64::INFINITY;
    let mut u_max = f64::NEG_INFINITY;
    let mut v_min = f64::INFINITY;
    let mut v_max = f64::NEG_INFINITY;
    for &(u, v) in lines.iter().flatten().chain(points.iter()) {
        if u.is_finite() && v.is_finite() {
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }
    }
    if u_max > u_min && v_max > v_min {
        Some((u_min, u_max, v_min, v_max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(u: f64, u_min: f64, u_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let t = ((u - u_min) / (u_max - u_min)).clamp(0.0, 1.0);
    if !t.is_finite() {
        return 0;
    }
    (t * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, v_min: f64, v_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let t = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    if !t.is_finite() {
        return height - 1;
    }
    // top row is the max
    (height as f64 - 1.0 - (t * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_dataset;

    fn grid_lines(txt: &str) -> Vec<&str> {
        let lines: Vec<&str> = txt.lines().collect();
        lines[1..lines.len() - 1].to_vec()
    }

    #[test]
    fn plot_has_fixed_shape() {
        let ds = builtin_dataset().unwrap();
        let txt = render_ascii_plot(&Params::new(1.0, 2.0, 3.0), &ds, 40, 12);

        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 12 + 2);
        assert!(lines[0].starts_with("Plot: x1=[1.00, 6.00] | x2=[-1.00, 6.00]"));
        for row in grid_lines(&txt) {
            assert_eq!(row.chars().count(), 40);
        }
    }

    #[test]
    fn plot_golden_snapshot_builtin_plane() {
        let ds = builtin_dataset().unwrap();
        let txt = render_ascii_plot(&Params::new(1.0, 2.0, 3.0), &ds, 30, 10);
        let expected = concat!(
            "Plot: x1=[1.00, 6.00] | x2=[-1.00, 6.00] | out=[0.00, 31.00] | elev=10 azim=45\n",
            "              ...             \n",
            "            ..  ......        \n",
            "          .. ... ..  .o....   \n",
            "        .....  ..  .. ..   .. \n",
            "      ...... .o.... ..  ...   \n",
            "    ...... ......  .....      \n",
            " ..o............o...o         \n",
            "   .o.... ...... ..           \n",
            "         ..... ..             \n",
            "              .               \n",
            ". plane of best fit   o datapoints\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn every_record_lands_on_its_projected_cell() {
        let ds = builtin_dataset().unwrap();
        let params = Params::new(1.0, 2.0, 3.0);
        let txt = render_ascii_plot(&params, &ds, 60, 24);
        let rows: Vec<Vec<char>> = grid_lines(&txt).iter().map(|l| l.chars().collect()).collect();

        let wires = surface_grid(&params, &ds).wires();
        let points: Vec<[f64; 3]> = ds.records().iter().map(|r| [r.x1, r.x2, r.target]).collect();
        let view = View::fit(&wires, &points, DEFAULT_ELEVATION_DEG, DEFAULT_AZIMUTH_DEG);
        let wires_2d: Vec<Vec<(f64, f64)>> =
            wires.iter().map(|l| l.iter().map(|p| view.project(*p)).collect()).collect();
        let points_2d: Vec<(f64, f64)> = points.iter().map(|p| view.project(*p)).collect();
        let (u0, u1, v0, v1) = screen_bounds(&wires_2d, &points_2d).unwrap();
        let (u0, u1) = pad_range(u0, u1, 0.05);
        let (v0, v1) = pad_range(v0, v1, 0.05);

        for &(u, v) in &points_2d {
            let x = map_x(u, u0, u1, 60);
            let y = map_y(v, v0, v1, 24);
            assert_eq!(rows[y][x], 'o');
        }
        assert!(rows.iter().flatten().any(|&c| c == '.'));
    }

    #[test]
    fn plot_is_deterministic_and_survives_non_finite_params() {
        let ds = builtin_dataset().unwrap();
        let p = Params::new(0.5, -1.0, 2.0);
        assert_eq!(render_ascii_plot(&p, &ds, 30, 10), render_ascii_plot(&p, &ds, 30, 10));

        for diverged in [Params::new(f64::NAN, f64::INFINITY, 1.0), Params::new(f64::NAN, 1.0, 1.0)] {
            let txt = render_ascii_plot(&diverged, &ds, 30, 10);
            let rows = grid_lines(&txt);
            assert_eq!(rows.len(), 10);
            // No plane is drawn, but the records still are.
            assert!(rows.iter().all(|r| !r.contains('.')));
            assert!(rows.iter().any(|r| r.contains('o')));
        }
    }

    #[test]
    fn renderer_writes_to_sink() {
        let ds = builtin_dataset().unwrap();
        let p = Params::new(1.0, 2.0, 3.0);
        let mut r = AsciiRenderer::new(Vec::new(), 20, 8);
        r.render(&p, &ds).unwrap();

        let written = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(written, render_ascii_plot(&p, &ds, 20, 8));
    }

    #[test]
    fn normalize_handles_flat_axis() {
        assert_eq!(normalize(3.0, (3.0, 3.0)), 0.0);
        assert_eq!(normalize(0.0, (0.0, 2.0)), -0.5);
        assert_eq!(normalize(2.0, (0.0, 2.0)), 0.5);
    }
}
