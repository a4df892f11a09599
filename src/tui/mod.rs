//! Ratatui-based terminal UI.
//!
//! Shows the fitted plane as a rotatable 3-D wireframe together with the
//! observed records. The view is a pure consumer of the final params and the
//! dataset: it never refits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::domain::{Dataset, Params};
use crate::error::AppError;
use crate::models::sum_squared_residuals;
use crate::plot::{DEFAULT_AZIMUTH_DEG, DEFAULT_ELEVATION_DEG, Renderer, surface_grid};

mod plotters_chart;

use plotters_chart::PlaneChart;

const ROTATE_STEP_DEG: f64 = 5.0;

/// Interactive on-screen figure.
#[derive(Debug, Default)]
pub struct TuiRenderer;

impl Renderer for TuiRenderer {
    fn render(&mut self, params: &Params, dataset: &Dataset) -> Result<(), AppError> {
        let _guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)
            .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

        let mut view = PlaneView::new(*params, dataset);
        view.event_loop(&mut terminal)
    }
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct PlaneView {
    params: Params,
    sse: f64,
    n_records: usize,
    series: SceneSeries,
    azimuth_deg: f64,
    elevation_deg: f64,
    status: String,
}

impl PlaneView {
    fn new(params: Params, dataset: &Dataset) -> Self {
        Self {
            params,
            sse: sum_squared_residuals(&params, dataset),
            n_records: dataset.len(),
            series: scene_series(&params, dataset),
            azimuth_deg: DEFAULT_AZIMUTH_DEG,
            elevation_deg: DEFAULT_ELEVATION_DEG,
            status: "Ready.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the view should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.azimuth_deg -= ROTATE_STEP_DEG,
            KeyCode::Right => self.azimuth_deg += ROTATE_STEP_DEG,
            KeyCode::Up => self.elevation_deg = (self.elevation_deg + ROTATE_STEP_DEG).min(90.0),
            KeyCode::Down => self.elevation_deg = (self.elevation_deg - ROTATE_STEP_DEG).max(-90.0),
            KeyCode::Char('0') => {
                self.azimuth_deg = DEFAULT_AZIMUTH_DEG;
                self.elevation_deg = DEFAULT_ELEVATION_DEG;
            }
            _ => return false,
        }
        self.azimuth_deg = self.azimuth_deg.rem_euclid(360.0);
        self.status = format!("elev={:.0} azim={:.0}", self.elevation_deg, self.azimuth_deg);
        debug!("view changed: {}", self.status);
        false
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let p = &self.params;
        let lines = vec![
            Line::from(vec![
                Span::styled("planefit", Style::default().fg(Color::Cyan)),
                Span::raw(" - plane of best fit"),
            ]),
            Line::from(Span::styled(
                format!(
                    "w0={:.6} w1={:.6} w2={:.6} | n={} | sse={:.6e}",
                    p.w0, p.w1, p.w2, self.n_records, self.sse
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("X1 (right) / X2 (depth) / Out (up)")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let s = &self.series;
        let widget = PlaneChart {
            wires: &s.wires,
            points: &s.points,
            x1_bounds: s.x1_bounds,
            out_bounds: s.out_bounds,
            x2_bounds: s.x2_bounds,
            yaw: self.azimuth_deg.to_radians(),
            pitch: self.elevation_deg.to_radians(),
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ rotate  ↑/↓ tilt  0 reset  q quit  | blue: plane  red: datapoints";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart series in Plotters' `(x1, out, x2)` layout.
#[derive(Debug, Clone)]
struct SceneSeries {
    wires: Vec<Vec<(f64, f64, f64)>>,
    points: Vec<(f64, f64, f64)>,
    x1_bounds: [f64; 2],
    out_bounds: [f64; 2],
    x2_bounds: [f64; 2],
}

fn scene_series(params: &Params, dataset: &Dataset) -> SceneSeries {
    let grid = surface_grid(params, dataset);
    let wires: Vec<Vec<(f64, f64, f64)>> = grid
        .wires()
        .into_iter()
        .map(|line| line.into_iter().map(|[a, b, out]| (a, out, b)).collect())
        .collect();

    let points: Vec<(f64, f64, f64)> = dataset.records().iter().map(|r| (r.x1, r.target, r.x2)).collect();

    let outs = wires.iter().flatten().map(|p| p.1).chain(points.iter().map(|p| p.1));
    SceneSeries {
        x1_bounds: padded_bounds(grid.x1.iter().copied()),
        out_bounds: padded_bounds(outs),
        x2_bounds: padded_bounds(grid.x2.iter().copied()),
        wires,
        points,
    }
}

/// Min/max of the finite values with 5% padding; `[0, 1]` when empty.
///
/// A non-finite plane still gets drawable bounds from the records, and
/// Plotters clips the non-finite wire points.
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo).abs() * 0.05).max(0.5);
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_dataset;

    #[test]
    fn scene_series_use_plotters_axis_order() {
        let ds = builtin_dataset().unwrap();
        let s = scene_series(&Params::new(1.0, 2.0, 3.0), &ds);

        // 6 distinct x2 values + 6 distinct x1 values.
        assert_eq!(s.wires.len(), 12);
        assert_eq!(s.points[2], (3.0, 25.0, 6.0));
        assert!(s.x1_bounds[0] < 1.0 && s.x1_bounds[1] > 6.0);
        assert!(s.x2_bounds[0] < -1.0 && s.x2_bounds[1] > 6.0);
        // Plane corner (6, 6) -> 31 must be inside the vertical range.
        assert!(s.out_bounds[1] > 31.0);
        // Wires come from the shared surface grid, reordered for Plotters.
        let grid = surface_grid(&Params::new(1.0, 2.0, 3.0), &ds);
        assert_eq!(s.wires[5][4], (grid.x1[4], grid.out[5][4], grid.x2[5]));
        assert_eq!(s.wires[5][4], (5.0, 29.0, 6.0));
    }

    #[test]
    fn padded_bounds_ignore_non_finite_values() {
        assert_eq!(padded_bounds([f64::NAN, f64::INFINITY].into_iter()), [0.0, 1.0]);
        let b = padded_bounds([2.0, f64::NAN, 12.0].into_iter());
        assert_eq!(b, [1.5, 12.5]);
    }

    #[test]
    fn keys_rotate_and_reset_the_view() {
        let ds = builtin_dataset().unwrap();
        let mut v = PlaneView::new(Params::new(1.0, 2.0, 3.0), &ds);
        assert_eq!(v.sse, 0.0);

        assert!(!v.handle_key(KeyCode::Left));
        assert_eq!(v.azimuth_deg, 40.0);
        assert!(!v.handle_key(KeyCode::Up));
        assert_eq!(v.elevation_deg, 15.0);
        assert!(!v.handle_key(KeyCode::Char('0')));
        assert_eq!((v.azimuth_deg, v.elevation_deg), (45.0, 10.0));
        assert!(v.handle_key(KeyCode::Char('q')));
    }
}
