//! Plotters-powered 3-D plane chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Plotters' 3-D coordinates are `(x, y, z)` with `y` pointing up, so the scene is
//! laid out as `(x1, out, x2)`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct PlaneChart<'a> {
    /// Wireframe polylines of the fitted plane, as `(x1, out, x2)`.
    pub wires: &'a [Vec<(f64, f64, f64)>],
    /// Observed records, as `(x1, target, x2)`.
    pub points: &'a [(f64, f64, f64)],
    pub x1_bounds: [f64; 2],
    pub out_bounds: [f64; 2],
    pub x2_bounds: [f64; 2],
    /// Camera angles in radians.
    pub yaw: f64,
    pub pitch: f64,
}

impl<'a> Widget for PlaneChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let bounds_ok = [self.x1_bounds, self.out_bounds, self.x2_bounds]
            .iter()
            .all(|b| b[0].is_finite() && b[1].is_finite() && b[1] > b[0]);
        if !bounds_ok {
            buf.set_string(
                area.x,
                area.y,
                "Fitted plane is not finite; nothing to draw.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [a0, a1] = self.x1_bounds;
        let [o0, o1] = self.out_bounds;
        let [b0, b1] = self.x2_bounds;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_3d(a0..a1, o0..o1, b0..b1)?;

            chart.with_projection(|mut pb| {
                pb.yaw = self.yaw;
                pb.pitch = self.pitch;
                pb.scale = 0.8;
                pb.into_matrix()
            });

            // Low-resolution terminal cells: keep only bold grid lines.
            chart
                .configure_axes()
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .bold_grid_style(&WHITE)
                .max_light_lines(0)
                .draw()?;

            let plane_color = RGBColor(0, 140, 255); // blue
            let points_color = RGBColor(255, 0, 0); // red

            // 1) Plane of best fit.
            for line in self.wires {
                chart.draw_series(LineSeries::new(line.iter().copied(), &plane_color))?;
            }

            // 2) Observed records.
            //
            // `Circle` markers are avoided: the ratatui backend maps circle radii
            // incorrectly and produces huge circles. A colored `Pixel` is a clean dot.
            chart.draw_series(self.points.iter().map(|&p| Pixel::new(p, points_color)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
