//! Steiner triangle drawn on a braille canvas.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use tracing::debug;

use super::braille::{BrailleCanvas, Layer};
use crate::color::ColorScheme;
use crate::config::PlotConfig;
use crate::geometry::{self, PercentageTriple, Point2D, TriangleVertices};

const VERTEX_LABELS: [&str; 3] = ["N", "P", "K"];

/// Draw the triangle outline, optional grid, marker and vertex labels for a
/// normalized triple. Returns the marker position in dots, or draws nothing
/// and returns `None` when the area is too small after padding.
pub fn render_plot(
    buf: &mut Buffer,
    area: Rect,
    triple: &PercentageTriple,
    color_scheme: &ColorScheme,
    config: &PlotConfig,
) -> Option<Point2D> {
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);

    let Some(vertices) = geometry::layout(
        canvas.grid_w as f32,
        canvas.grid_h as f32,
        config.padding,
    ) else {
        debug!(
            "No room for the plot in {}x{} dots with padding {}",
            canvas.grid_w, canvas.grid_h, config.padding
        );
        return None;
    };

    let marker = vertices.point_for(triple);

    if config.show_grid {
        let grid_color = color_scheme.grid_color();
        for (from, to) in grid_lines(&vertices) {
            canvas.line(from, to, Layer::Grid, |_| grid_color);
        }
    }

    for (i, (from, to)) in vertices.edges().into_iter().enumerate() {
        let j = (i + 1) % 3;
        canvas.line(from, to, Layer::Outline, |t| color_scheme.edge_color(i, j, t));
    }

    canvas.disc(
        marker,
        config.marker_radius,
        color_scheme.marker_color(triple.weights()),
        Layer::Marker,
    );

    canvas.render(buf, area);
    render_labels(buf, area, &vertices, color_scheme);

    Some(marker)
}

/// Iso-lines every 20% for each component. A line where component A holds
/// `t` percent runs from (t, 100-t, 0) to (t, 0, 100-t), and likewise for B
/// and C.
pub fn grid_lines(vertices: &TriangleVertices) -> Vec<(Point2D, Point2D)> {
    let mut lines = Vec::with_capacity(12);
    for level in [20.0, 40.0, 60.0, 80.0] {
        let rest = 100.0 - level;
        let pairs = [
            (
                PercentageTriple::new(level, rest, 0.0),
                PercentageTriple::new(level, 0.0, rest),
            ),
            (
                PercentageTriple::new(rest, level, 0.0),
                PercentageTriple::new(0.0, level, rest),
            ),
            (
                PercentageTriple::new(rest, 0.0, level),
                PercentageTriple::new(0.0, rest, level),
            ),
        ];
        for (from, to) in pairs {
            lines.push((vertices.point_for(&from), vertices.point_for(&to)));
        }
    }
    lines
}

fn render_labels(buf: &mut Buffer, area: Rect, vertices: &TriangleVertices, color_scheme: &ColorScheme) {
    let colors = color_scheme.vertex_colors();
    // Cell offsets pushing each label outward from its corner
    let offsets: [(i32, i32); 3] = [(-2, 1), (2, 1), (0, -1)];

    for (i, vertex) in [vertices.a, vertices.b, vertices.c].iter().enumerate() {
        let cx = (vertex.x / 2.0).floor() as i32 + offsets[i].0;
        let cy = (vertex.y / 4.0).floor() as i32 + offsets[i].1;
        let cx = cx.clamp(0, area.width.saturating_sub(1) as i32) as u16;
        let cy = cy.clamp(0, area.height.saturating_sub(1) as i32) as u16;

        let (r, g, b) = colors[i];
        buf.set_string(
            area.x + cx,
            area.y + cy,
            VERTEX_LABELS[i],
            Style::default().fg(Color::Rgb(r, g, b)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(padding: f32) -> PlotConfig {
        PlotConfig {
            padding,
            ..PlotConfig::default()
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn plot_is_skipped_when_area_is_too_small() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let drawn = render_plot(
            &mut buf,
            area,
            &PercentageTriple::new(40.0, 30.0, 30.0),
            &ColorScheme::Classic,
            &config(16.0),
        );
        assert!(drawn.is_none());
        assert!(buffer_text(&buf).chars().all(|c| c == ' '));
    }

    #[test]
    fn plot_places_marker_inside_triangle_and_labels_corners() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let marker = render_plot(
            &mut buf,
            area,
            &PercentageTriple::new(40.0, 30.0, 30.0),
            &ColorScheme::Spectrum,
            &config(4.0),
        )
        .expect("plot fits");

        // 40x20 cells give an 80x80 dot grid
        let v = geometry::layout(80.0, 80.0, 4.0).expect("layout fits");
        assert!(marker.y > v.c.y && marker.y < v.a.y);
        assert!(marker.x > v.a.x && marker.x < v.b.x);

        let text = buffer_text(&buf);
        for label in VERTEX_LABELS {
            assert!(text.contains(label), "missing label {label}");
        }
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }

    #[test]
    fn default_padding_leaves_a_usable_triangle_on_a_small_terminal() {
        // Inner plot area of an 80x24 terminal: 60x22 cells, 120x88 dots
        let v = geometry::layout(120.0, 88.0, PlotConfig::default().padding).expect("layout fits");
        assert!(v.side_length() > 80.0, "side {}", v.side_length());
    }

    #[test]
    fn grid_lines_end_on_triangle_edges() {
        let v = geometry::layout(300.0, 300.0, 16.0).expect("layout fits");
        let lines = grid_lines(&v);
        assert_eq!(lines.len(), 12);

        // The 20% nitrogen line starts on the N-P base.
        let (from, _) = lines[0];
        assert!((from.y - v.a.y).abs() < 1e-3);
    }
}
