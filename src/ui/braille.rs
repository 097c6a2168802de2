use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::color::Rgb;
use crate::geometry::Point2D;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// Drawing order; a dot only gets repainted by an equal or higher layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Grid,
    Outline,
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dot {
    color: Rgb,
    layer: Layer,
}

/// A canvas for sub-character braille rendering.
/// Each terminal character cell maps to a 2x4 grid of colored dots, so one
/// dot is roughly square on a typical terminal font.
pub struct BrailleCanvas {
    grid: Vec<Option<Dot>>,
    pub grid_w: usize,
    pub grid_h: usize,
    char_w: usize,
    char_h: usize,
}

impl BrailleCanvas {
    /// Create a new braille canvas for the given character dimensions.
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        Self {
            grid: vec![None; grid_w * grid_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
        }
    }

    /// Set a single dot (bounds-checked, negative coordinates ignored).
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, color: Rgb, layer: Layer) {
        if gx < 0 || gy < 0 || gx as usize >= self.grid_w || gy as usize >= self.grid_h {
            return;
        }
        let slot = &mut self.grid[gy as usize * self.grid_w + gx as usize];
        if slot.map_or(true, |dot| layer >= dot.layer) {
            *slot = Some(Dot { color, layer });
        }
    }

    #[cfg(test)]
    pub fn is_set(&self, gx: usize, gy: usize) -> bool {
        gx < self.grid_w && gy < self.grid_h && self.grid[gy * self.grid_w + gx].is_some()
    }

    /// Draw a line between two points using Bresenham's algorithm.
    /// `color_fn(t)` receives the position along the line, 0.0 at `from`
    /// and 1.0 at `to`.
    pub fn line(&mut self, from: Point2D, to: Point2D, layer: Layer, color_fn: impl Fn(f32) -> Rgb) {
        let (mut x0, mut y0) = to_grid(from);
        let (x1, y1) = to_grid(to);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let steps = dx.max(-dy).max(1) as f32;
        let mut step = 0;

        loop {
            self.set(x0, y0, color_fn(step as f32 / steps), layer);

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
            step += 1;
        }
    }

    /// Fill a disc of `radius` dots around `center`.
    pub fn disc(&mut self, center: Point2D, radius: f32, color: Rgb, layer: Layer) {
        let (cx, cy) = to_grid(center);
        let r = radius.max(0.0).ceil() as isize;
        let r_sq = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r_sq {
                    self.set(cx + dx, cy + dy, color, layer);
                }
            }
        }
    }

    /// Encode the dots as braille characters into `buf`, one cell per 2x4 dots.
    /// A cell takes the color of its highest-layer dot.
    pub fn render(&self, buf: &mut Buffer, area: Rect) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                let mut braille: u8 = 0;
                let mut top: Option<Dot> = None;

                for (dx, col) in DOT_MAP.iter().enumerate() {
                    for (dy, &bit) in col.iter().enumerate() {
                        let gx = cx * 2 + dx;
                        let gy = cy * 4 + dy;
                        if let Some(dot) = self.grid[gy * self.grid_w + gx] {
                            braille |= bit;
                            if top.map_or(true, |t| dot.layer >= t.layer) {
                                top = Some(dot);
                            }
                        }
                    }
                }

                if let Some(dot) = top {
                    let ch = char::from_u32(0x2800 + braille as u32).unwrap_or(' ');
                    let (r, g, b) = dot.color;
                    if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + cy as u16)) {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(r, g, b));
                    }
                }
            }
        }
    }
}

fn to_grid(point: Point2D) -> (isize, isize) {
    (point.x.round() as isize, point.y.round() as isize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = (255, 0, 0);
    const GRAY: Rgb = (90, 90, 90);

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = BrailleCanvas::new(10, 5);
        canvas.line(Point2D::new(1.0, 1.0), Point2D::new(18.0, 17.0), Layer::Outline, |_| GRAY);
        assert!(canvas.is_set(1, 1));
        assert!(canvas.is_set(18, 17));
        assert!(!canvas.is_set(18, 1));
    }

    #[test]
    fn line_reports_progress_from_zero_to_one() {
        let mut canvas = BrailleCanvas::new(10, 1);
        let seen = std::cell::RefCell::new(Vec::new());
        canvas.line(Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0), Layer::Outline, |t| {
            seen.borrow_mut().push(t);
            GRAY
        });
        assert_eq!(*seen.borrow(), [0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn out_of_bounds_dots_are_ignored() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.set(-1, 0, RED, Layer::Marker);
        canvas.set(4, 0, RED, Layer::Marker);
        canvas.set(0, 8, RED, Layer::Marker);
        assert!((0..4).all(|x| (0..8).all(|y| !canvas.is_set(x, y))));
    }

    #[test]
    fn render_encodes_dots_and_prefers_higher_layers() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set(0, 0, GRAY, Layer::Outline);
        canvas.set(1, 3, RED, Layer::Marker);
        canvas.set(1, 3, GRAY, Layer::Grid);

        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        canvas.render(&mut buf, area);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "\u{2881}");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn disc_fills_radius() {
        let mut canvas = BrailleCanvas::new(5, 3);
        canvas.disc(Point2D::new(4.0, 4.0), 2.0, RED, Layer::Marker);
        assert!(canvas.is_set(4, 4));
        assert!(canvas.is_set(6, 4));
        assert!(canvas.is_set(4, 2));
        assert!(!canvas.is_set(6, 6));
    }
}
