//! Equilateral triangle placement shared by the terminal plot and the report.

use super::{Point2D, TriangleVertices};

const SQRT_3: f32 = 1.732_050_8;

/// Fit an equilateral triangle, centered, inside `width` x `height` minus
/// `padding` on every side.
///
/// The side is sized from the usable height and clipped by the usable width.
/// Returns `None` when no positive-sized triangle fits.
pub fn layout(width: f32, height: f32, padding: f32) -> Option<TriangleVertices> {
    let usable_width = width - 2.0 * padding;
    let usable_height = height - 2.0 * padding;

    if usable_width <= 0.0 || usable_height <= 0.0 {
        return None;
    }

    let side_from_height = (2.0 * usable_height) / SQRT_3;
    let side = side_from_height.min(usable_width);

    if side <= 0.0 {
        return None;
    }

    let triangle_height = (SQRT_3 / 2.0) * side;
    let half_side = side / 2.0;

    let center_x = padding + usable_width / 2.0;
    let center_y = padding + usable_height / 2.0;

    let top_y = center_y - triangle_height / 2.0;
    let bottom_y = center_y + triangle_height / 2.0;

    Some(TriangleVertices {
        a: Point2D::new(center_x - half_side, bottom_y),
        b: Point2D::new(center_x + half_side, bottom_y),
        c: Point2D::new(center_x, top_y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-2;

    #[test]
    fn layout_fails_without_usable_space() {
        assert_eq!(layout(32.0, 300.0, 16.0), None);
        assert_eq!(layout(300.0, 32.0, 16.0), None);
        assert_eq!(layout(20.0, 300.0, 16.0), None);
        assert_eq!(layout(300.0, 10.0, 16.0), None);
        assert_eq!(layout(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn layout_square_surface_is_width_limited() {
        let v = layout(300.0, 300.0, 16.0).expect("layout fits");

        assert!((v.side_length() - 268.0).abs() < EPS);
        assert!(v.c.y < v.a.y);
        assert!((v.a.y - v.b.y).abs() < f32::EPSILON);
        assert!(v.a.x < v.b.x);
        assert!((v.a.x - 16.0).abs() < EPS);
        assert!((v.b.x - 284.0).abs() < EPS);
        assert!((v.c.x - 150.0).abs() < EPS);
    }

    #[test]
    fn layout_produces_equilateral_triangle() {
        for (w, h, p) in [(300.0, 300.0, 16.0), (800.0, 200.0, 8.0), (120.0, 640.0, 0.0)] {
            let v = layout(w, h, p).expect("layout fits");
            let ab = v.a.distance(v.b);
            let bc = v.b.distance(v.c);
            let ca = v.c.distance(v.a);
            let tolerance = ab * 1e-4;
            assert!((ab - bc).abs() < tolerance, "{ab} vs {bc} for {w}x{h}");
            assert!((bc - ca).abs() < tolerance, "{bc} vs {ca} for {w}x{h}");
        }
    }

    #[test]
    fn layout_wide_surface_is_height_limited() {
        let v = layout(800.0, 200.0, 0.0).expect("layout fits");
        // The triangle spans the full height.
        assert!(v.c.y.abs() < EPS);
        assert!((v.a.y - 200.0).abs() < EPS);
        assert!((v.side_length() - 400.0 / SQRT_3).abs() < EPS);
    }

    #[test]
    fn layout_stays_inside_padded_area() {
        let (w, h, p) = (173.0, 91.0, 5.0);
        let v = layout(w, h, p).expect("layout fits");
        for point in [v.a, v.b, v.c] {
            assert!(point.x >= p - EPS && point.x <= w - p + EPS);
            assert!(point.y >= p - EPS && point.y <= h - p + EPS);
        }
    }
}
