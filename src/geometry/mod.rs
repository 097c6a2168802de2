//! Ternary (Steiner) plot geometry.
//!
//! Three pure functions turn a raw N/P/K mix into drawing coordinates:
//! [`normalize`] rescales the mix to 100%, [`layout`] places an equilateral
//! triangle on a drawing surface and [`to_point`] maps the mix onto it.
//! Coordinates follow raster conventions: y grows downwards.

mod barycentric;
mod layout;
mod normalize;

pub use barycentric::to_point;
pub use layout::layout;
pub use normalize::{normalize, FALLBACK, SUM_TOLERANCE};

/// Relative shares of three components (A, B, C), in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentageTriple {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl PercentageTriple {
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    pub fn sum(&self) -> f32 {
        self.a + self.b + self.c
    }

    /// True when the shares already add up to 100 within [`SUM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 100.0).abs() <= SUM_TOLERANCE
    }

    /// Fractional weights (share / 100), in A, B, C order.
    pub fn weights(&self) -> [f32; 3] {
        [self.a / 100.0, self.b / 100.0, self.c / 100.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point2D) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Corners of the plot triangle.
///
/// `a` is bottom-left (100% A), `b` bottom-right (100% B) and `c` the top
/// apex (100% C).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleVertices {
    pub a: Point2D,
    pub b: Point2D,
    pub c: Point2D,
}

impl TriangleVertices {
    pub fn side_length(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Map a percentage triple onto this triangle.
    pub fn point_for(&self, triple: &PercentageTriple) -> Point2D {
        to_point(triple, self.a, self.b, self.c)
    }

    /// Edges as (from, to) pairs: A-B (base), B-C, C-A.
    pub fn edges(&self) -> [(Point2D, Point2D); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}
