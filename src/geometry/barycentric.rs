use super::{PercentageTriple, Point2D};

/// Convex combination of the three vertices weighted by component share.
///
/// Weights are not re-validated: a triple that does not sum to 100 lands
/// outside the triangle.
pub fn to_point(triple: &PercentageTriple, a: Point2D, b: Point2D, c: Point2D) -> Point2D {
    let [fa, fb, fc] = triple.weights();

    Point2D::new(
        fa * a.x + fb * b.x + fc * c.x,
        fa * a.y + fb * b.y + fc * c.y,
    )
}
