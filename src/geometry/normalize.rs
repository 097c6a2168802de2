use tracing::warn;

use super::PercentageTriple;

/// Allowed distance from 100 before a triple gets rescaled.
pub const SUM_TOLERANCE: f32 = 0.01;

/// Returned when the input carries no information (sum <= 0).
/// The last share absorbs the rounding so the three still add up to 100.
pub const FALLBACK: PercentageTriple = PercentageTriple::new(33.333, 33.333, 33.334);

/// Rescale three raw percentages so they sum to 100.
///
/// Never fails: a non-positive sum yields [`FALLBACK`], and a sum already
/// within [`SUM_TOLERANCE`] of 100 is returned untouched.
pub fn normalize(a: f32, b: f32, c: f32) -> PercentageTriple {
    let sum = a + b + c;

    if sum <= 0.0 {
        warn!(
            "Percentage sum is {}, cannot normalize; using default split",
            sum
        );
        return FALLBACK;
    }

    if (sum - 100.0).abs() > SUM_TOLERANCE {
        return PercentageTriple::new(a / sum * 100.0, b / sum * 100.0, c / sum * 100.0);
    }

    PercentageTriple::new(a, b, c)
}
