//! Shared geometric aliases and small numeric helpers.

/// A 2D point (x, y) in image coordinates: x grows rightward, y grows downward.
pub type Point = (f64, f64);

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Rounds a coordinate to 4 decimal places, the precision used for
/// exported glyph geometry.
#[inline]
pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
