// Centralized tolerances for the geometry predicates

/// Cross products with absolute value below this are treated as collinear.
/// Keeps near-degenerate inputs from flickering between orientations.
pub const EPS_COLLINEAR: f64 = 1e-10;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.max(0.0).min(1.0)
}

#[inline]
pub fn near_zero(x: f64, eps: f64) -> bool {
    x.abs() < eps
}
