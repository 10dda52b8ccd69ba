/// Wrap an angle in degrees into `[0, 360)`.
pub(crate) fn wrap_degrees(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    // rem_euclid may round tiny negatives up to exactly 360.
    if w >= 360.0 { 0.0 } else { w }
}

/// Largest number of frames a single sweep may produce (a full turn at 100 steps/degree
/// fits comfortably).
pub(crate) const MAX_FRAMES: usize = 1 << 16;

/// Whole rotation steps covering `range_deg` at `steps_per_degree`, before any ceiling.
///
/// Non-positive or non-finite inputs give zero; the result saturates for huge products.
pub(crate) fn raw_frame_count(range_deg: f64, steps_per_degree: f64) -> f64 {
    if !range_deg.is_finite() || !steps_per_degree.is_finite() || steps_per_degree <= 0.0 {
        return 0.0;
    }
    let n = (range_deg.abs() * steps_per_degree).floor();
    if n.is_nan() || n <= 0.0 { 0.0 } else { n }
}

/// Number of whole rotation steps covering `range_deg` at `steps_per_degree`.
///
/// Degenerate inputs and sweeps above [`MAX_FRAMES`] produce zero frames.
pub(crate) fn frame_count(range_deg: f64, steps_per_degree: f64) -> usize {
    let n = raw_frame_count(range_deg, steps_per_degree);
    if n > MAX_FRAMES as f64 { 0 } else { n as usize }
}

/// Snap `v` to the nearest integer when it is within `eps` of it.
///
/// Used before `ceil` on rotated extents so that exact quarter turns do not grow by a
/// pixel because of `sin`/`cos` noise.
pub(crate) fn snap(v: f64, eps: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() <= eps { r } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
