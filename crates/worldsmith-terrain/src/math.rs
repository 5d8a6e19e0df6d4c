//! Scalar helpers shared by the generators.

/// Map `value` linearly from `[in_min, in_max]` to `[out_min, out_max]`.
/// Not clamped.
#[inline]
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Polynomial smooth minimum. `k` is the blend width; `k <= 0` is a hard min.
#[inline]
pub fn smooth_min(a: f64, b: f64, k: f64) -> f64 {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    a * h + b * (1.0 - h) - k * h * (1.0 - h)
}

/// Polynomial smooth maximum, the mirror of [`smooth_min`].
#[inline]
pub fn smooth_max(a: f64, b: f64, k: f64) -> f64 {
    -smooth_min(-a, -b, k)
}
