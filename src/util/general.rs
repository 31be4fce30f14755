//! General-purpose utility functions.

/// Maps a value from the provided input range to the provided output range.
#[inline]
pub fn map_f32(
    value: f32,
    in_min: f32,
    in_max: f32,
    out_min: f32,
    out_max: f32,
) -> f32 {
    scale_f32(normalize_f32(value, in_min, in_max), out_min, out_max)
}

/// Scales a value to a provided range, assuming it is normalised.
///
/// Like `map_f32()`, but with no input range.
#[inline]
pub fn scale_f32(value: f32, min: f32, max: f32) -> f32 {
    value.mul_add(max - min, min)
}

/// Normalizes a value from a provided range.
///
/// Like `map_f32()`, but with the output range set to `0.0 - 1.0`.
#[inline]
pub fn normalize_f32(value: f32, min: f32, max: f32) -> f32 {
    (value - min) / (max - min)
}

/// Clamps `value` to `0.0 - 1.0`. `NaN` becomes `0.0`.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x2 - x1).hypot(y2 - y1)
}
