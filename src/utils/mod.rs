//! Utility functions.
//!
//! Small helpers shared by the noise sources, quantizers and engines. Everything here is
//! total: out-of-range or non-finite inputs are clamped instead of rejected.

pub mod parameter_interpolator;
pub mod random;
pub mod units;

/// Clamps `value` to `[min, max]`, mapping NaN to `min`.
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Clamps a normalized control value to `[0, 1]`, mapping NaN to `0`.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    clamp_finite(value, 0.0, 1.0)
}
