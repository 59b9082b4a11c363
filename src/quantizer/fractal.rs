//! Mappings from fractal noise values to frequencies.
//!
//! fBm values are clamped to `[-FRACTAL_RANGE, FRACTAL_RANGE]` and rescaled to `[0, 1]`
//! before mapping. The clamp range is a tuning constant. With the parameter sets in
//! [`FbmParameters`](crate::noise::FbmParameters) the noise stays well inside it.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::scales::JUST_MAJOR;
use super::{unquantized_frequency, MAX_BASE_FREQUENCY, MIN_BASE_FREQUENCY};
use crate::utils::clamp_finite;

pub const FRACTAL_RANGE: f32 = 2.0;

/// Root of the just scale used by the looping voice (A1).
pub const JUST_BASE_FREQUENCY: f32 = 55.0;

/// Octaves spanned by the looping voice.
pub const JUST_OCTAVES: usize = 4;

/// Widest span accepted by [`fractal_to_just_major`].
pub const MAX_OCTAVES: usize = 8;

/// Maps a fractal value to `[0, 1]`.
#[inline]
pub fn normalize(value: f32) -> f32 {
    (clamp_finite(value, -FRACTAL_RANGE, FRACTAL_RANGE) + FRACTAL_RANGE) / (2.0 * FRACTAL_RANGE)
}

/// Unquantized mapping onto the 50..2000 Hz band.
#[inline]
pub fn fractal_to_frequency(value: f32) -> f32 {
    unquantized_frequency(normalize(value))
}

/// Scale step of the just major scale spanning `octaves` octaves, `0..7 * octaves`.
#[inline]
pub fn just_major_step(value: f32, octaves: usize) -> usize {
    let steps = JUST_MAJOR.len() * octaves.clamp(1, MAX_OCTAVES);
    let scaled = normalize(value) * steps as f32;

    (scaled.floor() as usize).min(steps - 1)
}

/// Just major scale above `base_frequency` spanning `octaves` octaves.
#[inline]
pub fn fractal_to_just_major(value: f32, base_frequency: f32, octaves: usize) -> f32 {
    let step = just_major_step(value, octaves);
    let octave = step / JUST_MAJOR.len();
    let ratio = JUST_MAJOR[step % JUST_MAJOR.len()] * (1u32 << octave) as f32;

    clamp_finite(base_frequency, MIN_BASE_FREQUENCY, MAX_BASE_FREQUENCY) * ratio
}
