//! 1 V/octave CV quantizer.
//!
//! Rounds an incoming control voltage to the nearest semitone and rebuilds it either
//! equal-tempered or with the semitone replaced by its just ratio.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::scales::JUST_CHROMATIC;
use super::Tuning;
use crate::utils::clamp_finite;

/// Input CV span of the knob-driven quantizer, in volts.
pub const CV_FULL_SCALE: f32 = 8.0;

/// Inputs are limited to this many volts either side of zero.
pub const CV_LIMIT: f32 = 16.0;

/// Splits a voltage into its octave and the nearest semitone of that octave.
///
/// A fractional part that rounds up to 12 carries into the next octave.
#[inline]
pub fn split_semitone(volts: f32) -> (i32, usize) {
    let volts = if volts.is_nan() {
        0.0
    } else {
        clamp_finite(volts, -CV_LIMIT, CV_LIMIT)
    };

    let mut octave = volts.floor() as i32;
    let fraction = volts - octave as f32;

    let mut semitone = ((fraction * 12.0).round() as i32).clamp(0, 12);
    if semitone >= 12 {
        semitone = 0;
        octave += 1;
    }

    (octave, semitone as usize)
}

/// Quantizes `volts` to the nearest semitone.
#[inline]
pub fn quantize_cv(volts: f32, tuning: Tuning) -> f32 {
    let (octave, semitone) = split_semitone(volts);

    match tuning {
        Tuning::EqualTemperament => octave as f32 + semitone as f32 / 12.0,
        Tuning::JustIntonation => octave as f32 + JUST_CHROMATIC[semitone].log2(),
    }
}
