//! Unit conversions: pitch, voltage and knob curves.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::{clamp_finite, clamp_unit};

/// Highest valid MIDI note number.
pub const MAX_MIDI_NOTE: i32 = 127;

/// Full-scale code of the 12-bit DAC.
pub const DAC_MAX_CODE: u16 = 4095;

#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    (semitones / 12.0).exp2()
}

/// Frequency of a MIDI note in Hz (A4 = note 69 = 440 Hz). The note is clamped to `0..=127`.
#[inline]
pub fn midi_to_frequency(note: i32) -> f32 {
    let note = note.clamp(0, MAX_MIDI_NOTE);
    440.0 * semitones_to_ratio((note - 69) as f32)
}

/// Converts a voltage into a DAC code where `full_scale` volts map to [`DAC_MAX_CODE`].
///
/// The voltage is clamped to `[0, full_scale]` first. Codes are truncated, not rounded.
#[inline]
pub fn volts_to_dac(volts: f32, full_scale: f32) -> u16 {
    if full_scale.is_nan() || full_scale <= 0.0 {
        return 0;
    }
    let volts = clamp_finite(volts, 0.0, full_scale);
    ((volts / full_scale) * DAC_MAX_CODE as f32) as u16
}

/// Maps a knob position in `[0, 1]` linearly onto `[min, max]`.
#[inline]
pub fn map_linear(control: f32, min: f32, max: f32) -> f32 {
    min + (max - min) * clamp_unit(control)
}

/// Maps a knob position in `[0, 1]` exponentially onto `[min, max]`:
/// `min * (max / min) ^ control`. Both bounds must be positive.
#[inline]
pub fn map_exponential(control: f32, min: f32, max: f32) -> f32 {
    min * (max / min).powf(clamp_unit(control))
}
