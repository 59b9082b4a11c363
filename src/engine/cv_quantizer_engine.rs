//! Knob-driven CV quantizer.
//!
//! Knob 0 sets an input voltage of 0 to 8 V. Once per block it is quantized to the nearest
//! semitone, equal-tempered on CV 1 and just on CV 2. The engine is silent and never
//! opens the gate.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::{ControlFrame, Engine, Knobs};
use crate::quantizer::cv::{quantize_cv, CV_FULL_SCALE};
use crate::quantizer::Tuning;
use crate::utils::units::map_linear;

/// Frequency at 0 V on the 1 V/octave scale (C1).
pub const ZERO_VOLT_FREQUENCY: f32 = 32.703_196;

/// Snapshot for a status display.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CvQuantizerStatus {
    pub input: f32,
    pub equal_tempered: f32,
    pub just: f32,
}

#[derive(Debug, Default, Clone)]
pub struct CvQuantizerEngine {
    status: CvQuantizerStatus,
}

impl CvQuantizerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn status(&self) -> CvQuantizerStatus {
        self.status
    }
}

impl Engine for CvQuantizerEngine {
    fn init(&mut self, _sample_rate: f32) {
        self.status = CvQuantizerStatus::default();
    }

    #[inline]
    fn render(&mut self, knobs: &Knobs, frames: &mut [ControlFrame]) {
        let input = map_linear(knobs[0], 0.0, CV_FULL_SCALE);
        let equal_tempered = quantize_cv(input, Tuning::EqualTemperament);
        let just = quantize_cv(input, Tuning::JustIntonation);

        self.status = CvQuantizerStatus {
            input,
            equal_tempered,
            just,
        };

        let frame = ControlFrame {
            frequency: ZERO_VOLT_FREQUENCY * equal_tempered.exp2(),
            frequency_aux: ZERO_VOLT_FREQUENCY * just.exp2(),
            level: 0.0,
            cv: [
                equal_tempered.clamp(0.0, CV_FULL_SCALE),
                just.clamp(0.0, CV_FULL_SCALE),
            ],
        };
        frames.fill(frame);
    }

    fn gate(&self) -> bool {
        false
    }

    fn cv_full_scale(&self) -> f32 {
        CV_FULL_SCALE
    }
}
