//! Free-running stereo fractal voice.
//!
//! A loop timer sweeps the fBm field over a window of `loop_length` seconds, scaled by the
//! zoom factor. A second, decimated timer evaluates the field a few times per second for
//! both channels (the right one slightly offset and with its own fBm parameters), quantizes
//! the values to a just major scale and hands them to the pitch slews.
//!
//! Knobs:
//! - *0:* loop length, 0.5 to 3 s.
//! - *1:* evaluation rate, 1 to 15 Hz.
//!
//! The encoder sets the slew time, the two buttons zoom in and out while held.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::{ControlFrame, ControlInput, Engine, Knobs};
use crate::noise::{fbm, FbmParameters, PermutationTable};
use crate::quantizer::fractal::{fractal_to_just_major, JUST_BASE_FREQUENCY, JUST_OCTAVES};
use crate::slew::SlewLimiter;
use crate::utils::units::map_linear;
use crate::utils::{clamp_finite, clamp_unit};
use crate::{SampleRate, DEFAULT_SAMPLE_RATE};

/// Three octaves below the unzoomed field.
pub const MIN_ZOOM: f32 = 0.125;

/// Five octaves above the unzoomed field.
pub const MAX_ZOOM: f32 = 32.0;

/// Zoom change per control tick while a button is held.
pub const ZOOM_STEP: f32 = 0.01;

pub const MIN_LOOP_LENGTH: f32 = 0.5;
pub const MAX_LOOP_LENGTH: f32 = 3.0;

pub const MIN_EVAL_RATE: f32 = 1.0;
pub const MAX_EVAL_RATE: f32 = 15.0;

pub const MAX_SLEW_TIME: f32 = 2.0;

/// Slew change per encoder detent in seconds.
pub const SLEW_STEP: f32 = 0.006;

/// Domain offset of the right channel.
pub const VOICE_OFFSET: f32 = 0.4;

pub const INITIAL_FREQUENCY: f32 = 440.0;

/// Fixed output level of both oscillators.
pub const LEVEL: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalLoopSettings {
    /// Zoom factor, `0.125..=32`.
    pub zoom_factor: f32,

    /// Slew time in seconds, `0..=2`.
    pub slew_time: f32,
}

impl Default for FractalLoopSettings {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            slew_time: 0.02,
        }
    }
}

/// Snapshot for a status display or indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalLoopStatus {
    pub settings: FractalLoopSettings,
    pub loop_length: f32,
    pub eval_rate: f32,
    /// Zoom factor on a log scale, `0..=1` between [`MIN_ZOOM`] and [`MAX_ZOOM`].
    pub zoom_indicator: f32,
    /// Evaluation rate, `0..=1` between [`MIN_EVAL_RATE`] and [`MAX_EVAL_RATE`].
    pub eval_indicator: f32,
    pub frequencies: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct FractalLoopEngine {
    table: &'static PermutationTable,
    parameters: [FbmParameters; 2],
    sample_rate: SampleRate,
    settings: FractalLoopSettings,

    loop_length: f32,
    eval_rate: f32,
    loop_time: f32,
    eval_timer: f32,
    pending_evaluation: bool,

    slews: [SlewLimiter; 2],
}

impl Default for FractalLoopEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FractalLoopEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            table: PermutationTable::get(),
            parameters: [FbmParameters::LOOP_LEFT, FbmParameters::LOOP_RIGHT],
            sample_rate: SampleRate::default(),
            settings: FractalLoopSettings::default(),
            loop_length: 2.0,
            eval_rate: 3.0,
            loop_time: 0.0,
            eval_timer: 0.0,
            pending_evaluation: true,
            slews: [SlewLimiter::default(), SlewLimiter::default()],
        };
        engine.init(DEFAULT_SAMPLE_RATE);

        engine
    }

    #[inline]
    pub fn settings(&self) -> &FractalLoopSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: FractalLoopSettings) {
        self.settings = FractalLoopSettings {
            zoom_factor: clamp_finite(settings.zoom_factor, MIN_ZOOM, MAX_ZOOM),
            slew_time: clamp_finite(settings.slew_time, 0.0, MAX_SLEW_TIME),
        };
    }

    /// Seconds into the current loop.
    #[inline]
    pub fn loop_time(&self) -> f32 {
        self.loop_time
    }

    pub fn status(&self) -> FractalLoopStatus {
        let min_log = MIN_ZOOM.log2();
        let max_log = MAX_ZOOM.log2();
        let zoom_indicator = (self.settings.zoom_factor.log2() - min_log) / (max_log - min_log);
        let eval_indicator = (self.eval_rate - MIN_EVAL_RATE) / (MAX_EVAL_RATE - MIN_EVAL_RATE);

        FractalLoopStatus {
            settings: self.settings,
            loop_length: self.loop_length,
            eval_rate: self.eval_rate,
            zoom_indicator: clamp_unit(zoom_indicator),
            eval_indicator: clamp_unit(eval_indicator),
            frequencies: [self.slews[0].value(), self.slews[1].value()],
        }
    }

    fn evaluate(&mut self) {
        let domain = self.loop_time * self.settings.zoom_factor;
        let domains = [domain, domain + VOICE_OFFSET];

        for ((slew, parameters), x) in self
            .slews
            .iter_mut()
            .zip(self.parameters.iter())
            .zip(domains)
        {
            let value = fbm(self.table, x, parameters);
            slew.set_destination(fractal_to_just_major(
                value,
                JUST_BASE_FREQUENCY,
                JUST_OCTAVES,
            ));
        }
    }
}

impl Engine for FractalLoopEngine {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = SampleRate::new(sample_rate);
        for slew in self.slews.iter_mut() {
            slew.init(self.sample_rate.sample_rate_hz);
            slew.set_value(INITIAL_FREQUENCY);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.loop_time = 0.0;
        self.eval_timer = 0.0;
        self.pending_evaluation = true;
    }

    fn update_controls(&mut self, input: &ControlInput) {
        if input.encoder_increment != 0 {
            self.settings.slew_time = clamp_finite(
                self.settings.slew_time + SLEW_STEP * input.encoder_increment as f32,
                0.0,
                MAX_SLEW_TIME,
            );
            log::debug!("Slew: {:.3} s", self.settings.slew_time);
        }

        let zoom = self.settings.zoom_factor;
        if input.buttons[0] {
            self.settings.zoom_factor = (self.settings.zoom_factor + ZOOM_STEP).min(MAX_ZOOM);
        }
        if input.buttons[1] {
            self.settings.zoom_factor = (self.settings.zoom_factor - ZOOM_STEP).max(MIN_ZOOM);
        }
        if self.settings.zoom_factor != zoom {
            log::debug!("Zoom: {:.3}", self.settings.zoom_factor);
        }
    }

    #[inline]
    fn render(&mut self, knobs: &Knobs, frames: &mut [ControlFrame]) {
        self.loop_length = map_linear(knobs[0], MIN_LOOP_LENGTH, MAX_LOOP_LENGTH);
        self.eval_rate = map_linear(knobs[1], MIN_EVAL_RATE, MAX_EVAL_RATE);
        let eval_interval = 1.0 / self.eval_rate;

        for slew in self.slews.iter_mut() {
            slew.set_rise_fall(self.settings.slew_time);
        }

        let dt = self.sample_rate.inv_sr;

        for frame in frames.iter_mut() {
            self.loop_time += dt;
            if self.loop_time >= self.loop_length {
                self.loop_time %= self.loop_length;
            }

            self.eval_timer += dt;
            if self.pending_evaluation || self.eval_timer >= eval_interval {
                self.pending_evaluation = false;
                self.eval_timer = 0.0;
                self.evaluate();
            }

            *frame = ControlFrame {
                frequency: self.slews[0].process(),
                frequency_aux: self.slews[1].process(),
                level: LEVEL,
                cv: [0.0; 2],
            };
        }
    }

    fn gate(&self) -> bool {
        true
    }
}
