//! Stepped random voice.
//!
//! A note starts a step clock. Every step draws a new quantized pitch and two random CV
//! targets from the note's own LCG, and all three are slewed towards their targets.
//!
//! Knobs:
//! - *0:* step rate, 1/3 Hz to 30 Hz, exponential.
//! - *1:* output level, also scales CV 1.
//! - *2:* CV 2 scale.
//! - *3:* slew time, 0 to 1 s, linear.
//!
//! The encoder edits root, octave range and tuning. Pressing it cycles through the
//! [`UiMode`]s.

use super::{ActiveNote, ControlFrame, ControlInput, Engine, Knobs, TriggerEvent};
use crate::quantizer::{OctaveRange, QuantizationMode, Root, Tuning};
use crate::slew::SlewLimiter;
use crate::utils::parameter_interpolator::ParameterInterpolator;
use crate::utils::units::{map_exponential, map_linear};
use crate::utils::{clamp_finite, clamp_unit};
use crate::{SampleRate, DEFAULT_SAMPLE_RATE};

/// Slowest step rate, one step every three seconds.
pub const MIN_STEP_RATE: f32 = 0.3333;
pub const MAX_STEP_RATE: f32 = 30.0;

pub const MAX_SLEW_TIME: f32 = 1.0;

/// CV outputs span `0..5` V.
pub const CV_FULL_SCALE: f32 = 5.0;

/// Pitch slew start value after init.
pub const INITIAL_FREQUENCY: f32 = 220.0;

/// Scale settings edited from the encoder.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RandomStepSettings {
    pub root: Root,
    pub octave_range: OctaveRange,
    pub tuning: Tuning,
}

impl RandomStepSettings {
    pub fn mode(&self) -> QuantizationMode {
        QuantizationMode::from_settings(self.root, self.octave_range, self.tuning)
    }
}

/// Parameter the encoder is editing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Root,
    Range,
    Tuning,
    Idle,
}

impl UiMode {
    pub const ALL: [Self; 4] = [Self::Root, Self::Range, Self::Tuning, Self::Idle];

    /// Mode selected by the next encoder press.
    pub fn next(self) -> Self {
        match self {
            Self::Root => Self::Range,
            Self::Range => Self::Tuning,
            Self::Tuning => Self::Idle,
            Self::Idle => Self::Root,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "[Root]",
            Self::Range => "[Range]",
            Self::Tuning => "[Just]",
            Self::Idle => "[Idle]",
        }
    }
}

/// Snapshot for a status display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomStepStatus {
    pub settings: RandomStepSettings,
    pub ui_mode: UiMode,
    pub frequency: f32,
    pub gate: bool,
}

#[derive(Debug, Clone)]
pub struct RandomStepEngine {
    sample_rate: SampleRate,
    settings: RandomStepSettings,
    ui_mode: UiMode,
    encoder_pressed: bool,

    note: ActiveNote,
    pitch_slew: SlewLimiter,
    cv_slews: [SlewLimiter; 2],

    // For interpolation of parameters.
    level: f32,
}

impl Default for RandomStepEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomStepEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            sample_rate: SampleRate::default(),
            settings: RandomStepSettings::default(),
            ui_mode: UiMode::default(),
            encoder_pressed: false,
            note: ActiveNote::default(),
            pitch_slew: SlewLimiter::default(),
            cv_slews: [SlewLimiter::default(), SlewLimiter::default()],
            level: 0.0,
        };
        engine.init(DEFAULT_SAMPLE_RATE);

        engine
    }

    #[inline]
    pub fn settings(&self) -> &RandomStepSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RandomStepSettings) {
        self.settings = settings;
    }

    #[inline]
    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    #[inline]
    pub fn active_note(&self) -> &ActiveNote {
        &self.note
    }

    pub fn status(&self) -> RandomStepStatus {
        RandomStepStatus {
            settings: self.settings,
            ui_mode: self.ui_mode,
            frequency: self.pitch_slew.value(),
            gate: self.note.on,
        }
    }

    /// Draws the next pitch and CV targets. Pitch first, then CV 2, then CV 1.
    fn draw(&mut self) {
        let frequency = self.settings.mode().frequency(&mut self.note.random);
        self.pitch_slew.set_destination(frequency);

        let cv2 = self.note.random.get_float() * CV_FULL_SCALE;
        self.cv_slews[1].set_destination(cv2);

        let cv1 = self.note.random.get_float() * CV_FULL_SCALE;
        self.cv_slews[0].set_destination(cv1);
    }

    fn edit(&mut self, increment: i32) {
        match self.ui_mode {
            UiMode::Root => {
                self.settings.root = self.settings.root.step(increment);
                log::debug!("Root: {}", self.settings.root.name());
            }
            UiMode::Range => {
                self.settings.octave_range = self.settings.octave_range.step(increment);
                log::debug!("Range: {:.1} oct", self.settings.octave_range.octaves());
            }
            UiMode::Tuning => {
                self.settings.tuning = self.settings.tuning.toggle();
                log::debug!("Just: {}", self.settings.tuning.is_just());
            }
            UiMode::Idle => {}
        }
    }
}

impl Engine for RandomStepEngine {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = SampleRate::new(sample_rate);

        self.pitch_slew.init(self.sample_rate.sample_rate_hz);
        self.pitch_slew.set_value(INITIAL_FREQUENCY);
        for slew in self.cv_slews.iter_mut() {
            slew.init(self.sample_rate.sample_rate_hz);
            slew.set_value(0.0);
        }

        self.note = ActiveNote::default();
        self.encoder_pressed = false;
        self.level = 0.0;
    }

    fn reset(&mut self) {
        self.note.stop();
        self.note.phase = 0.0;
        self.level = 0.0;
    }

    fn trigger(&mut self, event: TriggerEvent) {
        match event.normalized() {
            TriggerEvent::NoteOn { note, velocity } => {
                if self.note.on {
                    log::debug!("Retrigger: {} -> {}", self.note.note, note);
                } else {
                    log::debug!("Note on: {note} velocity {velocity}");
                }
                self.note.start(note);
                self.draw();
            }
            TriggerEvent::NoteOff { note } => {
                if self.note.matches(note) {
                    self.note.stop();
                    log::debug!("Note off: {note}");
                }
            }
        }
    }

    fn update_controls(&mut self, input: &ControlInput) {
        if input.encoder_pressed && !self.encoder_pressed {
            self.ui_mode = self.ui_mode.next();
            log::debug!("UI mode: {}", self.ui_mode.label());
        }
        self.encoder_pressed = input.encoder_pressed;

        if input.encoder_increment != 0 {
            self.edit(input.encoder_increment);
        }
    }

    #[inline]
    fn render(&mut self, knobs: &Knobs, frames: &mut [ControlFrame]) {
        let step_rate = map_exponential(knobs[0], MIN_STEP_RATE, MAX_STEP_RATE);
        let level_control = clamp_unit(knobs[1]);
        let cv2_scale = clamp_unit(knobs[2]);
        let slew_time = map_linear(knobs[3], 0.0, MAX_SLEW_TIME);

        self.pitch_slew.set_rise_fall(slew_time);
        for slew in self.cv_slews.iter_mut() {
            slew.set_rise_fall(slew_time);
        }

        if !self.note.on {
            self.level = 0.0;
            frames.fill(ControlFrame::silent(self.pitch_slew.value()));
            return;
        }

        let increment = step_rate * self.sample_rate.inv_sr;

        let mut level_state = self.level;
        {
            let mut level = ParameterInterpolator::new(&mut level_state, level_control, frames.len());

            for frame in frames.iter_mut() {
                self.note.phase += increment;
                if self.note.phase >= 1.0 {
                    self.note.phase -= 1.0;
                    self.draw();
                }

                let frequency = self.pitch_slew.process();
                let cv1 = self.cv_slews[0].process() * level_control;
                let cv2 = self.cv_slews[1].process() * cv2_scale;

                *frame = ControlFrame {
                    frequency,
                    frequency_aux: frequency,
                    level: clamp_unit(level.next()),
                    cv: [
                        clamp_finite(cv1, 0.0, CV_FULL_SCALE),
                        clamp_finite(cv2, 0.0, CV_FULL_SCALE),
                    ],
                };
            }
        }
        self.level = level_state;
    }

    fn gate(&self) -> bool {
        self.note.on
    }

    fn cv_full_scale(&self) -> f32 {
        CV_FULL_SCALE
    }
}
