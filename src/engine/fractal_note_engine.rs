//! Note-triggered fractal voice.
//!
//! A note plays for a fixed duration. During that time the pitch follows an fBm curve
//! evaluated every sample at `(elapsed + zoom_point) * zoom_factor`, mapped onto the
//! 50..2000 Hz band and slewed.
//!
//! Knobs:
//! - *0:* zoom factor, 1 to 3, exponential. Latched on note on.
//! - *1:* zoom point, 0 to 5. Latched on note on.
//! - *2:* slew time, 0 to 1 s.
//! - *3:* output level.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::{ActiveNote, ControlFrame, Engine, Knobs, TriggerEvent};
use crate::noise::{fbm, FbmParameters, PermutationTable};
use crate::quantizer::fractal::{fractal_to_frequency, normalize};
use crate::slew::SlewLimiter;
use crate::utils::parameter_interpolator::ParameterInterpolator;
use crate::utils::units::map_linear;
use crate::utils::{clamp_finite, clamp_unit};
use crate::{SampleRate, DEFAULT_SAMPLE_RATE};

/// Length of a note in seconds.
pub const NOTE_DURATION: f32 = 5.0;

/// Zoom factor at full knob, `MAX_ZOOM ^ knob`.
pub const MAX_ZOOM: f32 = 3.0;

pub const MAX_ZOOM_POINT: f32 = 5.0;

pub const MAX_SLEW_TIME: f32 = 1.0;

pub const INITIAL_FREQUENCY: f32 = 220.0;

/// Snapshot for a status display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoteStatus {
    pub zoom_factor: f32,
    pub zoom_point: f32,
    /// Seconds since the note started.
    pub elapsed: f32,
    pub frequency: f32,
    pub gate: bool,
}

#[derive(Debug, Clone)]
pub struct FractalNoteEngine {
    table: &'static PermutationTable,
    parameters: FbmParameters,
    sample_rate: SampleRate,

    note: ActiveNote,
    duration: f32,
    zoom_factor: f32,
    zoom_point: f32,
    knobs: Knobs,

    pitch_slew: SlewLimiter,

    // For interpolation of parameters.
    level: f32,
}

impl Default for FractalNoteEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FractalNoteEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            table: PermutationTable::get(),
            parameters: FbmParameters::NOTE,
            sample_rate: SampleRate::default(),
            note: ActiveNote::default(),
            duration: NOTE_DURATION,
            zoom_factor: 1.0,
            zoom_point: 0.0,
            knobs: [0.0; 4],
            pitch_slew: SlewLimiter::default(),
            level: 0.0,
        };
        engine.init(DEFAULT_SAMPLE_RATE);

        engine
    }

    #[inline]
    pub fn parameters(&self) -> &FbmParameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: FbmParameters) {
        self.parameters = parameters;
    }

    /// Note length in seconds, clamped to `0.01..=60`.
    pub fn set_duration(&mut self, seconds: f32) {
        self.duration = clamp_finite(seconds, 0.01, 60.0);
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn active_note(&self) -> &ActiveNote {
        &self.note
    }

    pub fn status(&self) -> FractalNoteStatus {
        FractalNoteStatus {
            zoom_factor: self.zoom_factor,
            zoom_point: self.zoom_point,
            elapsed: self.note.phase,
            frequency: self.pitch_slew.value(),
            gate: self.note.on,
        }
    }

    /// Noise coordinate for a point in time of the note.
    #[inline]
    fn domain(&self, elapsed: f32) -> f32 {
        (elapsed + self.zoom_point) * self.zoom_factor
    }

    /// Samples the curve the current zoom settings produce over one note, normalized to
    /// `[0, 1]`, for drawing.
    pub fn preview(&self, points: &mut [f32]) {
        let intervals = points.len().saturating_sub(1).max(1) as f32;
        let step = self.duration / intervals;

        for (i, point) in points.iter_mut().enumerate() {
            let value = fbm(self.table, self.domain(i as f32 * step), &self.parameters);
            *point = normalize(value);
        }
    }
}

impl Engine for FractalNoteEngine {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = SampleRate::new(sample_rate);
        self.pitch_slew.init(self.sample_rate.sample_rate_hz);
        self.pitch_slew.set_value(INITIAL_FREQUENCY);
        self.note = ActiveNote::default();
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
                self.note.start(note);
                self.zoom_factor = MAX_ZOOM.powf(clamp_unit(self.knobs[0]));
                self.zoom_point = map_linear(self.knobs[1], 0.0, MAX_ZOOM_POINT);
                log::debug!(
                    "Note on: {note} velocity {velocity}, zoom {:.3} at {:.3}",
                    self.zoom_factor,
                    self.zoom_point
                );
            }
            TriggerEvent::NoteOff { note } => {
                if self.note.matches(note) {
                    self.note.stop();
                    log::debug!("Note off: {note}");
                }
            }
        }
    }

    #[inline]
    fn render(&mut self, knobs: &Knobs, frames: &mut [ControlFrame]) {
        self.knobs = *knobs;

        let slew_time = map_linear(knobs[2], 0.0, MAX_SLEW_TIME);
        let level_control = clamp_unit(knobs[3]);
        self.pitch_slew.set_rise_fall(slew_time);

        let mut level_state = self.level;
        {
            let mut level = ParameterInterpolator::new(&mut level_state, level_control, frames.len());

            for frame in frames.iter_mut() {
                let gain = level.next();

                if !self.note.on {
                    *frame = ControlFrame::silent(self.pitch_slew.value());
                    continue;
                }

                self.note.phase += self.sample_rate.inv_sr;
                if self.note.phase >= self.duration {
                    self.note.stop();
                    *frame = ControlFrame::silent(self.pitch_slew.value());
                    continue;
                }

                let value = fbm(self.table, self.domain(self.note.phase), &self.parameters);
                self.pitch_slew.set_destination(fractal_to_frequency(value));
                let frequency = self.pitch_slew.process();

                *frame = ControlFrame {
                    frequency,
                    frequency_aux: frequency,
                    level: clamp_unit(gain),
                    cv: [0.0; 2],
                };
            }
        }
        self.level = if self.note.on { level_state } else { 0.0 };
    }

    fn gate(&self) -> bool {
        self.note.on
    }
}
