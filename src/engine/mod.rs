//! Top-level module for the voice engines.
//!
//! An engine turns trigger events, knob blocks and encoder/button input into one
//! [`ControlFrame`] per audio sample. Engines never synthesize audio themselves; the host
//! feeds the frame's frequency and level into its oscillators and the CVs into its DAC.
//!
//! Calls fall into two contexts:
//! - audio callback: [`Engine::render`], once per block,
//! - control loop: [`Engine::trigger`] and [`Engine::update_controls`], at a slower cadence.

pub mod cv_quantizer_engine;
pub mod fractal_loop_engine;
pub mod fractal_note_engine;
pub mod random_step_engine;

use crate::utils::random::Random;

/// Number of normalized knob inputs read per block.
pub const NUM_KNOBS: usize = 4;

/// Knob positions, each in `[0, 1]`. Out-of-range values are clamped by the engines.
pub type Knobs = [f32; NUM_KNOBS];

/// Highest MIDI note number and velocity.
pub const MIDI_DATA_MASK: u8 = 0x7F;

pub trait Engine {
    fn init(&mut self, sample_rate: f32);

    /// Returns to the idle state without touching settings.
    fn reset(&mut self) {}

    fn trigger(&mut self, _event: TriggerEvent) {}

    fn update_controls(&mut self, _input: &ControlInput) {}

    /// Renders one frame per sample. `knobs` is read once for the whole block.
    fn render(&mut self, knobs: &Knobs, frames: &mut [ControlFrame]);

    /// State of the gate output.
    fn gate(&self) -> bool;

    /// Voltage that maps to the full DAC code for this engine's CV outputs.
    fn cv_full_scale(&self) -> f32 {
        5.0
    }
}

/// Note events from the trigger stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
}

impl TriggerEvent {
    /// Masks note and velocity to 7 bits and turns a note-on with velocity 0 into a note-off.
    pub fn normalized(self) -> Self {
        match self {
            Self::NoteOn { note, velocity } if velocity & MIDI_DATA_MASK == 0 => Self::NoteOff {
                note: note & MIDI_DATA_MASK,
            },
            Self::NoteOn { note, velocity } => Self::NoteOn {
                note: note & MIDI_DATA_MASK,
                velocity: velocity & MIDI_DATA_MASK,
            },
            Self::NoteOff { note } => Self::NoteOff {
                note: note & MIDI_DATA_MASK,
            },
        }
    }
}

/// Digital controls sampled by the control loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlInput {
    /// Detents turned since the last poll, positive clockwise.
    pub encoder_increment: i32,

    /// Encoder push button, current level.
    pub encoder_pressed: bool,

    /// Push buttons, current level.
    pub buttons: [bool; 2],
}

/// Control outputs for one sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ControlFrame {
    /// Oscillator frequency in Hz.
    pub frequency: f32,

    /// Frequency for a second oscillator. Mono engines repeat `frequency`.
    pub frequency_aux: f32,

    /// Output level in `[0, 1]`. Zero while idle.
    pub level: f32,

    /// CV outputs in volts, `[0, cv_full_scale]`.
    pub cv: [f32; 2],
}

impl ControlFrame {
    /// Idle frame: no level, no CV. The frequency is kept so oscillators don't jump.
    #[inline]
    pub fn silent(frequency: f32) -> Self {
        Self {
            frequency,
            frequency_aux: frequency,
            level: 0.0,
            cv: [0.0; 2],
        }
    }
}

/// The note currently owning a triggered engine.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ActiveNote {
    /// Gate state.
    pub on: bool,

    /// Note number of the trigger.
    pub note: u8,

    /// Noise state, reseeded from the note number on every trigger.
    pub random: Random,

    /// Step phase in `[0, 1)` or elapsed seconds, depending on the engine.
    pub phase: f32,
}

impl ActiveNote {
    /// Starts or retriggers. A new note replaces the current one.
    pub fn start(&mut self, note: u8) {
        self.on = true;
        self.note = note & MIDI_DATA_MASK;
        self.random = Random::for_note(self.note);
        self.phase = 0.0;
    }

    pub fn stop(&mut self) {
        self.on = false;
    }

    /// True if the note is sounding and was started by `note`.
    #[inline]
    pub fn matches(&self, note: u8) -> bool {
        self.on && self.note == note & MIDI_DATA_MASK
    }
}
