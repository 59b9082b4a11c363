//! Scale quantizers.
//!
//! Map a continuous noise value onto a musically constrained frequency under one of three
//! policies:
//! - unquantized: linear mapping onto a fixed band,
//! - equal temperament: semitone pick snapped down to the major scale above a root,
//! - just intonation: a just major ratio above the root, times a random whole octave.
//!
//! All functions are total. Unit inputs are clamped to `[0, 1]`, MIDI notes to `0..=127`,
//! and every returned frequency is positive.

pub mod cv;
pub mod fractal;
pub mod scales;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::random::Random;
use crate::utils::units::{midi_to_frequency, MAX_MIDI_NOTE};
use crate::utils::{clamp_finite, clamp_unit};
use scales::{snap_to_major, JUST_MAJOR_WITH_OCTAVE};

/// Lower edge of the unquantized band in Hz.
pub const MIN_FREQUENCY: f32 = 50.0;

/// Upper edge of the unquantized band in Hz.
pub const MAX_FREQUENCY: f32 = 2000.0;

/// MIDI note the scales are built on (C3). The root's semitone is added to it.
pub const BASE_NOTE: i32 = 48;

pub const MIN_BASE_FREQUENCY: f32 = 1.0;
pub const MAX_BASE_FREQUENCY: f32 = 10000.0;

/// Display names indexed by [`Root::index`].
pub const ROOT_NAMES: [&str; 13] = [
    "None", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scale root: either none (unquantized) or a pitch class `0..=11` (C..B).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    #[default]
    None,
    PitchClass(u8),
}

impl Root {
    /// Builds a root from a UI index, `0` = none, `1..=12` = C..B. Clamped.
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, 12) {
            0 => Self::None,
            i => Self::PitchClass((i - 1) as u8),
        }
    }

    pub fn index(&self) -> i32 {
        match self {
            Self::None => 0,
            Self::PitchClass(pc) => (*pc).min(11) as i32 + 1,
        }
    }

    /// Semitone above C, if any.
    pub fn semitone(&self) -> Option<i32> {
        match self {
            Self::None => None,
            Self::PitchClass(pc) => Some((*pc).min(11) as i32),
        }
    }

    pub fn name(&self) -> &'static str {
        ROOT_NAMES[self.index() as usize]
    }

    /// Moves the root by `increment` UI steps, stopping at `None` and `B`.
    pub fn step(&self, increment: i32) -> Self {
        Self::from_index(self.index().saturating_add(increment))
    }
}

/// Octave span of the random scales, `0.5..=6.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveRange(f32);

impl OctaveRange {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 6.0;

    /// Change per encoder detent.
    pub const STEP: f32 = 0.5;

    pub fn new(octaves: f32) -> Self {
        Self(clamp_finite(octaves, Self::MIN, Self::MAX))
    }

    #[inline]
    pub fn octaves(&self) -> f32 {
        self.0
    }

    /// Whole octaves the just scale may transpose by.
    #[inline]
    pub fn whole_octaves(&self) -> i32 {
        self.0.floor() as i32
    }

    /// Semitone span of the equal-tempered scale.
    #[inline]
    pub fn semitones(&self) -> f32 {
        12.0 * self.0
    }

    pub fn step(&self, increment: i32) -> Self {
        Self::new(self.0 + Self::STEP * increment as f32)
    }
}

impl Default for OctaveRange {
    fn default() -> Self {
        Self(1.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tuning {
    #[default]
    EqualTemperament,
    JustIntonation,
}

impl Tuning {
    pub fn toggle(&self) -> Self {
        match self {
            Self::EqualTemperament => Self::JustIntonation,
            Self::JustIntonation => Self::EqualTemperament,
        }
    }

    pub fn is_just(&self) -> bool {
        matches!(self, Self::JustIntonation)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum QuantizationMode {
    #[default]
    Unquantized,

    /// Major scale in 12-TET above `root` (pitch class `0..=11`).
    EqualTemperamentScale { root: u8, octave_range: OctaveRange },

    /// Just major scale above `root` (pitch class `0..=11`).
    JustIntonationScale { root: u8, octave_range: OctaveRange },
}

impl QuantizationMode {
    /// Mode selected by the UI settings. No root means unquantized regardless of tuning.
    pub fn from_settings(root: Root, octave_range: OctaveRange, tuning: Tuning) -> Self {
        match (root, tuning) {
            (Root::None, _) => Self::Unquantized,
            (Root::PitchClass(root), Tuning::EqualTemperament) => Self::EqualTemperamentScale {
                root: root.min(11),
                octave_range,
            },
            (Root::PitchClass(root), Tuning::JustIntonation) => Self::JustIntonationScale {
                root: root.min(11),
                octave_range,
            },
        }
    }

    /// Draws a new frequency from `random`.
    ///
    /// Unquantized and equal-tempered modes consume one value, just intonation consumes
    /// two (ratio, then octave).
    pub fn frequency(&self, random: &mut Random) -> f32 {
        match *self {
            Self::Unquantized => unquantized_frequency(random.get_float()),
            Self::EqualTemperamentScale { root, octave_range } => {
                equal_tempered_frequency(random.get_float(), root, octave_range)
            }
            Self::JustIntonationScale { root, octave_range } => {
                let ratio_pick = random.get_float();
                let octave_pick = random.get_float();
                just_frequency(ratio_pick, octave_pick, root, octave_range)
            }
        }
    }
}

/// Linear mapping of `[0, 1]` onto [`MIN_FREQUENCY`]..[`MAX_FREQUENCY`].
#[inline]
pub fn unquantized_frequency(value: f32) -> f32 {
    MIN_FREQUENCY + (MAX_FREQUENCY - MIN_FREQUENCY) * clamp_unit(value)
}

/// MIDI note of the major scale degree picked by `value` in `[0, 1]`.
///
/// `value` selects a semitone within the octave range. The semitone within its octave is
/// snapped down to the major scale, then the root and [`BASE_NOTE`] are added.
#[inline]
pub fn equal_tempered_note(value: f32, root: u8, octave_range: OctaveRange) -> i32 {
    let pick = (clamp_unit(value) * octave_range.semitones()) as i32;
    let full_octaves = pick.div_euclid(12);
    let leftover = pick.rem_euclid(12);

    let semitones = full_octaves * 12 + snap_to_major(leftover) + root.min(11) as i32;

    (BASE_NOTE + semitones).clamp(0, MAX_MIDI_NOTE)
}

#[inline]
pub fn equal_tempered_frequency(value: f32, root: u8, octave_range: OctaveRange) -> f32 {
    midi_to_frequency(equal_tempered_note(value, root, octave_range))
}

/// Frequency of the root note the scales are built on.
#[inline]
pub fn root_frequency(root: u8) -> f32 {
    midi_to_frequency(BASE_NOTE + root.min(11) as i32)
}

/// Index into [`JUST_MAJOR_WITH_OCTAVE`] picked by `value` in `[0, 1]`.
#[inline]
pub fn just_ratio_index(value: f32) -> usize {
    let size = JUST_MAJOR_WITH_OCTAVE.len();
    ((clamp_unit(value) * size as f32) as usize).min(size - 1)
}

/// Whole octave `0..=floor(range)` picked by `value` in `[0, 1]`.
#[inline]
pub fn just_octave(value: f32, octave_range: OctaveRange) -> i32 {
    let max_octave = octave_range.whole_octaves();
    ((clamp_unit(value) * (max_octave + 1) as f32) as i32).min(max_octave)
}

/// `root_frequency * ratio * 2^octave` with ratio and octave picked independently.
#[inline]
pub fn just_frequency(ratio_pick: f32, octave_pick: f32, root: u8, octave_range: OctaveRange) -> f32 {
    let ratio = JUST_MAJOR_WITH_OCTAVE[just_ratio_index(ratio_pick)];
    let octave = just_octave(octave_pick, octave_range);

    root_frequency(root) * ratio * (octave as f32).exp2()
}
