//! Linear congruential pseudo random number generator.
//!
//! Unlike a process-wide generator, every voice owns its own [`Random`] so that reseeding one
//! voice never disturbs the sequence of another.

/// Multiplier of the generator (Numerical Recipes constants).
pub const MULTIPLIER: u32 = 1664525;

/// Increment of the generator.
pub const INCREMENT: u32 = 1013904223;

/// Seed used by [`Random::default`].
pub const DEFAULT_SEED: u32 = 0x21;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Random {
    state: u32,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Random {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Deterministic generator for a note number, so the same key always plays the same
    /// sequence.
    pub fn for_note(note: u8) -> Self {
        Self::new(note_seed(note))
    }

    #[inline]
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns it.
    #[inline]
    pub fn get_word(&mut self) -> u32 {
        self.state = next_state(self.state);
        self.state
    }

    #[inline]
    pub fn get_sample(&mut self) -> i16 {
        (self.get_word() >> 16) as i16
    }

    /// Returns a value in `[0, 1)` built from the upper 24 bits of the next state.
    #[inline]
    pub fn get_float(&mut self) -> f32 {
        word_to_float(self.get_word())
    }
}

/// Pure form of one generator step.
#[inline]
pub const fn next_state(state: u32) -> u32 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
}

/// Maps a generator state to `[0, 1)`.
///
/// Only 24 bits are kept so the result is exactly representable as `f32` and can never
/// round up to `1.0`.
#[inline]
pub fn word_to_float(word: u32) -> f32 {
    (word >> 8) as f32 * (1.0 / 16777216.0)
}

#[inline]
pub const fn note_seed(note: u8) -> u32 {
    (note as u32).wrapping_mul(12345).wrapping_add(99999)
}
