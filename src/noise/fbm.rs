//! Fractional Brownian motion over 1-D Perlin noise.

#[allow(unused_imports)]
use num_traits::float::Float;

use super::perlin::{perlin, PermutationTable};

/// Largest absolute value a single [`perlin`] octave can reach.
pub const PERLIN_BOUND: f32 = 0.5;

/// Upper bound on octave count. Keeps the per-sample cost bounded.
pub const MAX_OCTAVES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FbmParameters {
    /// Number of summed noise layers, `1..=12`.
    pub octaves: usize,

    /// Frequency multiplier between layers.
    pub lacunarity: f32,

    /// Amplitude multiplier between layers.
    pub gain: f32,
}

impl FbmParameters {
    /// Note-triggered fractal voice.
    pub const NOTE: Self = Self {
        octaves: 5,
        lacunarity: 2.0,
        gain: 0.5,
    };

    /// Left channel of the looping voice.
    pub const LOOP_LEFT: Self = Self {
        octaves: 7,
        lacunarity: 4.3,
        gain: 0.5,
    };

    /// Right channel of the looping voice.
    pub const LOOP_RIGHT: Self = Self {
        octaves: 7,
        lacunarity: 2.0,
        gain: 0.7,
    };

    /// Hard bound on `|fbm(x)|` for these parameters: `0.5 * sum(|gain|^i)`.
    pub fn amplitude_bound(&self) -> f32 {
        let gain = self.gain.abs();
        let mut amplitude = 1.0;
        let mut bound = 0.0;
        for _ in 0..self.octaves.clamp(1, MAX_OCTAVES) {
            bound += amplitude;
            amplitude *= gain;
        }

        PERLIN_BOUND * bound
    }
}

impl Default for FbmParameters {
    fn default() -> Self {
        Self::NOTE
    }
}

/// `sum_{i < octaves} gain^i * perlin(x * lacunarity^i)`.
///
/// The octave count is clamped to `1..=12`. The result is always within
/// [`FbmParameters::amplitude_bound`], but callers should still clamp before quantizing.
#[inline]
pub fn fbm(table: &PermutationTable, x: f32, parameters: &FbmParameters) -> f32 {
    let mut sum = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for _ in 0..parameters.octaves.clamp(1, MAX_OCTAVES) {
        sum += amplitude * perlin(table, x * frequency);
        frequency *= parameters.lacunarity;
        amplitude *= parameters.gain;
    }

    sum
}
