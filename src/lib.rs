#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod engine;
pub mod noise;
pub mod quantizer;
pub mod slew;
pub mod utils;
pub mod voice;

/// Sample rate used by the demo host and the tests.
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;

/// Sample rate context for converting times and rates into per-sample increments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate {
    /// Sample rate in Hz
    pub sample_rate_hz: f32,
    /// Reciprocal of sample rate (1.0 / sample_rate_hz) for fast multiplication
    pub inv_sr: f32,
}

impl SampleRate {
    /// Lowest accepted sample rate. Anything below is clamped up to it.
    pub const MIN_HZ: f32 = 1000.0;

    /// Create a new sample rate context.
    pub fn new(sample_rate_hz: f32) -> Self {
        let sample_rate_hz = if sample_rate_hz.is_nan() || sample_rate_hz < Self::MIN_HZ {
            Self::MIN_HZ
        } else {
            sample_rate_hz.min(1.0e6)
        };

        Self {
            sample_rate_hz,
            inv_sr: 1.0 / sample_rate_hz,
        }
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}
