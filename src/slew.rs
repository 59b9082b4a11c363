//! Slew limiter with independent rise and fall times.
//!
//! Turns stepped targets into click-free ramps. Rising and falling ramps are configured
//! separately, so an instant attack with a slow release (or the reverse) is possible.
//!
//! A ramp starts where the value was when a new destination was set and moves towards it
//! at a constant rate, reaching it after `ceil(time * sample_rate)` samples. Each value is
//! interpolated from the ramp origin by the sample count, so the ramp never stalls on
//! float resolution. Destinations that change every sample degrade into one-pole smoothing
//! towards the moving target.

use crate::utils::clamp_finite;
use crate::SampleRate;

/// Longest accepted rise/fall time in seconds.
pub const MAX_TIME: f32 = 2.0;

/// Times below this snap to the destination.
pub const MIN_TIME: f32 = 1.0e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct SlewLimiter {
    sample_rate: f32,
    value: f32,
    destination: f32,
    ramp_origin: f32,
    ramp_position: u32,
    rise_time: f32,
    fall_time: f32,
}

impl Default for SlewLimiter {
    fn default() -> Self {
        Self::new(SampleRate::default().sample_rate_hz)
    }
}

impl SlewLimiter {
    pub fn new(sample_rate: f32) -> Self {
        let mut slew = Self {
            sample_rate: 0.0,
            value: 0.0,
            destination: 0.0,
            ramp_origin: 0.0,
            ramp_position: 0,
            rise_time: 0.0,
            fall_time: 0.0,
        };
        slew.init(sample_rate);

        slew
    }

    /// Resets to `0.0` with 10 ms rise and fall times.
    pub fn init(&mut self, sample_rate: f32) {
        self.sample_rate = SampleRate::new(sample_rate).sample_rate_hz;
        self.value = 0.0;
        self.destination = 0.0;
        self.ramp_origin = 0.0;
        self.ramp_position = 0;
        self.rise_time = 0.01;
        self.fall_time = 0.01;
    }

    /// Sets the rise time in seconds, clamped to `[0, 2]`.
    ///
    /// A change restarts a running ramp from the current value.
    #[inline]
    pub fn set_rise_time(&mut self, seconds: f32) {
        let seconds = clamp_finite(seconds, 0.0, MAX_TIME);
        if seconds != self.rise_time {
            self.rise_time = seconds;
            self.restart_ramp();
        }
    }

    /// Sets the fall time in seconds, clamped to `[0, 2]`.
    ///
    /// A change restarts a running ramp from the current value.
    #[inline]
    pub fn set_fall_time(&mut self, seconds: f32) {
        let seconds = clamp_finite(seconds, 0.0, MAX_TIME);
        if seconds != self.fall_time {
            self.fall_time = seconds;
            self.restart_ramp();
        }
    }

    #[inline]
    pub fn set_rise_fall(&mut self, seconds: f32) {
        self.set_rise_time(seconds);
        self.set_fall_time(seconds);
    }

    /// Jumps to `value` and stays there.
    pub fn set_value(&mut self, value: f32) {
        let value = clamp_finite(value, f32::MIN, f32::MAX);
        self.value = value;
        self.destination = value;
        self.restart_ramp();
    }

    /// Records a new target. The value only moves in [`process`](Self::process).
    #[inline]
    pub fn set_destination(&mut self, destination: f32) {
        let destination = clamp_finite(destination, f32::MIN, f32::MAX);
        if destination != self.destination {
            self.destination = destination;
            self.restart_ramp();
        }
    }

    /// Advances the ramp by one sample period and returns the new value.
    ///
    /// Must be called exactly once per sample for the configured times to hold.
    #[inline]
    pub fn process(&mut self) -> f32 {
        if self.value == self.destination {
            return self.value;
        }

        let span = self.destination - self.ramp_origin;
        let rising = span > 0.0;
        let time = if rising {
            self.rise_time
        } else {
            self.fall_time
        };

        let length = time * self.sample_rate;
        self.ramp_position = self.ramp_position.saturating_add(1);
        let position = self.ramp_position as f32;

        if time < MIN_TIME || position >= length {
            self.value = self.destination;
        } else {
            let value = self.ramp_origin + span * (position / length);
            self.value = if rising {
                value.min(self.destination)
            } else {
                value.max(self.destination)
            };
        }

        self.value
    }

    #[inline]
    fn restart_ramp(&mut self) {
        self.ramp_origin = self.value;
        self.ramp_position = 0;
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn destination(&self) -> f32 {
        self.destination
    }

    #[inline]
    pub fn rise_time(&self) -> f32 {
        self.rise_time
    }

    #[inline]
    pub fn fall_time(&self) -> f32 {
        self.fall_time
    }

    /// True once the value has reached its destination.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.value == self.destination
    }
}
