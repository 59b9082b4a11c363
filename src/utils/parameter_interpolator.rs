//! Linear interpolation of parameters in rendering loops.
//!
//! Knobs are read once per block. Levels derived from them are ramped across the block to
//! avoid zipper noise on the outputs.

/// Ramps a stored parameter to a new value over one block and writes the final value back
/// when dropped.
#[derive(Debug)]
pub struct ParameterInterpolator<'a> {
    state: &'a mut f32,
    value: f32,
    increment: f32,
}

impl<'a> ParameterInterpolator<'a> {
    pub fn new(state: &'a mut f32, new_value: f32, size: usize) -> Self {
        let v = *state;
        let increment = if size == 0 {
            0.0
        } else {
            (new_value - v) / (size as f32)
        };

        Self {
            state,
            value: v,
            increment,
        }
    }

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        self.value += self.increment;
        self.value
    }
}

impl Drop for ParameterInterpolator<'_> {
    fn drop(&mut self) {
        *self.state = self.value;
    }
}
