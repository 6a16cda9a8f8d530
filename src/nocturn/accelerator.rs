use crate::config::INCREMENTORS;

/// Accumulator slots: the speed dial at 0 followed by the eight knobs.
pub const KNOB_SLOTS: usize = INCREMENTORS as usize + 1;

/// Convert a 7-bit MIDI two's complement value into a signed step.
pub fn sign_extend(raw: u8) -> i32 {
    let value = i32::from(raw & 0x7F);
    if value & 0x40 != 0 {
        value - 128
    } else {
        value
    }
}

/// Per-knob scaling and acceleration of relative knob motion.
///
/// Slow turns report single steps, which are integrated until `scale` of
/// them add up to one UI step. Fast turns report larger steps; those are
/// multiplied by `acceleration` first. Whatever does not make a whole UI step
/// stays in the knob's accumulator for the next call.
#[derive(Debug, Clone)]
pub struct Accelerator {
    scale: i32,
    acceleration: i32,
    accumulators: [i32; KNOB_SLOTS],
}

impl Accelerator {
    /// Create an accelerator. `scale` must be at least 1.
    pub fn new(scale: i32, acceleration: i32) -> Self {
        assert!(scale >= 1, "knob scale must be at least 1");

        Self {
            scale,
            acceleration,
            accumulators: [0; KNOB_SLOTS],
        }
    }

    /// Feed one raw value for `knob` and return the number of UI steps to emit.
    ///
    /// Knob slots outside `0..KNOB_SLOTS` are ignored and yield 0; the
    /// dispatcher never produces them. Arithmetic saturates; validated
    /// configs never get near the limits.
    pub fn accelerate(&mut self, knob: usize, raw: u8) -> i32 {
        let Some(accumulator) = self.accumulators.get_mut(knob) else {
            return 0;
        };

        let mut value = sign_extend(raw);
        if !(-1..=1).contains(&value) {
            value = value.saturating_mul(self.acceleration);
        }
        *accumulator = accumulator.saturating_add(value);

        let emitted = if *accumulator > -self.scale && *accumulator < self.scale {
            0
        } else {
            let steps = *accumulator / self.scale;
            *accumulator -= steps * self.scale;
            steps
        };

        tracing::trace!(knob, raw, emitted, accumulator = *accumulator, "accelerate");
        emitted
    }

    /// Current remainder carried for `knob`.
    pub fn accumulator(&self, knob: usize) -> Option<i32> {
        self.accumulators.get(knob).copied()
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }
}

impl Default for Accelerator {
    fn default() -> Self {
        Self::new(2, 10)
    }
}
