//! Frame counters.
//!
//! Waiting is never done by sleeping: caret blink and key repeat are driven
//! by counters advanced once per frame from `update()`.

/// A tick counter bounded by `0..=max`.
///
/// On reaching `max` a repeating counter wraps to zero immediately, a
/// one-shot counter clamps at `max` and reports [`Counter::done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    count: u32,
    max: u32,
    repeat: bool,
}

impl Counter {
    /// Creates a counter at zero.
    #[must_use]
    pub const fn new(max: u32, repeat: bool) -> Self {
        Self { count: 0, max, repeat }
    }

    /// Advances the counter by one frame.
    pub fn tick(&mut self) {
        self.count = self.count.saturating_add(1).min(self.max);
        if self.count >= self.max && self.repeat {
            self.count = 0;
        }
    }

    /// Returns the counter to zero.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// True once a one-shot counter has reached its maximum.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.count == self.max
    }

    /// Current count.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}
