//! Implementation of a 2-bit saturating counter.

use crate::Outcome;

/// A 2-bit saturating counter used to follow the behavior of a branch.
///
/// The value is always in `0..=3`. Values 2 and 3 predict 'taken'.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Largest representable value.
    pub const MAX: u8 = 3;

    /// Smallest value that predicts 'taken'.
    pub const THRESHOLD: u8 = 2;

    /// Reset state for prediction tables.
    pub const WEAKLY_TAKEN: Self = Self(2);

    /// Reset state for hybrid chooser tables.
    pub const WEAKLY_NOT_TAKEN: Self = Self(1);

    /// Create a counter. Values above [Self::MAX] are clamped.
    pub fn new(val: u8) -> Self {
        Self(val.min(Self::MAX))
    }

    pub fn value(&self) -> u8 { self.0 }

    /// Returns 'true' when the counter is in one of the upper two states.
    pub fn is_high(&self) -> bool { self.0 >= Self::THRESHOLD }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome { self.is_high().into() }

    pub fn increment(&mut self) {
        if self.0 < Self::MAX {
            self.0 += 1;
        }
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Move the counter toward the resolved outcome.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }
}

impl From<SaturatingCounter> for u8 {
    fn from(x: SaturatingCounter) -> u8 { x.0 }
}
