//! Simulation time model.
//!
//! Time is an opaque, monotonically non-decreasing tick counter. It is never
//! interpreted as seconds or wall-clock time; the only arithmetic the rest of
//! the framework performs on it is [`Time::advance`]. Using an integer tick
//! as the canonical unit keeps all progress arithmetic exact (no
//! floating-point drift) and comparisons O(1).

use std::fmt;

/// An opaque point (or duration) in simulation time.
///
/// Stored as `u64`: at one tick per step a u64 outlasts any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(pub u64);

impl Time {
    pub const ZERO: Time = Time(0);

    /// Return the time `dt` after `self`.
    #[inline]
    pub fn advance(self, dt: Time) -> Time {
        Time(self.0 + dt.0)
    }

    /// The raw tick count.
    #[inline]
    pub fn tick(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
