//! Time abstraction traits for platform-agnostic timing.
//!
//! Trackers never read a clock directly; they borrow a [`TimeSource`] and ask
//! it for "now" on every tick and state transition. Tests drive trackers
//! deterministically by injecting a synthetic clock.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// How the owner intends to drive a tracker's service loop.
///
/// With `Interval`, the owner calls `service()` roughly every `D` and the
/// tracker may snap reported values to interval boundaries. With `Frame`, the
/// owner calls once per animation frame and no snapping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickMode<D: TimeDuration> {
    /// Fixed-interval ticking.
    Interval(D),
    /// Once-per-animation-frame ticking.
    Frame,
}

#[cfg(feature = "std")]
mod std_clock {
    use super::{TimeDuration, TimeInstant, TimeSource};
    use std::time::{Duration, Instant};

    impl TimeDuration for Duration {
        const ZERO: Self = Duration::ZERO;

        fn as_millis(&self) -> u64 {
            Duration::as_millis(self) as u64
        }

        fn from_millis(millis: u64) -> Self {
            Duration::from_millis(millis)
        }
    }

    impl TimeInstant for Instant {
        type Duration = Duration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            self.saturating_duration_since(earlier)
        }
    }

    /// Monotonic time source backed by [`std::time::Instant`].
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemClock;

    impl TimeSource<Instant> for SystemClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }
}

#[cfg(feature = "std")]
pub use std_clock::SystemClock;
