//! Elapsed-time tracking with pause support.
//!
//! A [`Stopwatch`] banks time from completed runs and adds the current run's
//! elapsed time on top while active. It never owns a thread or an interrupt;
//! the owner drives it by calling [`service`](Stopwatch::service) on its own
//! schedule, and each call returns a [`Tick`] snapshot plus a hint for when
//! to call again.

use crate::command::TrackerAction;
use crate::math;
use crate::span::TimeSpan;
use crate::time::{TickMode, TimeDuration, TimeInstant, TimeSource};

/// Default service interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

/// The current state of a stopwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopwatchState {
    /// Halted with nothing banked.
    Inactive,
    /// Counting.
    Active,
    /// Halted with banked time.
    Paused,
}

/// How reported values snap to interval boundaries.
///
/// Applies only in [`TickMode::Interval`]; frame-driven trackers report raw
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rounding {
    /// Snap to the nearest boundary; an exact half rounds up to the next one.
    Nearest,
    /// Snap toward zero.
    Truncate,
    /// No snapping.
    None,
}

/// Timing hint returned by service operations.
///
/// Tells the owner when the tracker wants to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickTiming<D> {
    /// Frame-driven: service once per animation frame.
    Frame,
    /// Interval-driven: service again after this delay.
    Delay(D),
    /// Halted: no servicing needed until the tracker is started or resumed.
    Halted,
}

/// Snapshot returned by [`Stopwatch::service`] and [`Stopwatch::pause`].
///
/// Carries the data the tracker can only deliver at a tick: the elapsed
/// totals and the instant they were taken at. Compositions layer their own
/// per-tick work (the Timer's completion check) on these values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<I: TimeInstant> {
    /// Reported elapsed milliseconds (snapped per the rounding policy).
    pub elapsed_ms: i64,
    /// Elapsed milliseconds without snapping.
    pub raw_elapsed_ms: i64,
    /// The instant the snapshot was taken at.
    pub at: I,
    /// When to service again.
    pub timing: TickTiming<I::Duration>,
}

/// Stopwatch construction options.
#[derive(Debug, Clone, Copy)]
pub struct StopwatchConfig<D: TimeDuration> {
    /// Start counting immediately on construction. Default true.
    pub immediate: bool,
    /// How the owner drives the service loop. Default 1000 ms interval.
    pub mode: TickMode<D>,
    /// Snapping policy for reported values. Default [`Rounding::Nearest`].
    pub rounding: Rounding,
}

impl<D: TimeDuration> Default for StopwatchConfig<D> {
    fn default() -> Self {
        Self {
            immediate: true,
            mode: TickMode::Interval(D::from_millis(DEFAULT_INTERVAL_MS)),
            rounding: Rounding::Nearest,
        }
    }
}

/// Snaps `value_ms` to a multiple of `interval_ms`.
///
/// `Nearest` works on the euclidean remainder, so negative values snap to
/// their nearest boundary as well; `Truncate` drops toward zero. Non-finite
/// values and non-positive intervals pass through untouched.
pub(crate) fn round_to_interval(value_ms: f64, interval_ms: f64, rounding: Rounding) -> f64 {
    if !value_ms.is_finite() || interval_ms <= 0.0 {
        return value_ms;
    }
    match rounding {
        Rounding::None => value_ms,
        Rounding::Truncate => math::trunc(value_ms / interval_ms) * interval_ms,
        Rounding::Nearest => {
            let rem = value_ms - math::floor(value_ms / interval_ms) * interval_ms;
            let down = value_ms - rem;
            if (interval_ms - rem) * 2.0 > interval_ms {
                down
            } else {
                down + interval_ms
            }
        }
    }
}

/// Tracks accumulated running time across start/pause/resume/stop
/// transitions.
///
/// Elapsed time is `banked + (active ? now − run start : 0)`, where `now` is
/// the instant recorded by the most recent `service()` call. All operations
/// are infallible: pausing while halted or resuming while active are
/// tolerated no-ops, since these are pure state transitions with nothing to
/// double-release.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct Stopwatch<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    mode: TickMode<I::Duration>,
    rounding: Rounding,
    ticking: bool,
    accumulated_ms: i64,
    run_start: I,
    now: I,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Stopwatch<'t, I, T> {
    /// Creates a stopwatch, immediately started unless configured otherwise.
    pub fn new(time_source: &'t T, config: StopwatchConfig<I::Duration>) -> Self {
        let at = time_source.now();
        let mut stopwatch = Self {
            time_source,
            mode: config.mode,
            rounding: config.rounding,
            ticking: false,
            accumulated_ms: 0,
            run_start: at,
            now: at,
        };
        if config.immediate {
            stopwatch.start();
        }
        stopwatch
    }

    /// Dispatches a tracker action to the matching method.
    pub fn handle_action(&mut self, action: TrackerAction) -> Tick<I> {
        match action {
            TrackerAction::Start => self.start(),
            TrackerAction::Pause => return self.pause(),
            TrackerAction::Resume => self.resume(),
            TrackerAction::Stop => self.stop(),
            TrackerAction::Reset => self.reset(),
        }
        self.snapshot()
    }

    /// Starts counting from zero.
    pub fn start(&mut self) {
        self.rebase();
        self.ticking = true;
    }

    /// Banks the current run's elapsed time and halts.
    ///
    /// Returns the final tick snapshot, so a composition gets the same data
    /// here as from a `service()` call. Idempotent: pausing again banks the
    /// value it already holds.
    pub fn pause(&mut self) -> Tick<I> {
        self.accumulated_ms = self.raw_elapsed_ms();
        self.ticking = false;
        self.snapshot()
    }

    /// Restarts the run clock from now without clearing banked time. No-op
    /// while already active.
    pub fn resume(&mut self) {
        if self.ticking {
            return;
        }
        let at = self.time_source.now();
        self.run_start = at;
        self.now = at;
        self.ticking = true;
    }

    /// Clears banked time and halts.
    pub fn stop(&mut self) {
        self.rebase();
        self.ticking = false;
    }

    /// Clears banked time and rebases the run clock, leaving the run/halt
    /// status untouched.
    pub fn reset(&mut self) {
        self.rebase();
    }

    fn rebase(&mut self) {
        let at = self.time_source.now();
        self.run_start = at;
        self.now = at;
        self.accumulated_ms = 0;
    }

    /// One tick: refreshes the tracked now-instant (only while active) and
    /// returns the elapsed snapshot.
    pub fn service(&mut self) -> Tick<I> {
        if self.ticking {
            self.now = self.time_source.now();
        }
        self.snapshot()
    }

    fn snapshot(&self) -> Tick<I> {
        Tick {
            elapsed_ms: self.elapsed_ms(),
            raw_elapsed_ms: self.raw_elapsed_ms(),
            at: self.now,
            timing: self.timing(),
        }
    }

    /// Elapsed milliseconds without interval snapping.
    pub fn raw_elapsed_ms(&self) -> i64 {
        let running = if self.ticking {
            self.now.duration_since(self.run_start).as_millis() as i64
        } else {
            0
        };
        self.accumulated_ms + running
    }

    /// Reported elapsed milliseconds, snapped per the rounding policy when
    /// interval-driven.
    pub fn elapsed_ms(&self) -> i64 {
        match self.mode {
            TickMode::Interval(interval) => round_to_interval(
                self.raw_elapsed_ms() as f64,
                interval.as_millis() as f64,
                self.rounding,
            ) as i64,
            TickMode::Frame => self.raw_elapsed_ms(),
        }
    }

    /// Reported elapsed time as a span.
    pub fn elapsed(&self) -> TimeSpan {
        TimeSpan::from_millis(self.elapsed_ms() as f64)
    }

    /// Returns the current state.
    ///
    /// `Active` iff the service loop is running; `Paused` iff halted with
    /// banked time; `Inactive` otherwise.
    pub fn state(&self) -> StopwatchState {
        if self.ticking {
            StopwatchState::Active
        } else if self.accumulated_ms > 0 {
            StopwatchState::Paused
        } else {
            StopwatchState::Inactive
        }
    }

    /// Returns true while counting.
    pub fn is_active(&self) -> bool {
        self.ticking
    }

    /// Returns true while halted with banked time.
    pub fn is_paused(&self) -> bool {
        self.state() == StopwatchState::Paused
    }

    /// The configured tick mode.
    pub fn mode(&self) -> TickMode<I::Duration> {
        self.mode
    }

    /// The configured rounding policy.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// When the owner should service next.
    pub fn timing(&self) -> TickTiming<I::Duration> {
        if !self.ticking {
            TickTiming::Halted
        } else {
            match self.mode {
                TickMode::Interval(interval) => TickTiming::Delay(interval),
                TickMode::Frame => TickTiming::Frame,
            }
        }
    }
}
