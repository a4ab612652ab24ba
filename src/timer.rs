//! Countdown timers composed from a stopwatch.
//!
//! A [`Timer`] runs a [`Stopwatch`] against a target duration and layers a
//! terminal `Finished` state on top of the stopwatch's three. The finish
//! check runs on every tick and once more at `pause()`, mirroring the
//! stopwatch's tick delivery.

use heapless::String;

use crate::command::TrackerAction;
use crate::span::{FORMAT_CAPACITY, FormatError, TimeSpan};
use crate::stopwatch::{
    Rounding, Stopwatch, StopwatchConfig, StopwatchState, TickTiming, round_to_interval,
};
use crate::time::{TickMode, TimeDuration, TimeInstant, TimeSource};

/// The current state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Halted with nothing counted down.
    Inactive,
    /// Counting down.
    Active,
    /// Halted mid-countdown.
    Paused,
    /// The target duration has run out.
    Finished,
}

/// Timer construction options.
#[derive(Debug, Clone)]
pub struct TimerConfig<D: TimeDuration> {
    /// Start counting immediately on construction. Default true.
    pub immediate: bool,
    /// How the owner drives the service loop. Default 1000 ms interval.
    pub mode: TickMode<D>,
    /// Snapping policy for the reported remaining time. Default
    /// [`Rounding::Nearest`].
    pub rounding: Rounding,
    /// Halt the underlying stopwatch when the countdown completes, clamping
    /// the reported remaining time at zero. Default true.
    pub stop_on_finish: bool,
    /// Default render format for the remaining-time span; the span's
    /// built-in default is used when absent.
    pub format: Option<String<FORMAT_CAPACITY>>,
}

impl<D: TimeDuration> Default for TimerConfig<D> {
    fn default() -> Self {
        Self {
            immediate: true,
            mode: TickMode::Interval(D::from_millis(crate::stopwatch::DEFAULT_INTERVAL_MS)),
            rounding: Rounding::Nearest,
            stop_on_finish: true,
            format: None,
        }
    }
}

impl<D: TimeDuration> TimerConfig<D> {
    /// Sets the default render format for the remaining-time span.
    pub fn with_format(mut self, format: &str) -> Result<Self, FormatError> {
        let mut stored = String::new();
        stored
            .push_str(format)
            .map_err(|_| FormatError::CapacityExceeded {
                len: format.len(),
                capacity: FORMAT_CAPACITY,
            })?;
        self.format = Some(stored);
        Ok(self)
    }
}

/// Counts down from a target duration.
///
/// Remaining time is `target − stopwatch elapsed`. Once the raw remaining
/// time reaches zero the timer flips to `Finished` and stays there until
/// `start()`, `stop()`, or `reset()` clears the flag; with `stop_on_finish`
/// the underlying stopwatch is halted at that moment so the elapsed value
/// freezes, and the reported remaining time clamps at zero. Without it the
/// stopwatch keeps running and the remaining time goes negative while
/// `Finished` holds.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct Timer<'t, I: TimeInstant, T: TimeSource<I>> {
    stopwatch: Stopwatch<'t, I, T>,
    target_ms: f64,
    rounding: Rounding,
    stop_on_finish: bool,
    finished: bool,
    format: Option<String<FORMAT_CAPACITY>>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Timer<'t, I, T> {
    /// Creates a timer counting down from `target`, immediately started
    /// unless configured otherwise.
    pub fn new(time_source: &'t T, target: TimeSpan, config: TimerConfig<I::Duration>) -> Self {
        // The inner stopwatch reports raw values; snapping is applied to the
        // remaining time instead, so a target off the interval grid still
        // rounds the way the owner configured.
        let stopwatch = Stopwatch::new(
            time_source,
            StopwatchConfig {
                immediate: false,
                mode: config.mode,
                rounding: Rounding::None,
            },
        );
        let mut timer = Self {
            stopwatch,
            target_ms: target.total_milliseconds(),
            rounding: config.rounding,
            stop_on_finish: config.stop_on_finish,
            finished: false,
            format: config.format,
        };
        if config.immediate {
            timer.start();
        }
        timer
    }

    /// Dispatches a tracker action to the matching method.
    pub fn handle_action(&mut self, action: TrackerAction) -> TickTiming<I::Duration> {
        match action {
            TrackerAction::Start => self.start(),
            TrackerAction::Pause => self.pause(),
            TrackerAction::Resume => self.resume(),
            TrackerAction::Stop => self.stop(),
            TrackerAction::Reset => self.reset(),
        }
        self.timing()
    }

    /// Restarts the countdown from the full target.
    pub fn start(&mut self) {
        self.finished = false;
        self.stopwatch.start();
    }

    /// Halts the countdown, running the finish check one last time.
    pub fn pause(&mut self) {
        self.stopwatch.pause();
        self.check_finish();
    }

    /// Continues a halted countdown. No-op while active.
    pub fn resume(&mut self) {
        self.stopwatch.resume();
    }

    /// Halts and rewinds to the full target.
    pub fn stop(&mut self) {
        self.finished = false;
        self.stopwatch.stop();
    }

    /// Rewinds to the full target without changing run/halt status.
    pub fn reset(&mut self) {
        self.finished = false;
        self.stopwatch.reset();
    }

    /// One tick: advances the stopwatch, runs the finish check, and reports
    /// when to service next.
    pub fn service(&mut self) -> TickTiming<I::Duration> {
        self.stopwatch.service();
        self.check_finish();
        self.timing()
    }

    fn check_finish(&mut self) {
        if self.finished {
            return;
        }
        // NaN targets never finish; the comparison is deliberately written
        // so NaN falls through.
        if self.remaining_raw_ms() <= 0.0 {
            self.finished = true;
            if self.stop_on_finish {
                self.stopwatch.pause();
            }
        }
    }

    /// Remaining milliseconds without snapping or clamping.
    pub fn remaining_raw_ms(&self) -> f64 {
        self.target_ms - self.stopwatch.raw_elapsed_ms() as f64
    }

    /// Reported remaining milliseconds: snapped per the rounding policy when
    /// interval-driven, clamped at zero once finished with `stop_on_finish`.
    pub fn remaining_ms(&self) -> f64 {
        let mut remaining = match self.stopwatch.mode() {
            TickMode::Interval(interval) => round_to_interval(
                self.remaining_raw_ms(),
                interval.as_millis() as f64,
                self.rounding,
            ),
            TickMode::Frame => self.remaining_raw_ms(),
        };
        if self.finished && self.stop_on_finish && remaining < 0.0 {
            remaining = 0.0;
        }
        remaining
    }

    /// Reported remaining time as a span, carrying the configured default
    /// render format if one was set.
    pub fn remaining(&self) -> TimeSpan {
        TimeSpan::from_millis(self.remaining_ms()).with_stored_format(self.format.clone())
    }

    /// The target duration.
    pub fn target(&self) -> TimeSpan {
        TimeSpan::from_millis(self.target_ms)
    }

    /// Returns the current state: `Finished` once the countdown ran out,
    /// otherwise the underlying stopwatch's state.
    pub fn state(&self) -> TimerState {
        if self.finished {
            return TimerState::Finished;
        }
        match self.stopwatch.state() {
            StopwatchState::Inactive => TimerState::Inactive,
            StopwatchState::Active => TimerState::Active,
            StopwatchState::Paused => TimerState::Paused,
        }
    }

    /// Returns true once the countdown has run out.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// When the owner should service next.
    pub fn timing(&self) -> TickTiming<I::Duration> {
        self.stopwatch.timing()
    }

    /// The underlying stopwatch.
    pub fn stopwatch(&self) -> &Stopwatch<'t, I, T> {
        &self.stopwatch
    }
}
