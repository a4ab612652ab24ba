//! Signed time-span values with unit decomposition and string formatting.
//!
//! A [`TimeSpan`] carries one canonical value, the total duration in
//! milliseconds, as an `f64` that may be negative, fractional, or NaN. Every
//! other field is recomputed from it on access, so a span snapshotted from a
//! running tracker is always internally consistent.

use core::fmt;
use heapless::String;

use crate::format;
use crate::math;
use crate::parse;

/// Milliseconds per second.
pub const MS_PER_SECOND: f64 = 1_000.0;
/// Milliseconds per minute.
pub const MS_PER_MINUTE: f64 = 60_000.0;
/// Milliseconds per hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;
/// Milliseconds per day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Capacity of a stored default-format string.
pub const FORMAT_CAPACITY: usize = 64;

/// Built-in default format: sign, day section only when nonzero, `hh:mm:ss`,
/// millisecond section only when nonzero.
pub const DEFAULT_FORMAT: &str = "-[d\\.]hh:mm:ss[\\.fff]";

/// Errors from storing a default format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The format string does not fit the stored capacity.
    CapacityExceeded {
        /// Length of the rejected format string.
        len: usize,
        /// Maximum storable length.
        capacity: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::CapacityExceeded { len, capacity } => {
                write!(
                    f,
                    "format string of {} bytes exceeds capacity of {}",
                    len, capacity
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

/// A signed duration decomposed into days, hours, minutes, seconds, and
/// milliseconds.
///
/// Constructed from a raw millisecond count, from largest-to-smallest unit
/// values, or by [parsing](TimeSpan::parse) a string. Construction never
/// fails; NaN inputs propagate NaN into every derived field and render as
/// `NaN` text.
#[derive(Debug, Clone, Default)]
pub struct TimeSpan {
    total_ms: f64,
    default_format: Option<String<FORMAT_CAPACITY>>,
}

impl TimeSpan {
    /// Creates a span from a total millisecond count.
    pub fn from_millis(milliseconds: f64) -> Self {
        Self {
            total_ms: milliseconds,
            default_format: None,
        }
    }

    /// Creates a span from day/hour/minute/second values.
    ///
    /// Values may be fractional or negative; they are scaled and summed.
    pub fn from_units(days: f64, hours: f64, minutes: f64, seconds: f64) -> Self {
        Self::from_units_ms(days, hours, minutes, seconds, 0.0)
    }

    /// Creates a span from day/hour/minute/second/millisecond values.
    pub fn from_units_ms(
        days: f64,
        hours: f64,
        minutes: f64,
        seconds: f64,
        milliseconds: f64,
    ) -> Self {
        Self::from_millis(
            days * MS_PER_DAY
                + hours * MS_PER_HOUR
                + minutes * MS_PER_MINUTE
                + seconds * MS_PER_SECOND
                + milliseconds,
        )
    }

    /// Creates a span representing a number of seconds.
    pub fn from_seconds(seconds: f64) -> Self {
        Self::from_millis(seconds * MS_PER_SECOND)
    }

    /// Creates a span representing a number of minutes.
    pub fn from_minutes(minutes: f64) -> Self {
        Self::from_millis(minutes * MS_PER_MINUTE)
    }

    /// Creates a span representing a number of hours.
    pub fn from_hours(hours: f64) -> Self {
        Self::from_millis(hours * MS_PER_HOUR)
    }

    /// Creates a span representing a number of days.
    pub fn from_days(days: f64) -> Self {
        Self::from_millis(days * MS_PER_DAY)
    }

    /// Converts a string representation of a time interval to a span.
    ///
    /// Accepts a raw millisecond count (`"5000"`), a sparse unit-suffixed
    /// form (`"1d2h3m"`), or a clock form (`"1.01:00:00"` / `"01:23:45.500"`).
    /// Never fails: input matching no pattern yields a NaN span.
    pub fn parse(input: &str) -> Self {
        Self::from_millis(parse::parse_total(input))
    }

    /// Total duration in milliseconds.
    pub fn total_milliseconds(&self) -> f64 {
        self.total_ms
    }

    /// Total duration in whole and fractional seconds.
    pub fn total_seconds(&self) -> f64 {
        self.total_ms / MS_PER_SECOND
    }

    /// Total duration in whole and fractional minutes.
    pub fn total_minutes(&self) -> f64 {
        self.total_ms / MS_PER_MINUTE
    }

    /// Total duration in whole and fractional hours.
    pub fn total_hours(&self) -> f64 {
        self.total_ms / MS_PER_HOUR
    }

    /// Total duration in whole and fractional days.
    pub fn total_days(&self) -> f64 {
        self.total_ms / MS_PER_DAY
    }

    /// Millisecond component of the interval, sign matching the total.
    pub fn milliseconds(&self) -> f64 {
        self.total_ms % MS_PER_SECOND
    }

    /// Second component of the interval.
    pub fn seconds(&self) -> f64 {
        math::trunc(self.total_seconds()) % 60.0
    }

    /// Minute component of the interval.
    pub fn minutes(&self) -> f64 {
        math::trunc(self.total_minutes()) % 60.0
    }

    /// Hour component of the interval.
    pub fn hours(&self) -> f64 {
        math::trunc(self.total_hours()) % 24.0
    }

    /// Day component of the interval.
    pub fn days(&self) -> f64 {
        math::trunc(self.total_days())
    }

    /// Returns true when the span holds no meaningful value (e.g. it came
    /// from unparseable input). NaN propagates through every derived field,
    /// so callers should check here rather than expect an error.
    pub fn is_nan(&self) -> bool {
        self.total_ms.is_nan()
    }

    /// Sets the format used by the `Display` impl when no explicit format is
    /// given.
    pub fn set_default_format(&mut self, format: &str) -> Result<(), FormatError> {
        let mut stored = String::new();
        stored
            .push_str(format)
            .map_err(|_| FormatError::CapacityExceeded {
                len: format.len(),
                capacity: FORMAT_CAPACITY,
            })?;
        self.default_format = Some(stored);
        Ok(())
    }

    /// The format the `Display` impl will use.
    pub fn default_format(&self) -> &str {
        self.default_format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    pub(crate) fn with_stored_format(mut self, format: Option<String<FORMAT_CAPACITY>>) -> Self {
        self.default_format = format;
        self
    }

    /// Renders with an explicit format string.
    ///
    /// Returns a `Display` adapter, so the rendered text can go to any
    /// `core::fmt::Write` target without allocating.
    pub fn format_as<'a>(&'a self, format: &'a str) -> FormattedSpan<'a> {
        FormattedSpan { span: self, format }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::render_into(self, self.default_format(), f)
    }
}

/// `Display` adapter pairing a span with a format string.
#[derive(Debug, Clone, Copy)]
pub struct FormattedSpan<'a> {
    span: &'a TimeSpan,
    format: &'a str,
}

impl fmt::Display for FormattedSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::render_into(self.span, self.format, f)
    }
}
