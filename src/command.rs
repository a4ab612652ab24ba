//! Command-based control for trackers.

/// Actions for controlling stopwatches and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerAction {
    /// Start from zero (timers: from the full target).
    Start,
    /// Pause, banking elapsed time.
    Pause,
    /// Resume a paused tracker.
    Resume,
    /// Stop and discard elapsed time.
    Stop,
    /// Rewind without changing run/halt status.
    Reset,
}

/// Command targeting a specific tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerCommand<Id> {
    pub tracker_id: Id,
    pub action: TrackerAction,
}

impl<Id> TrackerCommand<Id> {
    /// Creates command.
    pub fn new(tracker_id: Id, action: TrackerAction) -> Self {
        Self { tracker_id, action }
    }
}
