//! Time source for report timestamps.

use chrono::{Local, NaiveDateTime};

/// Supplies the generation moment printed in the report header.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format a timestamp as `Month DD, YYYY at HH:MM AM/PM`.
pub fn format_timestamp(moment: &NaiveDateTime) -> String {
    moment.format("%B %d, %Y at %I:%M %p").to_string()
}
