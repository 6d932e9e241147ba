//! Time source for scans, injectable for testing

use std::cell::Cell;

use chrono::{FixedOffset, NaiveDateTime, Timelike, Utc};

/// Wall-clock provider in the site's fixed timezone
pub trait Clock {
    /// Local time, truncated to whole seconds
    fn now(&self) -> NaiveDateTime;
}

/// System clock shifted into one configured UTC offset
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        whole_seconds(Utc::now().with_timezone(&self.offset).naive_local())
    }
}

/// Manually driven clock for tests and replays
pub struct FixedClock {
    time: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time: Cell::new(whole_seconds(time)),
        }
    }

    pub fn set(&self, time: NaiveDateTime) {
        self.time.set(whole_seconds(time));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.time.get()
    }
}

/// Drop sub-second precision; the sheet stores `HH:MM:SS`
pub fn whole_seconds(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0).unwrap_or(time)
}
