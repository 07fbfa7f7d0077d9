use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
};
use crate::prelude::*;
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// A date instant. Calendar fields are only meaningful through a [`Mode`].
pub type DateValue = DateTime<Utc>;

/// Field-access strategy for a calendar session.
///
/// Chosen once when a [`DateUtils`](crate::DateUtils) is built. Dates derived
/// under one mode must not be compared through a utility built with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Mode {
    /// Fields read and written in UTC
    #[display(fmt = "UTC")]
    Utc,
    /// Fields read and written in the host's local time zone
    #[display(fmt = "local")]
    Local,
    /// Fields read and written at a fixed offset from UTC
    #[display(fmt = "UTC{_0}")]
    Fixed(FixedOffset),
}

impl Mode {
    /// Maps the `use_utc` flag of a picker configuration to a mode.
    pub const fn from_use_utc(use_utc: bool) -> Self {
        if use_utc { Self::Utc } else { Self::Local }
    }

    /// Wall-clock view of `date` in this mode.
    pub fn to_naive(self, date: &DateValue) -> NaiveDateTime {
        match self {
            Self::Utc => date.naive_utc(),
            Self::Local => date.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => date.with_timezone(&offset).naive_local(),
        }
    }

    /// Instant for a wall-clock time in this mode.
    ///
    /// Ambiguous local times resolve to the earlier instant. Times falling in
    /// a DST gap move forward by an hour. Returns `None` only when the result
    /// is outside chrono's range.
    pub fn from_naive(self, naive: &NaiveDateTime) -> Option<DateValue> {
        match self {
            Self::Utc => Some(Utc.from_utc_datetime(naive)),
            Self::Local => resolve_local(&Local, naive),
            Self::Fixed(offset) => resolve_local(&offset, naive),
        }
    }
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateValue> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => {
            log::trace!("local time {naive} falls in a gap, shifting forward");
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

/// A month given either by its 0-based index or by a date falling in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum MonthRef {
    Index(usize),
    Date(DateValue),
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in `month` (0-based) of `year`.
///
/// # Panics
/// Panics if `month` is 12 or more. Month values read through
/// [`DateUtils`](crate::DateUtils) are always in range.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    assert!(month < 12, "month index must be below 12");

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
