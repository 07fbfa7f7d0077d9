//! Date constructors shared by the unit tests.

use chrono::{FixedOffset, TimeZone, Utc};

use crate::{DateValue, Mode};

/// Midnight UTC on a 1-based calendar date.
pub fn utc(year: i32, month: u32, day: u32) -> DateValue {
    utc_hm(year, month, day, 0, 0)
}

pub fn utc_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateValue {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test date")
}

/// A fixed-offset mode standing in for a local time zone.
pub fn fixed(hours: i32) -> Mode {
    Mode::Fixed(FixedOffset::east_opt(hours * 3600).expect("valid test offset"))
}
