//! Calendar-day keys.
//!
//! Every completion marker is reduced to the calendar day it falls on. Two
//! timestamps on the same day in the caller's zone produce the same
//! [`DayKey`], which is what all membership checks compare.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A calendar day, stored as its local date.
///
/// Serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` for an invalid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Midnight at the start of this day.
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// The previous calendar day, `None` at the bottom of the representable range.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The day `n` days before this one.
    pub fn days_before(&self, n: u32) -> Option<Self> {
        self.0.checked_sub_days(Days::new(u64::from(n))).map(Self)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Anything that can be reduced to the calendar day it falls on.
///
/// Zoned timestamps are read in their own zone, so pass `Local::now()` (or a
/// timestamp already converted to the habit's zone) to get local days.
pub trait IntoDayKey {
    fn into_day_key(self) -> DayKey;
}

impl IntoDayKey for DayKey {
    fn into_day_key(self) -> DayKey {
        self
    }
}

impl IntoDayKey for NaiveDate {
    fn into_day_key(self) -> DayKey {
        DayKey(self)
    }
}

impl IntoDayKey for NaiveDateTime {
    fn into_day_key(self) -> DayKey {
        DayKey(self.date())
    }
}

impl<Tz: TimeZone> IntoDayKey for DateTime<Tz> {
    fn into_day_key(self) -> DayKey {
        DayKey(self.date_naive())
    }
}

impl<Tz: TimeZone> IntoDayKey for &DateTime<Tz> {
    fn into_day_key(self) -> DayKey {
        DayKey(self.date_naive())
    }
}

/// Map a timestamp to the start of its calendar day.
pub fn normalize_day(timestamp: impl IntoDayKey) -> DayKey {
    timestamp.into_day_key()
}
