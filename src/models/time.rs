//! Days of the teaching week and wall-clock times of day.
//!
//! The timetable repeats over a single week, so absolute dates never
//! appear in the core: a placement is fully located by a [`Day`] and a
//! pair of [`TimeOfDay`] values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A day of the teaching week (Monday through Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    /// All teaching days, Monday first.
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Short uppercase label (`"MON"`, `"TUE"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
            Day::Sat => "SAT",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Ordered and cheap to copy; displayed as `HH:MM`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TimeOfDay(pub u16);

impl TimeOfDay {
    /// Creates a time from hours and minutes.
    pub fn hm(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    #[inline]
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0-59).
    #[inline]
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Minutes from this time to `later` (0 if `later` is earlier).
    pub fn minutes_until(&self, later: TimeOfDay) -> u16 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Error parsing a `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeError(pub String);

impl fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid HH:MM time: '{}'", self.0)
    }
}

impl std::error::Error for ParseTimeError {}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s.split_once(':').ok_or_else(|| ParseTimeError(s.into()))?;
        let hour: u16 = h.parse().map_err(|_| ParseTimeError(s.into()))?;
        let minute: u16 = m.parse().map_err(|_| ParseTimeError(s.into()))?;
        if hour > 23 || minute > 59 {
            return Err(ParseTimeError(s.into()));
        }
        Ok(TimeOfDay::hm(hour, minute))
    }
}

/// Whether two half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)` intersect.
pub fn intervals_overlap(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}
