//! Wall-clock arithmetic on a single business day.
//!
//! Times of day are carried as minutes since midnight so that interval math is
//! plain integer comparison; the `HH:mm` string form only exists at the edges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Number of minutes in a day; the exclusive upper bound of a [`ClockTime`].
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day between `00:00` and `23:59`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(pub(crate) u32);

impl ClockTime {
    /// Build a clock time from minutes since midnight.
    ///
    /// # Errors
    /// Returns `AvailabilityError::Format` if `minutes >= 1440`.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(AvailabilityError::Format(format!(
                "{minutes} minutes is outside a single day"
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self> {
        parse_clock_time(s).map(Self)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = AvailabilityError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Parse an `HH:mm` string into minutes since midnight.
///
/// Exactly two digits are required on each side of the colon, with
/// `00 <= HH <= 23` and `00 <= mm <= 59`.
///
/// # Errors
/// Returns `AvailabilityError::Format` for anything else.
pub fn parse_clock_time(s: &str) -> Result<u32> {
    let invalid = || AvailabilityError::Format(format!("expected HH:mm, got '{s}'"));

    let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as a zero-padded `HH:mm` string.
///
/// # Errors
/// Returns `AvailabilityError::Format` if `minutes >= 1440`.
pub fn format_clock_time(minutes: u32) -> Result<String> {
    ClockTime::from_minutes(minutes).map(|t| t.to_string())
}

/// Minutes since midnight of `instant`, read on the wall clock of its timezone.
///
/// The date part is discarded; callers only compare instants of the same
/// business day.
pub fn minutes_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.hour() * 60 + instant.minute()
}
