//! Business configuration and per-day operating-hours resolution.

use chrono::{Datelike, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{AvailabilityError, Result};

/// Largest buffer the business may configure between services.
pub const MAX_BUFFER_MINUTES: u32 = 60;

/// Buffer applied when a configuration record does not set one.
pub const DEFAULT_BUFFER_MINUTES: u32 = 15;

/// Opening hours for one weekday.
///
/// When `closed` is true, `opens` and `closes` are never consulted. A field
/// left out of a record defaults on its own: open at 09:00, close at 18:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    #[serde(default = "default_opens")]
    pub opens: ClockTime,
    #[serde(default = "default_closes")]
    pub closes: ClockTime,
    #[serde(default)]
    pub closed: bool,
}

impl OperatingHours {
    pub fn open(opens: ClockTime, closes: ClockTime) -> Self {
        Self {
            opens,
            closes,
            closed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            opens: ClockTime::default(),
            closes: ClockTime::default(),
            closed: true,
        }
    }

    fn weekday_default() -> Self {
        Self::open(default_opens(), default_closes())
    }

    fn saturday_default() -> Self {
        Self::open(ClockTime(9 * 60), ClockTime(14 * 60))
    }
}

fn default_opens() -> ClockTime {
    ClockTime(9 * 60)
}

fn default_closes() -> ClockTime {
    ClockTime(18 * 60)
}

/// The weekly operating-hours table, one entry per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default = "OperatingHours::weekday_default")]
    pub monday: OperatingHours,
    #[serde(default = "OperatingHours::weekday_default")]
    pub tuesday: OperatingHours,
    #[serde(default = "OperatingHours::weekday_default")]
    pub wednesday: OperatingHours,
    #[serde(default = "OperatingHours::weekday_default")]
    pub thursday: OperatingHours,
    #[serde(default = "OperatingHours::weekday_default")]
    pub friday: OperatingHours,
    #[serde(default = "OperatingHours::saturday_default")]
    pub saturday: OperatingHours,
    #[serde(default = "OperatingHours::closed")]
    pub sunday: OperatingHours,
}

impl Default for WeeklyHours {
    /// Monday to Friday 09:00-18:00, Saturday 09:00-14:00, Sunday closed.
    fn default() -> Self {
        Self {
            monday: OperatingHours::weekday_default(),
            tuesday: OperatingHours::weekday_default(),
            wednesday: OperatingHours::weekday_default(),
            thursday: OperatingHours::weekday_default(),
            friday: OperatingHours::weekday_default(),
            saturday: OperatingHours::saturday_default(),
            sunday: OperatingHours::closed(),
        }
    }
}

impl WeeklyHours {
    pub fn for_weekday(&self, weekday: Weekday) -> &OperatingHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn for_weekday_mut(&mut self, weekday: Weekday) -> &mut OperatingHours {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Every weekday with its hours, Monday first.
    pub fn days(&self) -> [(Weekday, &OperatingHours); 7] {
        [
            (Weekday::Mon, &self.monday),
            (Weekday::Tue, &self.tuesday),
            (Weekday::Wed, &self.wednesday),
            (Weekday::Thu, &self.thursday),
            (Weekday::Fri, &self.friday),
            (Weekday::Sat, &self.saturday),
            (Weekday::Sun, &self.sunday),
        ]
    }

    /// Resolve the hours that apply on `date`, or `None` if the business is closed.
    pub fn resolve(&self, date: NaiveDate) -> Option<DayHours> {
        let hours = self.for_weekday(date.weekday());
        if hours.closed {
            return None;
        }
        Some(DayHours {
            opens: hours.opens.minutes(),
            closes: hours.closes.minutes(),
        })
    }
}

/// Opening window of a single open day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    pub opens: u32,
    pub closes: u32,
}

/// The business-wide configuration record.
///
/// There is exactly one per deployment. It is handed to the engine by a
/// [`BusinessConfigStore`](crate::ports::BusinessConfigStore) rather than read
/// from ambient state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BusinessConfigRecord")]
pub struct BusinessConfig {
    buffer_minutes: u32,
    timezone: Tz,
    hours: WeeklyHours,
}

impl BusinessConfig {
    /// # Errors
    /// Returns `AvailabilityError::InvalidRecord` if `buffer_minutes` exceeds
    /// [`MAX_BUFFER_MINUTES`] or an open day does not close after it opens.
    pub fn new(buffer_minutes: u32, timezone: Tz, hours: WeeklyHours) -> Result<Self> {
        if buffer_minutes > MAX_BUFFER_MINUTES {
            return Err(AvailabilityError::InvalidRecord(format!(
                "buffer of {buffer_minutes} minutes exceeds the {MAX_BUFFER_MINUTES} minute maximum"
            )));
        }
        for (weekday, day) in hours.days() {
            if !day.closed && day.closes <= day.opens {
                return Err(AvailabilityError::InvalidRecord(format!(
                    "{weekday} closes at {} which is not after opening at {}",
                    day.closes, day.opens
                )));
            }
        }
        Ok(Self {
            buffer_minutes,
            timezone,
            hours,
        })
    }

    pub fn buffer_minutes(&self) -> u32 {
        self.buffer_minutes
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn hours(&self) -> &WeeklyHours {
        &self.hours
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            timezone: Tz::UTC,
            hours: WeeklyHours::default(),
        }
    }
}

/// Wire form of [`BusinessConfig`], validated on conversion.
#[derive(Debug, Deserialize)]
struct BusinessConfigRecord {
    #[serde(default = "default_buffer")]
    buffer_minutes: u32,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    operating_hours: WeeklyHours,
}

fn default_buffer() -> u32 {
    DEFAULT_BUFFER_MINUTES
}

impl TryFrom<BusinessConfigRecord> for BusinessConfig {
    type Error = AvailabilityError;

    fn try_from(record: BusinessConfigRecord) -> Result<Self> {
        let timezone = match record.timezone.as_deref() {
            None => Tz::UTC,
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))?,
        };
        Self::new(record.buffer_minutes, timezone, record.operating_hours)
    }
}
