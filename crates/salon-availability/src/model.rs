//! Read-only views of the salon records the engine consumes.
//!
//! Records are validated when they are built or deserialized, so the slot
//! algorithm can rely on their invariants without re-checking them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Shortest service the catalog accepts.
pub const MIN_SERVICE_MINUTES: u32 = 15;

/// Longest service the catalog accepts (a full working day).
pub const MAX_SERVICE_MINUTES: u32 = 480;

/// A bookable service from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ServiceRecord")]
pub struct Service {
    id: String,
    name: String,
    duration_minutes: u32,
}

impl Service {
    /// # Errors
    /// Returns `AvailabilityError::InvalidRecord` unless
    /// `15 <= duration_minutes <= 480`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_minutes: u32,
    ) -> Result<Self> {
        let id = id.into();
        if !(MIN_SERVICE_MINUTES..=MAX_SERVICE_MINUTES).contains(&duration_minutes) {
            return Err(AvailabilityError::InvalidRecord(format!(
                "service '{id}' lasts {duration_minutes} minutes; \
                 expected {MIN_SERVICE_MINUTES}..={MAX_SERVICE_MINUTES}"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            duration_minutes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

#[derive(Debug, Deserialize)]
struct ServiceRecord {
    id: String,
    #[serde(default)]
    name: String,
    duration_minutes: u32,
}

impl TryFrom<ServiceRecord> for Service {
    type Error = AvailabilityError;

    fn try_from(record: ServiceRecord) -> Result<Self> {
        Self::new(record.id, record.name, record.duration_minutes)
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    /// Whether a booking in this state still occupies the staff member's time.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// An existing booking for one staff member.
///
/// `end` includes the buffer that was reserved when the booking was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookingRecord")]
pub struct Booking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub staff_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    /// # Errors
    /// Returns `AvailabilityError::InvalidRecord` unless `end > start`.
    pub fn new(
        staff_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
    ) -> Result<Self> {
        if end <= start {
            return Err(AvailabilityError::InvalidRecord(format!(
                "booking ends at {end} which is not after its start {start}"
            )));
        }
        Ok(Self {
            id: None,
            staff_id: staff_id.into(),
            start,
            end,
            status,
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct BookingRecord {
    #[serde(default)]
    id: Option<String>,
    staff_id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default = "default_booking_status")]
    status: BookingStatus,
}

fn default_booking_status() -> BookingStatus {
    BookingStatus::Confirmed
}

impl TryFrom<BookingRecord> for Booking {
    type Error = AvailabilityError;

    fn try_from(record: BookingRecord) -> Result<Self> {
        let booking = Self::new(record.staff_id, record.start, record.end, record.status)?;
        Ok(match record.id {
            Some(id) => booking.with_id(id),
            None => booking,
        })
    }
}

/// A staff absence. Absences are date-level: any absence touching a date
/// blocks that whole day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AbsenceRecord")]
pub struct Absence {
    pub staff_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl Absence {
    /// # Errors
    /// Returns `AvailabilityError::InvalidRecord` if `end_date < start_date`.
    pub fn new(
        staff_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
    ) -> Result<Self> {
        if end_date < start_date {
            return Err(AvailabilityError::InvalidRecord(format!(
                "absence ends on {end_date}, before it starts on {start_date}"
            )));
        }
        Ok(Self {
            staff_id: staff_id.into(),
            start_date,
            end_date,
            reason: reason.into(),
        })
    }

    /// Inclusive on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Deserialize)]
struct AbsenceRecord {
    staff_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    reason: String,
}

impl TryFrom<AbsenceRecord> for Absence {
    type Error = AvailabilityError;

    fn try_from(record: AbsenceRecord) -> Result<Self> {
        Self::new(
            record.staff_id,
            record.start_date,
            record.end_date,
            record.reason,
        )
    }
}
