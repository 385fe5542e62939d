//! Acceptance check for new bookings.
//!
//! The availability engine may offer the same slot to two clients at once.
//! Whoever persists bookings must run [`AvailabilityCalculator::plan_booking`]
//! (or [`find_conflicts`](crate::conflict::find_conflicts) inside its own
//! transaction) immediately before inserting, and reject the second writer.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::availability::AvailabilityCalculator;
use crate::clock::{minutes_of_day, ClockTime};
use crate::conflict::find_conflicts;
use crate::error::{AvailabilityError, Result};
use crate::model::BookingStatus;

/// A client's request to book `service_id` with `staff_id` at `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub staff_id: String,
    pub service_id: String,
    pub start: DateTime<Utc>,
}

/// A booking that passed every availability check and is ready to store.
///
/// `end` covers the service and the buffer that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedBooking {
    pub staff_id: String,
    pub service_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

impl AvailabilityCalculator<'_> {
    /// Validate `request` against current availability and compute its end.
    ///
    /// # Errors
    /// - `AvailabilityError::Format` if `start` is not on a whole minute.
    /// - `AvailabilityError::SlotUnavailable` if the slot is not offered or an
    ///   active booking already overlaps it.
    /// - Every error [`calculate_available_slots`](Self::calculate_available_slots) can return.
    pub fn plan_booking(&self, request: &BookingRequest) -> Result<PlannedBooking> {
        if request.start.second() != 0 || request.start.nanosecond() != 0 {
            return Err(AvailabilityError::Format(format!(
                "booking start {} is not on a whole minute",
                request.start
            )));
        }

        let config = self.config.business_config()?;
        let local_start = request.start.with_timezone(&config.timezone());
        let date = local_start.date_naive();
        let time = ClockTime(minutes_of_day(&local_start)).to_string();

        if !self.is_slot_available(&request.staff_id, date, &time, &request.service_id)? {
            return Err(AvailabilityError::SlotUnavailable(format!(
                "{} at {time} on {date} is not an offered slot",
                request.staff_id
            )));
        }

        let service = self.services.service(&request.service_id)?;
        let footprint = i64::from(service.duration_minutes() + config.buffer_minutes());
        let end = request.start + Duration::minutes(footprint);

        let existing = self.bookings.find_active_bookings(&request.staff_id, date)?;
        if let Some(conflict) = find_conflicts(request.start, end, &existing).first() {
            debug!(
                staff_id = %request.staff_id,
                existing_start = %conflict.existing.start,
                overlap_minutes = conflict.overlap_minutes,
                "booking collides with an existing one"
            );
            return Err(AvailabilityError::SlotUnavailable(format!(
                "overlaps an existing booking starting at {} by {} minutes",
                conflict.existing.start, conflict.overlap_minutes
            )));
        }

        info!(
            staff_id = %request.staff_id,
            service_id = %request.service_id,
            start = %request.start,
            %end,
            "booking accepted"
        );
        Ok(PlannedBooking {
            staff_id: request.staff_id.clone(),
            service_id: request.service_id.clone(),
            start: request.start,
            end,
            status: BookingStatus::Confirmed,
        })
    }
}
