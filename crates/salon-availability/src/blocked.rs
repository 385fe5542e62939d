//! Blocked-period aggregation for one staff member on one date.
//!
//! Absences block the whole day. Otherwise every active booking becomes a
//! half-open `[start, end)` interval in minutes since local midnight.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::clock::{minutes_of_day, MINUTES_PER_DAY};
use crate::error::Result;
use crate::model::Booking;
use crate::ports::{AbsenceRepository, BookingRepository};

/// A half-open interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedInterval {
    pub start: u32,
    pub end: u32,
}

impl BlockedInterval {
    /// Two half-open intervals overlap iff `start < other_end && end > other_start`.
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        start < self.end && end > self.start
    }
}

/// Result of aggregating a staff member's unavailability for a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockedPeriods {
    /// An absence covers the date; nothing can be booked.
    WholeDay,
    /// Busy intervals from existing bookings, in no particular order.
    Intervals(Vec<BlockedInterval>),
}

impl BlockedPeriods {
    pub fn is_whole_day(&self) -> bool {
        matches!(self, BlockedPeriods::WholeDay)
    }
}

/// Gather the periods during which `staff_id` cannot be booked on `date`.
pub fn blocked_periods(
    bookings: &dyn BookingRepository,
    absences: &dyn AbsenceRepository,
    staff_id: &str,
    date: NaiveDate,
    timezone: Tz,
) -> Result<BlockedPeriods> {
    let absent = absences.find_overlapping(staff_id, date)?;
    if !absent.is_empty() {
        debug!(staff_id, %date, absences = absent.len(), "whole day blocked by absence");
        return Ok(BlockedPeriods::WholeDay);
    }

    let intervals: Vec<BlockedInterval> = bookings
        .find_active_bookings(staff_id, date)?
        .iter()
        .filter(|b| b.status.is_active())
        .filter_map(|b| booking_interval(b, date, timezone))
        .collect();

    debug!(staff_id, %date, blocked = intervals.len(), "collected blocked intervals");
    Ok(BlockedPeriods::Intervals(intervals))
}

/// Project a booking onto `date`'s wall clock.
///
/// Returns `None` for a booking that does not start on `date`. A booking that
/// runs past local midnight is clipped to the end of the day.
pub fn booking_interval(
    booking: &Booking,
    date: NaiveDate,
    timezone: Tz,
) -> Option<BlockedInterval> {
    let start = booking.start.with_timezone(&timezone);
    let end = booking.end.with_timezone(&timezone);

    if start.date_naive() != date {
        warn!(
            staff_id = %booking.staff_id,
            %date,
            start = %start,
            "ignoring booking that does not start on the requested date"
        );
        return None;
    }

    let start_minutes = minutes_of_day(&start);
    let end_minutes = if end.date_naive() > date {
        MINUTES_PER_DAY
    } else {
        minutes_of_day(&end)
    };

    if end_minutes <= start_minutes {
        return None;
    }

    Some(BlockedInterval {
        start: start_minutes,
        end: end_minutes,
    })
}
