//! Bookable slot computation.
//!
//! Slots sit on a fixed grid anchored at opening time: every start is
//! `opens + k * (duration + buffer)`. A candidate is dropped when its full
//! footprint, buffer included, overlaps a blocked interval; the grid is never
//! shifted to pack slots tighter around existing bookings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blocked::{self, BlockedInterval, BlockedPeriods};
use crate::clock::{parse_clock_time, ClockTime, MINUTES_PER_DAY};
use crate::error::Result;
use crate::hours::DayHours;
use crate::ports::{
    AbsenceRepository, BookingRepository, BusinessConfigStore, BusinessHoursProvider,
    ServiceCatalog,
};

/// A bookable slot as shown to a client.
///
/// `end` is `start + service duration`; the buffer only affects spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// The answer to an availability query: the date, its slots and their count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub slots: Vec<CandidateSlot>,
    pub total: usize,
}

impl AvailabilityResponse {
    pub fn new(date: NaiveDate, slots: Vec<CandidateSlot>) -> Self {
        let total = slots.len();
        Self { date, slots, total }
    }
}

/// Walk the slot grid of one open day and keep the candidates that fit.
///
/// A candidate occupies `[cursor, cursor + duration + buffer)` and is kept when
/// it overlaps none of `blocked`. The loop stops once a full step no longer fits
/// before closing time, so a step longer than the opening window yields nothing.
/// A closing time past 23:59 is treated as 23:59.
pub fn generate_slots(
    hours: DayHours,
    duration_minutes: u32,
    buffer_minutes: u32,
    blocked: &[BlockedInterval],
) -> Vec<CandidateSlot> {
    let step = duration_minutes + buffer_minutes;
    if step == 0 {
        return Vec::new();
    }

    let closes = hours.closes.min(MINUTES_PER_DAY - 1);
    let mut slots = Vec::new();
    let mut cursor = hours.opens;

    while cursor + step <= closes {
        let candidate_end = cursor + step;
        if !blocked.iter().any(|b| b.overlaps(cursor, candidate_end)) {
            // `cursor + duration <= closes <= 23:59`, so both ends are valid clock times.
            slots.push(CandidateSlot {
                start: ClockTime(cursor),
                end: ClockTime(cursor + duration_minutes),
            });
        }
        cursor += step;
    }

    slots
}

/// Computes availability from the four read collaborators.
///
/// Holds borrowed collaborators only; build one per request or keep one around,
/// it carries no state between calls.
#[derive(Clone, Copy)]
pub struct AvailabilityCalculator<'a> {
    pub(crate) config: &'a dyn BusinessConfigStore,
    pub(crate) bookings: &'a dyn BookingRepository,
    pub(crate) absences: &'a dyn AbsenceRepository,
    pub(crate) services: &'a dyn ServiceCatalog,
}

impl<'a> AvailabilityCalculator<'a> {
    pub fn new(
        config: &'a dyn BusinessConfigStore,
        bookings: &'a dyn BookingRepository,
        absences: &'a dyn AbsenceRepository,
        services: &'a dyn ServiceCatalog,
    ) -> Self {
        Self {
            config,
            bookings,
            absences,
            services,
        }
    }

    /// Use one value that implements every collaborator trait.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: BusinessConfigStore + BookingRepository + AbsenceRepository + ServiceCatalog,
    {
        Self::new(store, store, store, store)
    }

    /// Bookable slots for `staff_id` on `date` for `service_id`, ascending by start.
    ///
    /// An empty list means no availability (closed day, absence, or fully
    /// booked); it is never an error.
    ///
    /// # Errors
    /// - `AvailabilityError::ConfigurationMissing` if there is no business configuration.
    /// - `AvailabilityError::ServiceNotFound` if `service_id` is unknown.
    /// - Any error raised by a collaborator, unchanged. No partial result is returned.
    pub fn calculate_available_slots(
        &self,
        staff_id: &str,
        date: NaiveDate,
        service_id: &str,
    ) -> Result<Vec<CandidateSlot>> {
        let Some(hours) = self.config.operating_hours(date)? else {
            debug!(staff_id, %date, "business closed");
            return Ok(Vec::new());
        };

        let service = self.services.service(service_id)?;
        let config = self.config.business_config()?;

        let blocked = blocked::blocked_periods(
            self.bookings,
            self.absences,
            staff_id,
            date,
            config.timezone(),
        )?;
        let intervals = match blocked {
            BlockedPeriods::WholeDay => return Ok(Vec::new()),
            BlockedPeriods::Intervals(intervals) => intervals,
        };

        let slots = generate_slots(
            hours,
            service.duration_minutes(),
            config.buffer_minutes(),
            &intervals,
        );
        debug!(
            staff_id,
            service_id,
            %date,
            slots = slots.len(),
            "computed available slots"
        );
        Ok(slots)
    }

    /// [`calculate_available_slots`](Self::calculate_available_slots) wrapped
    /// in the response shape returned to clients.
    pub fn availability(
        &self,
        staff_id: &str,
        date: NaiveDate,
        service_id: &str,
    ) -> Result<AvailabilityResponse> {
        let slots = self.calculate_available_slots(staff_id, date, service_id)?;
        Ok(AvailabilityResponse::new(date, slots))
    }

    /// Whether a slot starting at `time` (`HH:mm`) would be offered.
    ///
    /// Recomputes the full slot list so the answer always agrees with
    /// [`calculate_available_slots`](Self::calculate_available_slots).
    ///
    /// # Errors
    /// `AvailabilityError::Format` if `time` is not `HH:mm`, plus every error
    /// `calculate_available_slots` can return.
    pub fn is_slot_available(
        &self,
        staff_id: &str,
        date: NaiveDate,
        time: &str,
        service_id: &str,
    ) -> Result<bool> {
        let wanted = parse_clock_time(time)?;
        let slots = self.calculate_available_slots(staff_id, date, service_id)?;
        Ok(slots.iter().any(|slot| slot.start.minutes() == wanted))
    }
}
