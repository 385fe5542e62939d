//! # salon-availability
//!
//! Bookable time-slot computation for salon staff.
//!
//! Given a staff member, a date and a service, the engine reads the business
//! hours, the staff member's bookings and absences, and the service duration,
//! and returns the grid-aligned slots a client may book. It performs no writes.
//!
//! ## Modules
//!
//! - [`clock`] — `HH:mm` ↔ minutes-since-midnight conversions
//! - [`hours`] — Business configuration and operating-hours resolution
//! - [`model`] — Services, bookings and absences
//! - [`ports`] — Read interfaces the engine depends on
//! - [`blocked`] — Blocked-period aggregation from bookings and absences
//! - [`availability`] — Slot generation and point availability checks
//! - [`conflict`] — Overlap detection between bookings
//! - [`booking`] — Acceptance check for new bookings
//! - [`store`] — In-memory collaborators
//! - [`error`] — Error types

pub mod availability;
pub mod blocked;
pub mod booking;
pub mod clock;
pub mod conflict;
pub mod error;
pub mod hours;
pub mod model;
pub mod ports;
pub mod store;

pub use availability::{generate_slots, AvailabilityCalculator, AvailabilityResponse, CandidateSlot};
pub use booking::{BookingRequest, PlannedBooking};
pub use clock::{format_clock_time, minutes_of_day, parse_clock_time, ClockTime};
pub use conflict::find_conflicts;
pub use error::{AvailabilityError, ErrorClass};
pub use hours::{BusinessConfig, DayHours, OperatingHours, WeeklyHours};
pub use model::{Absence, Booking, BookingStatus, Service};
pub use store::InMemoryStore;
