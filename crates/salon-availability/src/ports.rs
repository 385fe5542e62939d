//! Read interfaces the engine depends on.
//!
//! The surrounding system implements these over its own storage;
//! [`InMemoryStore`](crate::store::InMemoryStore) implements all of them over
//! plain vectors. Every method is a read: the engine never writes through them.

use chrono::NaiveDate;

use crate::error::Result;
use crate::hours::{BusinessConfig, DayHours};
use crate::model::{Absence, Booking, Service};

/// Source of the business-configuration singleton.
pub trait BusinessConfigStore {
    /// # Errors
    /// Returns `AvailabilityError::ConfigurationMissing` if no configuration
    /// record exists.
    fn business_config(&self) -> Result<BusinessConfig>;
}

/// Operating hours for a given calendar date.
pub trait BusinessHoursProvider {
    /// `Ok(None)` means the business is closed on `date`.
    fn operating_hours(&self, date: NaiveDate) -> Result<Option<DayHours>>;
}

impl<T: BusinessConfigStore + ?Sized> BusinessHoursProvider for T {
    fn operating_hours(&self, date: NaiveDate) -> Result<Option<DayHours>> {
        Ok(self.business_config()?.hours().resolve(date))
    }
}

pub trait BookingRepository {
    /// Pending or confirmed bookings of `staff_id` that start on `date`
    /// (a local date in the business timezone).
    fn find_active_bookings(&self, staff_id: &str, date: NaiveDate) -> Result<Vec<Booking>>;
}

pub trait AbsenceRepository {
    /// Absences of `staff_id` whose date range contains `date`.
    fn find_overlapping(&self, staff_id: &str, date: NaiveDate) -> Result<Vec<Absence>>;
}

pub trait ServiceCatalog {
    /// # Errors
    /// Returns `AvailabilityError::ServiceNotFound` for an unknown id.
    fn service(&self, service_id: &str) -> Result<Service>;
}
