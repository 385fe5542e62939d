//! In-memory implementation of every collaborator trait.
//!
//! Backs the CLI and the tests. A JSON snapshot has the shape
//! `{"business": {...}, "services": [...], "bookings": [...], "absences": [...]}`;
//! every key is optional and a missing `business` behaves like an unconfigured
//! deployment.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{AvailabilityError, Result};
use crate::hours::BusinessConfig;
use crate::model::{Absence, Booking, Service};
use crate::ports::{AbsenceRepository, BookingRepository, BusinessConfigStore, ServiceCatalog};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InMemoryStore {
    business: Option<BusinessConfig>,
    services: Vec<Service>,
    bookings: Vec<Booking>,
    absences: Vec<Absence>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, validating every record on the way in.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidRecord` for malformed JSON or any
    /// record that breaks its invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AvailabilityError::InvalidRecord(e.to_string()))
    }

    pub fn with_business(mut self, config: BusinessConfig) -> Self {
        self.business = Some(config);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.bookings.push(booking);
        self
    }

    pub fn with_absence(mut self, absence: Absence) -> Self {
        self.absences.push(absence);
        self
    }

    /// Record a booking, e.g. one returned by
    /// [`plan_booking`](crate::availability::AvailabilityCalculator::plan_booking).
    pub fn insert_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    fn timezone(&self) -> Tz {
        self.business
            .as_ref()
            .map(BusinessConfig::timezone)
            .unwrap_or(Tz::UTC)
    }
}

impl BusinessConfigStore for InMemoryStore {
    fn business_config(&self) -> Result<BusinessConfig> {
        self.business
            .clone()
            .ok_or(AvailabilityError::ConfigurationMissing)
    }
}

impl BookingRepository for InMemoryStore {
    fn find_active_bookings(&self, staff_id: &str, date: NaiveDate) -> Result<Vec<Booking>> {
        let tz = self.timezone();
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.staff_id == staff_id && b.status.is_active())
            .filter(|b| b.start.with_timezone(&tz).date_naive() == date)
            .cloned()
            .collect())
    }
}

impl AbsenceRepository for InMemoryStore {
    fn find_overlapping(&self, staff_id: &str, date: NaiveDate) -> Result<Vec<Absence>> {
        Ok(self
            .absences
            .iter()
            .filter(|a| a.staff_id == staff_id && a.covers(date))
            .cloned()
            .collect())
    }
}

impl ServiceCatalog for InMemoryStore {
    fn service(&self, service_id: &str) -> Result<Service> {
        self.services
            .iter()
            .find(|s| s.id() == service_id)
            .cloned()
            .ok_or_else(|| AvailabilityError::ServiceNotFound(service_id.to_string()))
    }
}
