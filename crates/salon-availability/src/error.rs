//! Error types for availability and booking operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid time format: {0}")]
    Format(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Business configuration not found")]
    ConfigurationMissing,

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    /// Raised by collaborator implementations when their backend fails; the
    /// engine passes it through unchanged.
    #[error("Repository error: {0}")]
    Repository(String),
}

/// How an outer layer should surface an [`AvailabilityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller-correctable input (bad time/date string, slot already taken).
    Client,
    /// A referenced entity does not exist.
    NotFound,
    /// Deployment or backend defect; not the caller's fault.
    Internal,
}

impl AvailabilityError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AvailabilityError::Format(_)
            | AvailabilityError::InvalidRecord(_)
            | AvailabilityError::SlotUnavailable(_) => ErrorClass::Client,
            AvailabilityError::ServiceNotFound(_) => ErrorClass::NotFound,
            AvailabilityError::ConfigurationMissing
            | AvailabilityError::InvalidTimezone(_)
            | AvailabilityError::Repository(_) => ErrorClass::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
