//! Detect collisions between a proposed booking and existing ones.
//!
//! Adjacent bookings (one ends exactly when the other starts) are NOT conflicts.
//! Only pending and confirmed bookings can collide.

use chrono::{DateTime, Utc};

use crate::model::Booking;

/// An existing booking that overlaps a proposed time range.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub existing: Booking,
    pub overlap_minutes: i64,
}

/// Find every active booking in `existing` that overlaps `[start, end)`.
///
/// Two ranges overlap when `start < other.end && other.start < end`.
/// The overlap duration is `min(end, other.end) - max(start, other.start)`.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &[Booking],
) -> Vec<Conflict> {
    existing
        .iter()
        .filter(|b| b.status.is_active())
        .filter(|b| start < b.end && b.start < end)
        .map(|b| {
            let overlap_start = start.max(b.start);
            let overlap_end = end.min(b.end);
            Conflict {
                existing: b.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}
