//! Which scholarship applications may be bound to an interview booking.

/// Application statuses that qualify for an interview.
pub const ELIGIBLE_APPLICATION_STATUSES: [&str; 3] = ["submitted", "under_review", "approved"];
