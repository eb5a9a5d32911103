//! Business-rule violations raised by the interview scheduling rules.

use chrono::{NaiveDate, NaiveTime};

use super::booking_state::BookingStatus;
use crate::types::DbId;

/// Malformed or out-of-range date/time input for a slot window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    #[error("Invalid {field} '{value}': expected {expected}")]
    InvalidFormat {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(
        "End time {} must be after start time {}",
        .end.format("%H:%M"),
        .start.format("%H:%M")
    )]
    InvalidOrder { start: NaiveTime, end: NaiveTime },

    #[error("Date {date} is in the past")]
    PastDate { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterviewError {
    #[error(transparent)]
    InvalidTimeRange(#[from] TimeRangeError),

    #[error(
        "Interviewer {interviewer_id} already has slot {existing_slot_id} overlapping {date} {}-{}",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    SlotConflict {
        interviewer_id: DbId,
        existing_slot_id: DbId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Slot {slot_id} is not available for booking")]
    SlotNotBookable { slot_id: DbId },

    #[error("Application {application_id} already has an active interview booking")]
    DuplicateBooking { application_id: DbId },

    #[error("No eligible application found for scholarship {scholarship_id}")]
    NoEligibleApplication { scholarship_id: DbId },

    #[error("Capacity {requested} is below the current {current} bookings")]
    CapacityBelowBookings { requested: i32, current: i32 },

    #[error("Cannot make a slot unavailable while it has {current} bookings")]
    CannotDisableBookedSlot { current: i32 },

    #[error("Cannot delete a slot with {current} bookings")]
    SlotHasBookings { current: i32 },

    #[error("Booking is already confirmed")]
    AlreadyConfirmed,

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("Student has already checked in")]
    AlreadyCheckedIn,

    #[error("Student has already checked out")]
    AlreadyCheckedOut,

    #[error("Student must check in before checking out")]
    CheckInRequired,

    #[error("Cannot {action} a booking that is {from}")]
    InvalidTransition {
        from: BookingStatus,
        action: &'static str,
    },
}

impl InterviewError {
    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTimeRange(_) => "INVALID_INPUT",
            Self::SlotConflict { .. } => "SLOT_CONFLICT",
            Self::SlotNotBookable { .. } => "SLOT_NOT_BOOKABLE",
            Self::DuplicateBooking { .. } => "DUPLICATE_BOOKING",
            Self::NoEligibleApplication { .. } => "NO_ELIGIBLE_APPLICATION",
            Self::CapacityBelowBookings { .. } => "CAPACITY_BELOW_BOOKINGS",
            Self::CannotDisableBookedSlot { .. } => "CANNOT_DISABLE_BOOKED_SLOT",
            Self::SlotHasBookings { .. } => "SLOT_HAS_BOOKINGS",
            Self::AlreadyConfirmed => "ALREADY_CONFIRMED",
            Self::AlreadyCancelled => "ALREADY_CANCELLED",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::AlreadyCheckedOut => "ALREADY_CHECKED_OUT",
            Self::CheckInRequired => "CHECK_IN_REQUIRED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}
