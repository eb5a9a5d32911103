//! Booking lifecycle state machine.
//!
//! ```text
//! booked ──confirm──> confirmed ──check-out──> completed
//!   │  ^                  │
//!   │  └──reschedule──────┤
//!   └──cancel──> cancelled <──cancel──┘
//! ```
//!
//! Each transition is a function from the current state (plus whatever
//! timestamps its guard needs) to the next state, so callers cannot apply
//! a transition without running its guard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InterviewError;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Status IDs matching the `booking_statuses` seed data.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Booked = 1,
    Confirmed = 2,
    Cancelled = 3,
    Completed = 4,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Booked,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    /// Return the database status ID.
    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// `booked` and `confirmed` bookings block another booking for the
    /// same application.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Booked | Self::Confirmed)
    }

    /// Every non-cancelled booking occupies a seat in its slot's counter.
    pub fn holds_seat(self) -> bool {
        self != Self::Cancelled
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i16> for BookingStatus {
    type Error = CoreError;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| CoreError::Internal(format!("Unknown booking status id {id}")))
    }
}

impl FromStr for BookingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid booking status '{s}'. Must be one of: booked, confirmed, cancelled, completed"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// `booked -> confirmed`.
pub fn confirm(from: BookingStatus) -> Result<BookingStatus, InterviewError> {
    match from {
        BookingStatus::Booked => Ok(BookingStatus::Confirmed),
        BookingStatus::Confirmed => Err(InterviewError::AlreadyConfirmed),
        BookingStatus::Cancelled => Err(InterviewError::AlreadyCancelled),
        BookingStatus::Completed => Err(InterviewError::InvalidTransition {
            from,
            action: "confirm",
        }),
    }
}

/// `booked | confirmed -> cancelled`. The caller must release the seat.
pub fn cancel(from: BookingStatus) -> Result<BookingStatus, InterviewError> {
    match from {
        BookingStatus::Booked | BookingStatus::Confirmed => Ok(BookingStatus::Cancelled),
        BookingStatus::Cancelled => Err(InterviewError::AlreadyCancelled),
        BookingStatus::Completed => Err(InterviewError::InvalidTransition {
            from,
            action: "cancel",
        }),
    }
}

/// `booked | confirmed -> booked` on a new slot. The caller moves the seat.
///
/// Once the student has arrived the booking is bound to its slot.
pub fn reschedule(
    from: BookingStatus,
    check_in_time: Option<Timestamp>,
) -> Result<BookingStatus, InterviewError> {
    match from {
        BookingStatus::Booked | BookingStatus::Confirmed if check_in_time.is_some() => {
            Err(InterviewError::AlreadyCheckedIn)
        }
        BookingStatus::Booked | BookingStatus::Confirmed => Ok(BookingStatus::Booked),
        BookingStatus::Cancelled | BookingStatus::Completed => {
            Err(InterviewError::InvalidTransition {
                from,
                action: "reschedule",
            })
        }
    }
}

/// Guard for recording arrival. Status is left unchanged.
pub fn check_in(
    status: BookingStatus,
    check_in_time: Option<Timestamp>,
) -> Result<(), InterviewError> {
    if check_in_time.is_some() {
        return Err(InterviewError::AlreadyCheckedIn);
    }
    if !status.is_active() {
        return Err(InterviewError::InvalidTransition {
            from: status,
            action: "check in",
        });
    }
    Ok(())
}

/// Outcome of a successful check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOut {
    pub status: BookingStatus,
    pub actual_duration_minutes: i32,
}

/// `booked | confirmed -> completed`, computing the interview length.
pub fn check_out(
    status: BookingStatus,
    check_in_time: Option<Timestamp>,
    check_out_time: Option<Timestamp>,
    now: Timestamp,
) -> Result<CheckOut, InterviewError> {
    let Some(checked_in_at) = check_in_time else {
        return Err(InterviewError::CheckInRequired);
    };
    if check_out_time.is_some() {
        return Err(InterviewError::AlreadyCheckedOut);
    }
    if !status.is_active() {
        return Err(InterviewError::InvalidTransition {
            from: status,
            action: "check out",
        });
    }
    Ok(CheckOut {
        status: BookingStatus::Completed,
        actual_duration_minutes: duration_minutes(checked_in_at, now),
    })
}

/// Whole minutes between check-in and check-out, floored at zero.
pub fn duration_minutes(check_in: Timestamp, check_out: Timestamp) -> i32 {
    let minutes = (check_out - check_in).num_minutes().max(0);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

/// Validate a status written directly by an officer edit.
///
/// Direct edits never touch the occupancy counter, so they may only move
/// between states that all hold a seat. Cancelling goes through [`cancel`].
pub fn validate_manual_change(
    from: BookingStatus,
    to: BookingStatus,
) -> Result<(), CoreError> {
    if from.holds_seat() && to.holds_seat() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot change booking status from '{from}' to '{to}' directly; use the cancel endpoint"
        )))
    }
}
