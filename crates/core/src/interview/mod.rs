//! Interview slot scheduling and booking rules.
//!
//! Everything here is pure: the persistence layer loads rows (under the
//! appropriate locks), hands the relevant fields to these functions, and
//! only writes when they return `Ok`.

pub mod availability;
pub mod booking_state;
pub mod conflict;
pub mod eligibility;
pub mod error;
pub mod hhmm;
pub mod slot;
pub mod statistics;
pub mod time_range;

pub use booking_state::BookingStatus;
pub use error::{InterviewError, TimeRangeError};
pub use slot::SlotType;
pub use time_range::SlotWindow;
