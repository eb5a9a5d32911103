//! Slot capacity rules, defaults, and input validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InterviewError;
use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
   Defaults
   -------------------------------------------------------------------------- */

pub const DEFAULT_MAX_CAPACITY: i32 = 1;
pub const DEFAULT_DURATION_MINUTES: i32 = 30;
pub const DEFAULT_PREPARATION_MINUTES: i32 = 0;

/// Rendered when a slot has no location fields at all.
pub const LOCATION_TBA: &str = "TBA";

/* --------------------------------------------------------------------------
   Slot type
   -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    #[default]
    Individual,
    Group,
}

impl SlotType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "group" => Ok(Self::Group),
            other => Err(CoreError::Validation(format!(
                "Invalid slot type '{other}'. Must be one of: individual, group"
            ))),
        }
    }
}

impl TryFrom<String> for SlotType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/* --------------------------------------------------------------------------
   Occupancy
   -------------------------------------------------------------------------- */

/// The fields of a slot that decide whether it can take another booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub is_available: bool,
    pub current_bookings: i32,
    pub max_capacity: i32,
}

impl Occupancy {
    /// A slot is bookable iff it is available and has spare capacity.
    pub fn is_bookable(&self) -> bool {
        self.is_available && self.current_bookings < self.max_capacity
    }

    pub fn remaining(&self) -> i32 {
        (self.max_capacity - self.current_bookings).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.current_bookings >= self.max_capacity
    }

    pub fn ensure_bookable(&self, slot_id: DbId) -> Result<(), InterviewError> {
        if self.is_bookable() {
            Ok(())
        } else {
            Err(InterviewError::SlotNotBookable { slot_id })
        }
    }

    /// Capacity may not drop below the seats already taken.
    pub fn check_capacity_change(&self, new_capacity: i32) -> Result<(), InterviewError> {
        if new_capacity < self.current_bookings {
            return Err(InterviewError::CapacityBelowBookings {
                requested: new_capacity,
                current: self.current_bookings,
            });
        }
        Ok(())
    }

    /// A slot with bookings cannot be switched off.
    pub fn check_availability_change(&self, is_available: bool) -> Result<(), InterviewError> {
        if !is_available && self.current_bookings > 0 {
            return Err(InterviewError::CannotDisableBookedSlot {
                current: self.current_bookings,
            });
        }
        Ok(())
    }

    pub fn check_deletable(&self) -> Result<(), InterviewError> {
        if self.current_bookings > 0 {
            return Err(InterviewError::SlotHasBookings {
                current: self.current_bookings,
            });
        }
        Ok(())
    }
}

/* --------------------------------------------------------------------------
   Input validation
   -------------------------------------------------------------------------- */

pub fn validate_capacity(max_capacity: i32) -> Result<(), CoreError> {
    if max_capacity < 1 {
        return Err(CoreError::Validation(format!(
            "max_capacity must be at least 1, got {max_capacity}"
        )));
    }
    Ok(())
}

pub fn validate_duration(duration_minutes: i32) -> Result<(), CoreError> {
    if duration_minutes < 1 {
        return Err(CoreError::Validation(format!(
            "duration_minutes must be at least 1, got {duration_minutes}"
        )));
    }
    Ok(())
}

pub fn validate_preparation(preparation_minutes: i32) -> Result<(), CoreError> {
    if preparation_minutes < 0 {
        return Err(CoreError::Validation(format!(
            "preparation_minutes must not be negative, got {preparation_minutes}"
        )));
    }
    Ok(())
}

/// Fail with a validation error naming the first missing required field.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Join the non-empty location parts into one display string.
pub fn format_location(
    building: Option<&str>,
    floor: Option<&str>,
    room: Option<&str>,
    location: Option<&str>,
) -> String {
    let parts: Vec<&str> = [building, floor, room, location]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        LOCATION_TBA.to_string()
    } else {
        parts.join(", ")
    }
}
