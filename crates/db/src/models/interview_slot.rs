//! Interview slot entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarship_core::error::CoreError;
use scholarship_core::interview::slot::{
    self, Occupancy, DEFAULT_DURATION_MINUTES, DEFAULT_MAX_CAPACITY, DEFAULT_PREPARATION_MINUTES,
};
use scholarship_core::interview::{hhmm, time_range, SlotType, SlotWindow};
use scholarship_core::types::{DbId, Timestamp};

/// A row from the `interview_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InterviewSlot {
    pub id: DbId,
    pub scholarship_id: DbId,
    pub interviewer_id: DbId,
    pub slot_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    pub max_capacity: i32,
    pub current_bookings: i32,
    pub is_available: bool,
    #[sqlx(try_from = "String")]
    pub slot_type: SlotType,
    pub duration_minutes: i32,
    pub preparation_minutes: i32,
    pub notes: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InterviewSlot {
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            is_available: self.is_available,
            current_bookings: self.current_bookings,
            max_capacity: self.max_capacity,
        }
    }
}

/// DTO for `POST /interview/slots`.
///
/// Everything is optional at the wire level so that a missing required
/// field surfaces as a validation error rather than a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateInterviewSlot {
    pub scholarship_id: Option<DbId>,
    pub interviewer_id: Option<DbId>,
    pub slot_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    pub max_capacity: Option<i32>,
    pub slot_type: Option<String>,
    pub duration_minutes: Option<i32>,
    pub preparation_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// A slot that passed validation and had its defaults applied.
#[derive(Debug, Clone)]
pub struct NewInterviewSlot {
    pub scholarship_id: DbId,
    pub interviewer_id: DbId,
    pub window: SlotWindow,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    pub max_capacity: i32,
    pub slot_type: SlotType,
    pub duration_minutes: i32,
    pub preparation_minutes: i32,
    pub notes: Option<String>,
}

impl CreateInterviewSlot {
    /// Check required fields and the time window, then apply defaults.
    pub fn validate(&self, today: NaiveDate) -> Result<NewInterviewSlot, CoreError> {
        let scholarship_id = slot::require(self.scholarship_id, "scholarship_id")?;
        let interviewer_id = slot::require(self.interviewer_id, "interviewer_id")?;
        let slot_date = slot::require(self.slot_date.as_deref(), "slot_date")?;
        let start_time = slot::require(self.start_time.as_deref(), "start_time")?;
        let end_time = slot::require(self.end_time.as_deref(), "end_time")?;

        let window = time_range::validate_window(slot_date, start_time, end_time, today)
            .map_err(|e| CoreError::Interview(e.into()))?;

        let max_capacity = self.max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY);
        slot::validate_capacity(max_capacity)?;
        let duration_minutes = self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        slot::validate_duration(duration_minutes)?;
        let preparation_minutes = self
            .preparation_minutes
            .unwrap_or(DEFAULT_PREPARATION_MINUTES);
        slot::validate_preparation(preparation_minutes)?;
        let slot_type = match self.slot_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => SlotType::default(),
        };

        Ok(NewInterviewSlot {
            scholarship_id,
            interviewer_id,
            window,
            building: self.building.clone(),
            floor: self.floor.clone(),
            room: self.room.clone(),
            location: self.location.clone(),
            max_capacity,
            slot_type,
            duration_minutes,
            preparation_minutes,
            notes: self.notes.clone(),
        })
    }
}

/// DTO for `PUT /interview/slots/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInterviewSlot {
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    pub max_capacity: Option<i32>,
    pub is_available: Option<bool>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /interview/slots`.
#[derive(Debug, Default, Deserialize)]
pub struct SlotListQuery {
    pub scholarship_id: Option<DbId>,
    pub interviewer_id: Option<DbId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub is_available: Option<bool>,
    pub slot_type: Option<SlotType>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
