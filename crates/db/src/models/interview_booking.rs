//! Interview booking entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarship_core::interview::{hhmm, BookingStatus};
use scholarship_core::types::{DbId, Timestamp};

/// A row from the `interview_bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InterviewBooking {
    pub id: DbId,
    /// `None` only after the slot was deleted, which requires the booking
    /// to have been cancelled first.
    pub slot_id: Option<DbId>,
    pub application_id: DbId,
    pub student_id: DbId,
    #[sqlx(rename = "status_id", try_from = "i16")]
    pub status: BookingStatus,
    pub booked_at: Timestamp,
    pub confirmed_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub cancellation_reason: Option<String>,
    pub check_in_time: Option<Timestamp>,
    pub check_out_time: Option<Timestamp>,
    pub rescheduled_from_slot_id: Option<DbId>,
    pub rescheduled_to_slot_id: Option<DbId>,
    pub student_notes: Option<String>,
    pub officer_notes: Option<String>,
    pub reminder_sent_at: Option<Timestamp>,
    pub actual_duration_minutes: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A booking joined with its slot, scholarship, interviewer and student.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InterviewBookingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: InterviewBooking,
    pub slot_date: Option<NaiveDate>,
    #[serde(serialize_with = "hhmm::option::serialize")]
    pub start_time: Option<NaiveTime>,
    #[serde(serialize_with = "hhmm::option::serialize")]
    pub end_time: Option<NaiveTime>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    pub scholarship_id: DbId,
    pub scholarship_name: String,
    pub interviewer_id: Option<DbId>,
    pub interviewer_name: Option<String>,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub status_name: String,
}

/// DTO for `POST /interview/book`. `slot_id` is required; it is optional
/// here so a missing value surfaces as a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateInterviewBooking {
    pub slot_id: Option<DbId>,
    pub student_notes: Option<String>,
}

/// DTO for `PUT /interview/bookings/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInterviewBooking {
    pub status: Option<BookingStatus>,
    pub student_notes: Option<String>,
    pub officer_notes: Option<String>,
    pub reminder_sent_at: Option<Timestamp>,
}

/// Query parameters for `DELETE /interview/bookings/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct CancelInterviewBooking {
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RescheduleInterviewBooking {
    pub new_slot_id: Option<DbId>,
}

/// Query parameters for `GET /interview/bookings`.
#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub scholarship_id: Option<DbId>,
    pub slot_id: Option<DbId>,
    pub status: Option<BookingStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Forced to the caller's own id for students.
    pub student_id: Option<DbId>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
