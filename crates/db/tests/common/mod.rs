//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use scholarship_core::types::DbId;
use scholarship_db::models::interview_slot::{CreateInterviewSlot, InterviewSlot};
use scholarship_db::repositories::InterviewSlotRepo;

pub async fn create_user(pool: &PgPool, email: &str, full_name: &str, role: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (email, full_name, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(full_name)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_student_profile(pool: &PgPool, user_id: DbId) -> DbId {
    sqlx::query_scalar("INSERT INTO students (user_id) VALUES ($1) RETURNING id")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_scholarship(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO scholarships (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_application(
    pool: &PgPool,
    student_id: DbId,
    scholarship_id: DbId,
    status: &str,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO scholarship_applications (student_id, scholarship_id, status, submitted_at) \
         VALUES ($1, $2, $3, NOW()) RETURNING id",
    )
    .bind(student_id)
    .bind(scholarship_id)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// A calendar day safely in the future.
pub fn future_date(days_ahead: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days_ahead)
}

/// An officer, an interviewer and a scholarship to hang slots off.
pub struct Fixture {
    pub officer_id: DbId,
    pub interviewer_id: DbId,
    pub scholarship_id: DbId,
}

impl Fixture {
    pub async fn new(pool: &PgPool) -> Self {
        Self {
            officer_id: create_user(pool, "officer@example.com", "Olive Officer", "officer").await,
            interviewer_id: create_user(pool, "iv@example.com", "Ivan Interviewer", "interviewer")
                .await,
            scholarship_id: create_scholarship(pool, "Merit Award").await,
        }
    }

    pub fn slot_input(&self, date: NaiveDate, start: &str, end: &str) -> CreateInterviewSlot {
        CreateInterviewSlot {
            scholarship_id: Some(self.scholarship_id),
            interviewer_id: Some(self.interviewer_id),
            slot_date: Some(date.to_string()),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Default::default()
        }
    }

    pub async fn create_slot(
        &self,
        pool: &PgPool,
        date: NaiveDate,
        start: &str,
        end: &str,
        capacity: i32,
    ) -> InterviewSlot {
        let input = CreateInterviewSlot {
            max_capacity: Some(capacity),
            ..self.slot_input(date, start, end)
        };
        let new_slot = input.validate(Utc::now().date_naive()).unwrap();
        InterviewSlotRepo::create(pool, &new_slot, self.officer_id)
            .await
            .unwrap()
    }

    /// A student account with a profile and a submitted application.
    /// Returns `(user_id, student_id, application_id)`.
    pub async fn applicant(&self, pool: &PgPool, email: &str) -> (DbId, DbId, DbId) {
        let user_id = create_user(pool, email, "Sam Student", "student").await;
        let student_id = create_student_profile(pool, user_id).await;
        let application_id =
            create_application(pool, student_id, self.scholarship_id, "submitted").await;
        (user_id, student_id, application_id)
    }
}

pub async fn current_bookings(pool: &PgPool, slot_id: DbId) -> i32 {
    sqlx::query_scalar("SELECT current_bookings FROM interview_slots WHERE id = $1")
        .bind(slot_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
