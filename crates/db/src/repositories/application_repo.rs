//! Read-only lookups against the student and application tables.
//!
//! Methods take any executor so the booking flow can run them inside its
//! transaction while the officer lookup runs them on the pool.

use sqlx::PgExecutor;
use scholarship_core::interview::eligibility::ELIGIBLE_APPLICATION_STATUSES;
use scholarship_core::types::DbId;

use crate::models::application::EligibleApplication;

const COLUMNS: &str = "id, student_id, scholarship_id, status, submitted_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Map an account id to its student profile id.
    ///
    /// Accounts without a student profile fall back to the account id itself.
    pub async fn resolve_student_id<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<DbId, sqlx::Error> {
        let student_id: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM students WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(executor)
                .await?;
        Ok(student_id.unwrap_or(user_id))
    }

    /// The most recently submitted eligible application for a student and
    /// scholarship, if any.
    pub async fn find_eligible<'e>(
        executor: impl PgExecutor<'e>,
        student_id: DbId,
        scholarship_id: DbId,
    ) -> Result<Option<EligibleApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scholarship_applications \
             WHERE student_id = $1 AND scholarship_id = $2 AND status = ANY($3) \
             ORDER BY submitted_at DESC NULLS LAST, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, EligibleApplication>(&query)
            .bind(student_id)
            .bind(scholarship_id)
            .bind(ELIGIBLE_APPLICATION_STATUSES.as_slice())
            .fetch_optional(executor)
            .await
    }
}
