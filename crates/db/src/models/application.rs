//! Read-only views of the application records owned by the application service.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scholarship_core::types::{DbId, Timestamp};

/// The application a booking binds to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EligibleApplication {
    pub id: DbId,
    pub student_id: DbId,
    pub scholarship_id: DbId,
    pub status: String,
    pub submitted_at: Option<Timestamp>,
}

/// Query parameters for the officer-facing eligible-application lookup.
#[derive(Debug, Default, Deserialize)]
pub struct EligibleApplicationQuery {
    pub student_id: Option<DbId>,
    pub scholarship_id: Option<DbId>,
}
