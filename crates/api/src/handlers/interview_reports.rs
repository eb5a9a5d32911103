//! Read-only interview views: availability calendar, statistics, and the
//! officer-facing eligible-application lookup.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use scholarship_core::error::CoreError;
use scholarship_core::interview::{availability, slot};
use scholarship_core::interview::InterviewError;
use scholarship_core::types::DbId;
use scholarship_db::models::application::EligibleApplicationQuery;
use scholarship_db::models::interview_statistics::StatisticsQuery;
use scholarship_db::repositories::{
    ApplicationRepo, InterviewAvailabilityRepo, InterviewStatisticsRepo,
};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireOfficer};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub scholarship_id: Option<DbId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// GET /interview/availability
// ---------------------------------------------------------------------------

pub async fn get_availability(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<impl IntoResponse> {
    let scholarship_id = slot::require(params.scholarship_id, "scholarship_id")?;
    let (from, to) =
        availability::resolve_range(params.date_from, params.date_to, Utc::now().date_naive())?;
    let days =
        InterviewAvailabilityRepo::calendar(&state.pool, scholarship_id, from, to).await?;

    tracing::debug!(
        scholarship_id,
        %from,
        %to,
        days = days.len(),
        "Built availability calendar"
    );

    Ok(Json(DataResponse { data: days }))
}

// ---------------------------------------------------------------------------
// GET /interview/statistics
// ---------------------------------------------------------------------------

pub async fn get_statistics(
    State(state): State<AppState>,
    RequireOfficer(_user): RequireOfficer,
    Query(params): Query<StatisticsQuery>,
) -> AppResult<impl IntoResponse> {
    if let (Some(from), Some(to)) = (params.date_from, params.date_to) {
        if to < from {
            return Err(CoreError::Validation(format!(
                "date_to ({to}) must not be before date_from ({from})"
            ))
            .into());
        }
    }
    let stats = InterviewStatisticsRepo::compute(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// GET /interview/eligible-application
// ---------------------------------------------------------------------------

/// The application a booking by `student_id` for `scholarship_id` would bind to.
pub async fn get_eligible_application(
    State(state): State<AppState>,
    RequireOfficer(_user): RequireOfficer,
    Query(params): Query<EligibleApplicationQuery>,
) -> AppResult<impl IntoResponse> {
    let student_id = slot::require(params.student_id, "student_id")?;
    let scholarship_id = slot::require(params.scholarship_id, "scholarship_id")?;
    let application = ApplicationRepo::find_eligible(&state.pool, student_id, scholarship_id)
        .await?
        .ok_or(InterviewError::NoEligibleApplication { scholarship_id })?;
    Ok(Json(DataResponse { data: application }))
}
