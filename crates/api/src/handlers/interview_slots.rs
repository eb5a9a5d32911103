//! Handlers for interview slot management.
//!
//! Officers create and maintain slots; any authenticated caller may browse
//! them. Editing or deleting a slot is limited to its creator and admins.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use scholarship_core::error::CoreError;
use scholarship_core::pagination::{PageInfo, PageRequest};
use scholarship_core::types::DbId;
use scholarship_db::models::interview_slot::{
    CreateInterviewSlot, InterviewSlot, SlotListQuery, UpdateInterviewSlot,
};
use scholarship_db::repositories::InterviewSlotRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOfficer};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_slot_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<InterviewSlot> {
    InterviewSlotRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "InterviewSlot",
            id,
        })
    })
}

/// Only the officer who created a slot, or an admin, may change it.
fn ensure_slot_owner(user: &AuthUser, slot: &InterviewSlot) -> AppResult<()> {
    if user.is_admin() || slot.created_by == user.user_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Slot {} was created by another officer",
            slot.id
        ))))
    }
}

// ---------------------------------------------------------------------------
// POST /interview/slots
// ---------------------------------------------------------------------------

pub async fn create_slot(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Json(body): Json<CreateInterviewSlot>,
) -> AppResult<impl IntoResponse> {
    let input = body.validate(Utc::now().date_naive())?;
    let slot = InterviewSlotRepo::create(&state.pool, &input, user.user_id).await?;

    tracing::info!(
        slot_id = slot.id,
        interviewer_id = slot.interviewer_id,
        slot_date = %slot.slot_date,
        user_id = user.user_id,
        "Interview slot created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: slot })))
}

// ---------------------------------------------------------------------------
// GET /interview/slots
// ---------------------------------------------------------------------------

pub async fn list_slots(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<SlotListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest::new(params.page, params.page_size);
    let (slots, total) = InterviewSlotRepo::list(&state.pool, &params, page).await?;

    tracing::debug!(count = slots.len(), total, "Listed interview slots");

    Ok(Json(PaginatedResponse {
        data: slots,
        pagination: PageInfo::new(page, total),
    }))
}

// ---------------------------------------------------------------------------
// GET /interview/slots/{id}
// ---------------------------------------------------------------------------

pub async fn get_slot(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let slot = ensure_slot_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: slot }))
}

// ---------------------------------------------------------------------------
// PUT /interview/slots/{id}
// ---------------------------------------------------------------------------

pub async fn update_slot(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateInterviewSlot>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_slot_exists(&state.pool, id).await?;
    ensure_slot_owner(&user, &existing)?;

    let slot = InterviewSlotRepo::update(&state.pool, id, &body).await?;

    tracing::info!(slot_id = id, user_id = user.user_id, "Interview slot updated");

    Ok(Json(DataResponse { data: slot }))
}

// ---------------------------------------------------------------------------
// DELETE /interview/slots/{id}
// ---------------------------------------------------------------------------

pub async fn delete_slot(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ensure_slot_exists(&state.pool, id).await?;
    ensure_slot_owner(&user, &existing)?;

    InterviewSlotRepo::delete(&state.pool, id).await?;

    tracing::info!(slot_id = id, user_id = user.user_id, "Interview slot deleted");

    Ok(StatusCode::NO_CONTENT)
}
