//! Handlers for the booking lifecycle.
//!
//! Students book, view, cancel and reschedule their own bookings. Officers
//! may act on any booking and are the only callers who can edit, confirm,
//! or record check-in and check-out.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scholarship_core::error::CoreError;
use scholarship_core::interview::slot;
use scholarship_core::pagination::{PageInfo, PageRequest};
use scholarship_core::types::DbId;
use scholarship_db::models::interview_booking::{
    BookingListQuery, CancelInterviewBooking, CreateInterviewBooking, InterviewBooking,
    RescheduleInterviewBooking, UpdateInterviewBooking,
};
use scholarship_db::repositories::{ApplicationRepo, InterviewBookingRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOfficer};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_booking_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<InterviewBooking> {
    InterviewBookingRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "InterviewBooking",
                id,
            })
        })
}

/// Staff pass; students must own the booking.
async fn ensure_booking_access(
    pool: &sqlx::PgPool,
    user: &AuthUser,
    booking: &InterviewBooking,
) -> AppResult<()> {
    if user.is_staff() {
        return Ok(());
    }
    let student_id = ApplicationRepo::resolve_student_id(pool, user.user_id).await?;
    if booking.student_id == student_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Booking belongs to another student".into(),
        )))
    }
}

// ---------------------------------------------------------------------------
// POST /interview/book
// ---------------------------------------------------------------------------

pub async fn book_slot(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateInterviewBooking>,
) -> AppResult<impl IntoResponse> {
    let slot_id = slot::require(body.slot_id, "slot_id")?;
    let booking = InterviewBookingRepo::create(
        &state.pool,
        user.user_id,
        slot_id,
        body.student_notes.as_deref(),
    )
    .await?;

    tracing::info!(
        booking_id = booking.id,
        slot_id,
        application_id = booking.application_id,
        user_id = user.user_id,
        "Interview booked"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

// ---------------------------------------------------------------------------
// GET /interview/bookings
// ---------------------------------------------------------------------------

/// List bookings. Students only ever see their own.
pub async fn list_bookings(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(mut params): Query<BookingListQuery>,
) -> AppResult<impl IntoResponse> {
    if !user.is_staff() {
        params.student_id =
            Some(ApplicationRepo::resolve_student_id(&state.pool, user.user_id).await?);
    }
    let page = PageRequest::new(params.page, params.page_size);
    let (bookings, total) = InterviewBookingRepo::list(&state.pool, &params, page).await?;

    tracing::debug!(count = bookings.len(), total, user_id = user.user_id, "Listed bookings");

    Ok(Json(PaginatedResponse {
        data: bookings,
        pagination: PageInfo::new(page, total),
    }))
}

// ---------------------------------------------------------------------------
// GET /interview/bookings/{id}
// ---------------------------------------------------------------------------

pub async fn get_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = InterviewBookingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "InterviewBooking",
                id,
            })
        })?;
    ensure_booking_access(&state.pool, &user, &detail.booking).await?;

    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// PUT /interview/bookings/{id}
// ---------------------------------------------------------------------------

pub async fn update_booking(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateInterviewBooking>,
) -> AppResult<impl IntoResponse> {
    let booking = InterviewBookingRepo::update(&state.pool, id, &body).await?;

    tracing::info!(
        booking_id = id,
        status = %booking.status,
        user_id = user.user_id,
        "Booking updated"
    );

    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// DELETE /interview/bookings/{id}
// ---------------------------------------------------------------------------

/// Cancel a booking (`?reason=`). The row is kept with status `cancelled`.
pub async fn cancel_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Query(params): Query<CancelInterviewBooking>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_booking_exists(&state.pool, id).await?;
    ensure_booking_access(&state.pool, &user, &existing).await?;

    let booking = InterviewBookingRepo::cancel(&state.pool, id, params.reason.as_deref()).await?;

    tracing::info!(
        booking_id = id,
        slot_id = ?booking.slot_id,
        user_id = user.user_id,
        "Booking cancelled"
    );

    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// POST /interview/bookings/{id}/reschedule
// ---------------------------------------------------------------------------

pub async fn reschedule_booking(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(body): Json<RescheduleInterviewBooking>,
) -> AppResult<impl IntoResponse> {
    let new_slot_id = slot::require(body.new_slot_id, "new_slot_id")?;
    let existing = ensure_booking_exists(&state.pool, id).await?;
    ensure_booking_access(&state.pool, &user, &existing).await?;

    let booking = InterviewBookingRepo::reschedule(&state.pool, id, new_slot_id).await?;

    tracing::info!(
        booking_id = id,
        from_slot_id = ?existing.slot_id,
        to_slot_id = new_slot_id,
        user_id = user.user_id,
        "Booking rescheduled"
    );

    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// POST /interview/bookings/{id}/confirm
// ---------------------------------------------------------------------------

pub async fn confirm_booking(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = InterviewBookingRepo::confirm(&state.pool, id).await?;
    tracing::info!(booking_id = id, user_id = user.user_id, "Booking confirmed");
    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// POST /interview/bookings/{id}/checkin
// ---------------------------------------------------------------------------

pub async fn check_in(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = InterviewBookingRepo::check_in(&state.pool, id).await?;
    tracing::info!(booking_id = id, user_id = user.user_id, "Student checked in");
    Ok(Json(DataResponse { data: booking }))
}

// ---------------------------------------------------------------------------
// POST /interview/bookings/{id}/checkout
// ---------------------------------------------------------------------------

pub async fn check_out(
    State(state): State<AppState>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = InterviewBookingRepo::check_out(&state.pool, id).await?;
    tracing::info!(
        booking_id = id,
        duration_minutes = ?booking.actual_duration_minutes,
        user_id = user.user_id,
        "Student checked out"
    );
    Ok(Json(DataResponse { data: booking }))
}
