//! `AppError` to HTTP response mapping, exercised without a server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{NaiveDate, NaiveTime};
use http_body_util::BodyExt;
use scholarship_api::error::AppError;
use scholarship_core::error::CoreError;
use scholarship_core::interview::{BookingStatus, InterviewError, TimeRangeError};
use scholarship_db::StoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "InterviewSlot",
        id: 42,
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "InterviewSlot with id 42 not found");
}

#[tokio::test]
async fn validation_returns_400_invalid_input() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("slot_date is required".into())))
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(json["error"], "slot_date is required");
}

#[tokio::test]
async fn time_range_error_returns_400_invalid_input() {
    let err: InterviewError = TimeRangeError::InvalidOrder {
        start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    }
    .into();
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn slot_conflict_returns_409() {
    let err = InterviewError::SlotConflict {
        interviewer_id: 3,
        existing_slot_id: 9,
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        start: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        end: NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
    };
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SLOT_CONFLICT");
}

#[tokio::test]
async fn business_rules_return_400_with_their_code() {
    let cases = [
        (InterviewError::SlotNotBookable { slot_id: 1 }, "SLOT_NOT_BOOKABLE"),
        (InterviewError::DuplicateBooking { application_id: 1 }, "DUPLICATE_BOOKING"),
        (
            InterviewError::NoEligibleApplication { scholarship_id: 1 },
            "NO_ELIGIBLE_APPLICATION",
        ),
        (
            InterviewError::CapacityBelowBookings {
                requested: 1,
                current: 2,
            },
            "CAPACITY_BELOW_BOOKINGS",
        ),
        (
            InterviewError::CannotDisableBookedSlot { current: 1 },
            "CANNOT_DISABLE_BOOKED_SLOT",
        ),
        (InterviewError::SlotHasBookings { current: 1 }, "SLOT_HAS_BOOKINGS"),
        (InterviewError::AlreadyConfirmed, "ALREADY_CONFIRMED"),
        (InterviewError::AlreadyCancelled, "ALREADY_CANCELLED"),
        (InterviewError::AlreadyCheckedIn, "ALREADY_CHECKED_IN"),
        (InterviewError::CheckInRequired, "CHECK_IN_REQUIRED"),
        (
            InterviewError::InvalidTransition {
                from: BookingStatus::Completed,
                action: "cancel",
            },
            "INVALID_TRANSITION",
        ),
    ];

    for (err, code) in cases {
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(json["code"], code);
    }
}

#[tokio::test]
async fn unauthorized_and_forbidden() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("not yours".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn storage_failure_is_sanitized_500() {
    let err: AppError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_FAILURE");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn internal_core_error_hides_details() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal("secret detail".into()))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn store_rule_error_keeps_its_code() {
    let err: AppError = StoreError::from(InterviewError::AlreadyCheckedOut).into();
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ALREADY_CHECKED_OUT");
}
