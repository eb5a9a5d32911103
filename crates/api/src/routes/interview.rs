//! Route definitions for the `/interview` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{interview_bookings, interview_reports, interview_slots};
use crate::state::AppState;

/// Routes mounted at `/interview`.
///
/// ```text
/// POST   /slots                        -> create_slot
/// GET    /slots                        -> list_slots
/// GET    /slots/{id}                   -> get_slot
/// PUT    /slots/{id}                   -> update_slot
/// DELETE /slots/{id}                   -> delete_slot
/// GET    /availability                 -> get_availability
/// POST   /book                         -> book_slot
/// GET    /bookings                     -> list_bookings
/// GET    /bookings/{id}                -> get_booking
/// PUT    /bookings/{id}                -> update_booking
/// DELETE /bookings/{id}                -> cancel_booking
/// POST   /bookings/{id}/reschedule     -> reschedule_booking
/// POST   /bookings/{id}/confirm        -> confirm_booking
/// POST   /bookings/{id}/checkin        -> check_in
/// POST   /bookings/{id}/checkout       -> check_out
/// GET    /statistics                   -> get_statistics
/// GET    /eligible-application         -> get_eligible_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/slots",
            post(interview_slots::create_slot).get(interview_slots::list_slots),
        )
        .route(
            "/slots/{id}",
            get(interview_slots::get_slot)
                .put(interview_slots::update_slot)
                .delete(interview_slots::delete_slot),
        )
        .route("/availability", get(interview_reports::get_availability))
        .route("/book", post(interview_bookings::book_slot))
        .route("/bookings", get(interview_bookings::list_bookings))
        .route(
            "/bookings/{id}",
            get(interview_bookings::get_booking)
                .put(interview_bookings::update_booking)
                .delete(interview_bookings::cancel_booking),
        )
        .route(
            "/bookings/{id}/reschedule",
            post(interview_bookings::reschedule_booking),
        )
        .route("/bookings/{id}/confirm", post(interview_bookings::confirm_booking))
        .route("/bookings/{id}/checkin", post(interview_bookings::check_in))
        .route("/bookings/{id}/checkout", post(interview_bookings::check_out))
        .route("/statistics", get(interview_reports::get_statistics))
        .route(
            "/eligible-application",
            get(interview_reports::get_eligible_application),
        )
}
