pub mod health;
pub mod interview;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /interview/slots                      create, list
/// /interview/slots/{id}                 get, update, delete
/// /interview/availability               calendar per scholarship
/// /interview/book                       book a slot
/// /interview/bookings                   list
/// /interview/bookings/{id}              get, update, cancel
/// /interview/bookings/{id}/reschedule   move to another slot
/// /interview/bookings/{id}/confirm      confirm
/// /interview/bookings/{id}/checkin      record arrival
/// /interview/bookings/{id}/checkout     record completion
/// /interview/statistics                 aggregate counts
/// /interview/eligible-application       officer lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/interview", interview::router())
}
