//! Statistics query parameters and the raw aggregate row.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;
use scholarship_core::interview::statistics::StatisticsCounts;
use scholarship_core::types::DbId;

/// Query parameters for `GET /interview/statistics`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    pub scholarship_id: Option<DbId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, FromRow)]
pub struct StatisticsRow {
    pub total_slots: i64,
    pub available_slots: i64,
    pub total_bookings: i64,
    pub booked_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    pub completed_bookings: i64,
    pub checked_in: i64,
    pub average_duration_minutes: Option<f64>,
}

impl From<StatisticsRow> for StatisticsCounts {
    fn from(r: StatisticsRow) -> Self {
        Self {
            total_slots: r.total_slots,
            available_slots: r.available_slots,
            total_bookings: r.total_bookings,
            booked_bookings: r.booked_bookings,
            confirmed_bookings: r.confirmed_bookings,
            cancelled_bookings: r.cancelled_bookings,
            completed_bookings: r.completed_bookings,
            checked_in: r.checked_in,
            average_duration_minutes: r.average_duration_minutes,
        }
    }
}
