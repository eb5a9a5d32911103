//! Read-only rollups over slots and bookings.

use serde::Serialize;

/// Raw counts as aggregated by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsCounts {
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

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewStatistics {
    pub total_slots: i64,
    pub available_slots: i64,
    pub total_bookings: i64,
    pub booked_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    pub completed_bookings: i64,
    pub checked_in: i64,
    pub average_duration_minutes: Option<f64>,
    pub utilization_rate: f64,
}

impl From<StatisticsCounts> for InterviewStatistics {
    fn from(c: StatisticsCounts) -> Self {
        Self {
            utilization_rate: utilization_rate(c.total_bookings, c.total_slots),
            average_duration_minutes: c.average_duration_minutes.map(round2),
            total_slots: c.total_slots,
            available_slots: c.available_slots,
            total_bookings: c.total_bookings,
            booked_bookings: c.booked_bookings,
            confirmed_bookings: c.confirmed_bookings,
            cancelled_bookings: c.cancelled_bookings,
            completed_bookings: c.completed_bookings,
            checked_in: c.checked_in,
        }
    }
}

/// `total_bookings / total_slots * 100`, rounded to two decimals; 0 with no slots.
pub fn utilization_rate(total_bookings: i64, total_slots: i64) -> f64 {
    if total_slots <= 0 {
        return 0.0;
    }
    round2(total_bookings as f64 / total_slots as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
