//! Aggregate counts over slots and their bookings.

use sqlx::PgPool;
use scholarship_core::interview::statistics::{InterviewStatistics, StatisticsCounts};
use scholarship_core::interview::BookingStatus;

use crate::models::interview_statistics::{StatisticsQuery, StatisticsRow};

pub struct InterviewStatisticsRepo;

impl InterviewStatisticsRepo {
    /// Compute statistics over slots (and bookings on those slots) whose
    /// date falls in the optional range.
    ///
    /// `available_slots` counts slots that are currently bookable.
    pub async fn compute(
        pool: &PgPool,
        filters: &StatisticsQuery,
    ) -> Result<InterviewStatistics, sqlx::Error> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            "WITH scoped_slots AS ( \
                 SELECT id, is_available, current_bookings, max_capacity \
                 FROM interview_slots \
                 WHERE ($1::bigint IS NULL OR scholarship_id = $1) \
                   AND ($2::date IS NULL OR slot_date >= $2) \
                   AND ($3::date IS NULL OR slot_date <= $3) \
             ), scoped_bookings AS ( \
                 SELECT b.status_id, b.check_in_time, b.actual_duration_minutes \
                 FROM interview_bookings b \
                 JOIN scoped_slots s ON s.id = b.slot_id \
             ) \
             SELECT \
                 (SELECT COUNT(*) FROM scoped_slots) AS total_slots, \
                 (SELECT COUNT(*) FROM scoped_slots \
                  WHERE is_available AND current_bookings < max_capacity) AS available_slots, \
                 COUNT(*) AS total_bookings, \
                 COUNT(*) FILTER (WHERE status_id = $4) AS booked_bookings, \
                 COUNT(*) FILTER (WHERE status_id = $5) AS confirmed_bookings, \
                 COUNT(*) FILTER (WHERE status_id = $6) AS cancelled_bookings, \
                 COUNT(*) FILTER (WHERE status_id = $7) AS completed_bookings, \
                 COUNT(*) FILTER (WHERE check_in_time IS NOT NULL) AS checked_in, \
                 AVG(actual_duration_minutes)::float8 AS average_duration_minutes \
             FROM scoped_bookings",
        )
        .bind(filters.scholarship_id)
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(BookingStatus::Booked.id())
        .bind(BookingStatus::Confirmed.id())
        .bind(BookingStatus::Cancelled.id())
        .bind(BookingStatus::Completed.id())
        .fetch_one(pool)
        .await?;

        Ok(StatisticsCounts::from(row).into())
    }
}
