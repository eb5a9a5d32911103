//! Availability calendar reads over `interview_slots`.

use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgPool};
use scholarship_core::interview::availability::{self, AvailabilityDay, CalendarSlot};
use scholarship_core::interview::slot::Occupancy;
use scholarship_core::interview::SlotType;
use scholarship_core::types::DbId;

#[derive(Debug, FromRow)]
struct CalendarSlotRow {
    id: DbId,
    slot_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    is_available: bool,
    current_bookings: i32,
    max_capacity: i32,
    #[sqlx(try_from = "String")]
    slot_type: SlotType,
    duration_minutes: i32,
    building: Option<String>,
    floor: Option<String>,
    room: Option<String>,
    location: Option<String>,
    interviewer_name: Option<String>,
}

impl From<CalendarSlotRow> for CalendarSlot {
    fn from(r: CalendarSlotRow) -> Self {
        Self {
            id: r.id,
            slot_date: r.slot_date,
            start_time: r.start_time,
            end_time: r.end_time,
            occupancy: Occupancy {
                is_available: r.is_available,
                current_bookings: r.current_bookings,
                max_capacity: r.max_capacity,
            },
            slot_type: r.slot_type,
            duration_minutes: r.duration_minutes,
            building: r.building,
            floor: r.floor,
            room: r.room,
            location: r.location,
            interviewer_name: r.interviewer_name,
        }
    }
}

pub struct InterviewAvailabilityRepo;

impl InterviewAvailabilityRepo {
    /// Every slot of a scholarship in `[date_from, date_to]`, grouped by day.
    pub async fn calendar(
        pool: &PgPool,
        scholarship_id: DbId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<AvailabilityDay>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CalendarSlotRow>(
            "SELECT s.id, s.slot_date, s.start_time, s.end_time, s.is_available, \
                    s.current_bookings, s.max_capacity, s.slot_type, s.duration_minutes, \
                    s.building, s.floor, s.room, s.location, \
                    u.full_name AS interviewer_name \
             FROM interview_slots s \
             LEFT JOIN users u ON u.id = s.interviewer_id \
             WHERE s.scholarship_id = $1 AND s.slot_date BETWEEN $2 AND $3",
        )
        .bind(scholarship_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_all(pool)
        .await?;

        Ok(availability::build_calendar(rows.into_iter().map(CalendarSlot::from)))
    }
}
