//! Repository for the `interview_bookings` table.
//!
//! Every transition locks the booking row first and then any slot rows it
//! touches, slots in ascending id order. Occupancy counters only change
//! inside the transaction that holds those locks.

use chrono::Utc;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use scholarship_core::error::CoreError;
use scholarship_core::interview::booking_state::{self, BookingStatus};
use scholarship_core::interview::InterviewError;
use scholarship_core::pagination::PageRequest;
use scholarship_core::types::DbId;

use crate::error::is_unique_violation;
use crate::models::interview_booking::{
    BookingListQuery, InterviewBooking, InterviewBookingDetail, UpdateInterviewBooking,
};
use crate::repositories::interview_slot_repo::{self, InterviewSlotRepo};
use crate::repositories::ApplicationRepo;
use crate::StoreError;

/// Column list for `interview_bookings` queries.
const COLUMNS: &str = "\
    id, slot_id, application_id, student_id, status_id, booked_at, \
    confirmed_at, cancelled_at, cancellation_reason, check_in_time, \
    check_out_time, rescheduled_from_slot_id, rescheduled_to_slot_id, \
    student_notes, officer_notes, reminder_sent_at, actual_duration_minutes, \
    created_at, updated_at";

/// Partial unique index allowing one active booking per application.
const ACTIVE_APPLICATION_INDEX: &str = "uq_interview_bookings_active_application";

/// Booking columns plus the joined presentation fields.
///
/// A booking's `student_id` is either a student profile id or, for
/// accounts without a profile, the account id itself; the user join
/// covers both.
const DETAIL_SELECT: &str = "\
    SELECT b.id, b.slot_id, b.application_id, b.student_id, b.status_id, b.booked_at, \
           b.confirmed_at, b.cancelled_at, b.cancellation_reason, b.check_in_time, \
           b.check_out_time, b.rescheduled_from_slot_id, b.rescheduled_to_slot_id, \
           b.student_notes, b.officer_notes, b.reminder_sent_at, b.actual_duration_minutes, \
           b.created_at, b.updated_at, \
           s.slot_date, s.start_time, s.end_time, s.building, s.floor, s.room, s.location, \
           a.scholarship_id, sc.name AS scholarship_name, \
           s.interviewer_id, iu.full_name AS interviewer_name, \
           su.full_name AS student_name, su.email AS student_email, \
           bs.name AS status_name \
    FROM interview_bookings b \
    JOIN scholarship_applications a ON a.id = b.application_id \
    JOIN scholarships sc ON sc.id = a.scholarship_id \
    JOIN booking_statuses bs ON bs.id = b.status_id \
    LEFT JOIN interview_slots s ON s.id = b.slot_id \
    LEFT JOIN users iu ON iu.id = s.interviewer_id \
    LEFT JOIN students st ON st.id = b.student_id \
    LEFT JOIN users su ON su.id = COALESCE(st.user_id, b.student_id)";

fn not_found(id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: "InterviewBooking",
        id,
    })
}

/// Provides the booking lifecycle operations.
pub struct InterviewBookingRepo;

impl InterviewBookingRepo {
    /// Book a slot for the caller's eligible application.
    ///
    /// Runs as one transaction: lock the slot, check it is bookable,
    /// resolve the student and application, reject a second active
    /// booking, insert, then take the seat.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        slot_id: DbId,
        student_notes: Option<&str>,
    ) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let slot = InterviewSlotRepo::lock_for_update(&mut tx, slot_id)
            .await?
            .ok_or_else(|| interview_slot_repo::not_found(slot_id))?;
        slot.occupancy().ensure_bookable(slot.id)?;

        let student_id = ApplicationRepo::resolve_student_id(&mut *tx, user_id).await?;
        let application =
            ApplicationRepo::find_eligible(&mut *tx, student_id, slot.scholarship_id)
                .await?
                .ok_or(InterviewError::NoEligibleApplication {
                    scholarship_id: slot.scholarship_id,
                })?;

        if Self::has_active_booking(&mut tx, application.id).await? {
            return Err(InterviewError::DuplicateBooking {
                application_id: application.id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO interview_bookings \
                (slot_id, application_id, student_id, status_id, student_notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(slot.id)
            .bind(application.id)
            .bind(student_id)
            .bind(BookingStatus::Booked.id())
            .bind(student_notes)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                // A concurrent booking for the same application won the race.
                if is_unique_violation(&e, ACTIVE_APPLICATION_INDEX) {
                    tracing::debug!(
                        application_id = application.id,
                        slot_id = slot.id,
                        "Lost booking race to a concurrent request"
                    );
                    StoreError::from(InterviewError::DuplicateBooking {
                        application_id: application.id,
                    })
                } else {
                    StoreError::from(e)
                }
            })?;

        InterviewSlotRepo::adjust_bookings(&mut tx, slot.id, 1).await?;

        tx.commit().await?;
        Ok(booking)
    }

    async fn has_active_booking(
        conn: &mut PgConnection,
        application_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let active: Vec<i16> = BookingStatus::ALL
            .into_iter()
            .filter(|s| s.is_active())
            .map(BookingStatus::id)
            .collect();
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM interview_bookings \
             WHERE application_id = $1 AND status_id = ANY($2))",
        )
        .bind(application_id)
        .bind(active)
        .fetch_one(conn)
        .await
    }

    /// Find a booking by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InterviewBooking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interview_bookings WHERE id = $1");
        sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking with its slot, scholarship and people joined in.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InterviewBookingDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, InterviewBookingDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List booking details matching the filters, newest first.
    pub async fn list(
        pool: &PgPool,
        filters: &BookingListQuery,
        page: PageRequest,
    ) -> Result<(Vec<InterviewBookingDetail>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM interview_bookings b \
             JOIN scholarship_applications a ON a.id = b.application_id \
             LEFT JOIN interview_slots s ON s.id = b.slot_id",
        );
        push_filters(&mut count, filters);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        push_filters(&mut select, filters);
        select
            .push(" ORDER BY b.booked_at DESC, b.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select
            .build_query_as::<InterviewBookingDetail>()
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<InterviewBooking, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM interview_bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Officer edit of notes, reminder timestamp and seat-holding status.
    ///
    /// Never touches the slot counter; moving into or out of `cancelled`
    /// is rejected.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInterviewBooking,
    ) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock(&mut tx, id).await?;
        if let Some(to) = input.status {
            booking_state::validate_manual_change(current.status, to)?;
        }

        let query = format!(
            "UPDATE interview_bookings SET \
                status_id = COALESCE($2::smallint, status_id), \
                confirmed_at = CASE \
                    WHEN $2::smallint = $3::smallint AND confirmed_at IS NULL THEN NOW() \
                    ELSE confirmed_at END, \
                student_notes = COALESCE($4, student_notes), \
                officer_notes = COALESCE($5, officer_notes), \
                reminder_sent_at = COALESCE($6, reminder_sent_at) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .bind(input.status.map(BookingStatus::id))
            .bind(BookingStatus::Confirmed.id())
            .bind(&input.student_notes)
            .bind(&input.officer_notes)
            .bind(input.reminder_sent_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// `booked -> confirmed`.
    pub async fn confirm(pool: &PgPool, id: DbId) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock(&mut tx, id).await?;
        let next = booking_state::confirm(current.status)?;

        let query = format!(
            "UPDATE interview_bookings SET status_id = $2, confirmed_at = $3 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .bind(next.id())
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Cancel a booking and release its seat in the same transaction.
    pub async fn cancel(
        pool: &PgPool,
        id: DbId,
        reason: Option<&str>,
    ) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock(&mut tx, id).await?;
        let next = booking_state::cancel(current.status)?;

        let query = format!(
            "UPDATE interview_bookings SET \
                status_id = $2, cancelled_at = $3, cancellation_reason = $4 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .bind(next.id())
            .bind(Utc::now())
            .bind(reason)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(slot_id) = current.slot_id {
            InterviewSlotRepo::lock_for_update(&mut tx, slot_id).await?;
            InterviewSlotRepo::adjust_bookings(&mut tx, slot_id, -1).await?;
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// Record the student's arrival.
    pub async fn check_in(pool: &PgPool, id: DbId) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock(&mut tx, id).await?;
        booking_state::check_in(current.status, current.check_in_time)?;

        let query = format!(
            "UPDATE interview_bookings SET check_in_time = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Record the end of the interview and complete the booking.
    pub async fn check_out(pool: &PgPool, id: DbId) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock(&mut tx, id).await?;
        let now = Utc::now();
        let outcome = booking_state::check_out(
            current.status,
            current.check_in_time,
            current.check_out_time,
            now,
        )?;

        let query = format!(
            "UPDATE interview_bookings SET \
                status_id = $2, check_out_time = $3, actual_duration_minutes = $4 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .bind(outcome.status.id())
            .bind(now)
            .bind(outcome.actual_duration_minutes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Move an active booking to another slot of the same scholarship.
    ///
    /// The booking update, the old slot's decrement and the new slot's
    /// increment commit together or not at all.
    pub async fn reschedule(
        pool: &PgPool,
        id: DbId,
        new_slot_id: DbId,
    ) -> Result<InterviewBooking, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock(&mut tx, id).await?;
        let next = booking_state::reschedule(current.status, current.check_in_time)?;
        let old_slot_id = current.slot_id.ok_or_else(|| {
            CoreError::Internal(format!("Active booking {id} has no slot"))
        })?;
        if old_slot_id == new_slot_id {
            return Err(CoreError::Validation(format!(
                "Booking {id} is already in slot {new_slot_id}"
            ))
            .into());
        }

        let slots =
            InterviewSlotRepo::lock_many_for_update(&mut tx, &[old_slot_id, new_slot_id]).await?;
        let new_slot = slots
            .iter()
            .find(|s| s.id == new_slot_id)
            .ok_or_else(|| interview_slot_repo::not_found(new_slot_id))?;
        new_slot.occupancy().ensure_bookable(new_slot_id)?;
        if let Some(old_slot) = slots.iter().find(|s| s.id == old_slot_id) {
            if old_slot.scholarship_id != new_slot.scholarship_id {
                return Err(CoreError::Validation(format!(
                    "Slot {new_slot_id} belongs to a different scholarship"
                ))
                .into());
            }
        }

        let query = format!(
            "UPDATE interview_bookings SET \
                slot_id = $2, rescheduled_from_slot_id = $3, rescheduled_to_slot_id = $2, \
                status_id = $4, confirmed_at = NULL \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, InterviewBooking>(&query)
            .bind(id)
            .bind(new_slot_id)
            .bind(old_slot_id)
            .bind(next.id())
            .fetch_one(&mut *tx)
            .await?;

        InterviewSlotRepo::adjust_bookings(&mut tx, old_slot_id, -1).await?;
        InterviewSlotRepo::adjust_bookings(&mut tx, new_slot_id, 1).await?;

        tx.commit().await?;
        Ok(booking)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &BookingListQuery) {
    qb.push(" WHERE 1 = 1");
    if let Some(scholarship_id) = filters.scholarship_id {
        qb.push(" AND a.scholarship_id = ").push_bind(scholarship_id);
    }
    if let Some(slot_id) = filters.slot_id {
        qb.push(" AND b.slot_id = ").push_bind(slot_id);
    }
    if let Some(status) = filters.status {
        qb.push(" AND b.status_id = ").push_bind(status.id());
    }
    if let Some(date_from) = filters.date_from {
        qb.push(" AND s.slot_date >= ").push_bind(date_from);
    }
    if let Some(date_to) = filters.date_to {
        qb.push(" AND s.slot_date <= ").push_bind(date_to);
    }
    if let Some(student_id) = filters.student_id {
        qb.push(" AND b.student_id = ").push_bind(student_id);
    }
}
