//! Repository for the `interview_slots` table.

use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use scholarship_core::error::CoreError;
use scholarship_core::interview::conflict;
use scholarship_core::interview::slot;
use scholarship_core::interview::SlotWindow;
use scholarship_core::pagination::PageRequest;
use scholarship_core::types::DbId;

use crate::models::interview_slot::{
    InterviewSlot, NewInterviewSlot, SlotListQuery, UpdateInterviewSlot,
};
use crate::StoreError;

/// Column list for `interview_slots` queries.
pub(crate) const COLUMNS: &str = "\
    id, scholarship_id, interviewer_id, slot_date, start_time, end_time, \
    building, floor, room, location, max_capacity, current_bookings, \
    is_available, slot_type, duration_minutes, preparation_minutes, notes, \
    created_by, created_at, updated_at";

pub(crate) fn not_found(id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound {
        entity: "InterviewSlot",
        id,
    })
}

/// Provides CRUD operations for interview slots.
pub struct InterviewSlotRepo;

impl InterviewSlotRepo {
    /// Insert a validated slot after checking the interviewer's calendar.
    ///
    /// A transaction-scoped advisory lock keyed on the interviewer id
    /// serializes concurrent creations for the same interviewer, so the
    /// overlap check and the insert see a consistent set of siblings.
    pub async fn create(
        pool: &PgPool,
        input: &NewInterviewSlot,
        created_by: DbId,
    ) -> Result<InterviewSlot, StoreError> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(input.interviewer_id)
            .execute(&mut *tx)
            .await?;

        let siblings: Vec<(DbId, NaiveDate, NaiveTime, NaiveTime)> = sqlx::query_as(
            "SELECT id, slot_date, start_time, end_time FROM interview_slots \
             WHERE interviewer_id = $1 AND slot_date = $2",
        )
        .bind(input.interviewer_id)
        .bind(input.window.date)
        .fetch_all(&mut *tx)
        .await?;

        conflict::ensure_no_conflict(
            input.interviewer_id,
            &input.window,
            siblings
                .into_iter()
                .map(|(id, date, start, end)| (id, SlotWindow { date, start, end })),
        )?;

        let query = format!(
            "INSERT INTO interview_slots \
                (scholarship_id, interviewer_id, slot_date, start_time, end_time, \
                 building, floor, room, location, max_capacity, slot_type, \
                 duration_minutes, preparation_minutes, notes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, InterviewSlot>(&query)
            .bind(input.scholarship_id)
            .bind(input.interviewer_id)
            .bind(input.window.date)
            .bind(input.window.start)
            .bind(input.window.end)
            .bind(&input.building)
            .bind(&input.floor)
            .bind(&input.room)
            .bind(&input.location)
            .bind(input.max_capacity)
            .bind(input.slot_type.as_str())
            .bind(input.duration_minutes)
            .bind(input.preparation_minutes)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(slot)
    }

    /// Find a slot by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<InterviewSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interview_slots WHERE id = $1");
        sqlx::query_as::<_, InterviewSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a slot and hold its row lock until the surrounding transaction ends.
    pub(crate) async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<InterviewSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interview_slots WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, InterviewSlot>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lock several slots in ascending id order.
    pub(crate) async fn lock_many_for_update(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<InterviewSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM interview_slots WHERE id = ANY($1) ORDER BY id FOR UPDATE"
        );
        sqlx::query_as::<_, InterviewSlot>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// Add `delta` seats to a slot's occupancy counter.
    pub(crate) async fn adjust_bookings(
        conn: &mut PgConnection,
        id: DbId,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE interview_slots SET current_bookings = current_bookings + $2 WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Apply a partial update.
    ///
    /// Only fields present in `input` change. Capacity and availability
    /// edits are checked against the locked row's current occupancy.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInterviewSlot,
    ) -> Result<InterviewSlot, StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let occupancy = current.occupancy();

        if let Some(capacity) = input.max_capacity {
            slot::validate_capacity(capacity)?;
            occupancy.check_capacity_change(capacity)?;
        }
        if let Some(is_available) = input.is_available {
            occupancy.check_availability_change(is_available)?;
        }

        let query = format!(
            "UPDATE interview_slots SET \
                building = COALESCE($2, building), \
                floor = COALESCE($3, floor), \
                room = COALESCE($4, room), \
                location = COALESCE($5, location), \
                max_capacity = COALESCE($6, max_capacity), \
                is_available = COALESCE($7, is_available), \
                notes = COALESCE($8, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, InterviewSlot>(&query)
            .bind(id)
            .bind(&input.building)
            .bind(&input.floor)
            .bind(&input.room)
            .bind(&input.location)
            .bind(input.max_capacity)
            .bind(input.is_available)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(slot)
    }

    /// Delete a slot that holds no bookings.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        let current = Self::lock_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        current.occupancy().check_deletable()?;

        sqlx::query("DELETE FROM interview_slots WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// List slots matching the filters, returning one page and the total count.
    pub async fn list(
        pool: &PgPool,
        filters: &SlotListQuery,
        page: PageRequest,
    ) -> Result<(Vec<InterviewSlot>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM interview_slots");
        push_filters(&mut count, filters);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM interview_slots"));
        push_filters(&mut select, filters);
        select
            .push(" ORDER BY slot_date, start_time, id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let slots = select
            .build_query_as::<InterviewSlot>()
            .fetch_all(pool)
            .await?;

        Ok((slots, total))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &SlotListQuery) {
    qb.push(" WHERE 1 = 1");
    if let Some(scholarship_id) = filters.scholarship_id {
        qb.push(" AND scholarship_id = ").push_bind(scholarship_id);
    }
    if let Some(interviewer_id) = filters.interviewer_id {
        qb.push(" AND interviewer_id = ").push_bind(interviewer_id);
    }
    if let Some(date_from) = filters.date_from {
        qb.push(" AND slot_date >= ").push_bind(date_from);
    }
    if let Some(date_to) = filters.date_to {
        qb.push(" AND slot_date <= ").push_bind(date_to);
    }
    if let Some(is_available) = filters.is_available {
        qb.push(" AND is_available = ").push_bind(is_available);
    }
    if let Some(slot_type) = filters.slot_type {
        qb.push(" AND slot_type = ").push_bind(slot_type.as_str());
    }
}
