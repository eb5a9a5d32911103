//! Day-by-day availability calendar for a scholarship's slots.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use super::slot::{format_location, Occupancy, SlotType};
use super::time_range::TIME_FORMAT;
use crate::error::CoreError;
use crate::types::DbId;

/// Days covered when the caller gives no end date.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// One slot as loaded for the calendar.
#[derive(Debug, Clone)]
pub struct CalendarSlot {
    pub id: DbId,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub occupancy: Occupancy,
    pub slot_type: SlotType,
    pub duration_minutes: i32,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    pub interviewer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotSummary {
    pub slot_id: DbId,
    #[serde(with = "super::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "super::hhmm")]
    pub end_time: NaiveTime,
    pub time_range: String,
    pub is_bookable: bool,
    pub remaining_capacity: i32,
    pub slot_type: SlotType,
    pub location: String,
    pub interviewer_name: Option<String>,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub total_slots: usize,
    pub available_slots: usize,
    pub booked_slots: usize,
    pub slots: Vec<SlotSummary>,
}

/// Resolve an optional date range, defaulting to `[today, today + 30 days]`.
pub fn resolve_range(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let from = date_from.unwrap_or(today);
    let to = date_to.unwrap_or(from + Duration::days(DEFAULT_WINDOW_DAYS));
    if to < from {
        return Err(CoreError::Validation(format!(
            "date_to ({to}) must not be before date_from ({from})"
        )));
    }
    Ok((from, to))
}

/// Group slots by date, ascending, with slots inside a day ordered by start time.
///
/// `available_slots` counts bookable slots; `booked_slots` counts slots at
/// full capacity.
pub fn build_calendar<I>(slots: I) -> Vec<AvailabilityDay>
where
    I: IntoIterator<Item = CalendarSlot>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<CalendarSlot>> = BTreeMap::new();
    for slot in slots {
        by_day.entry(slot.slot_date).or_default().push(slot);
    }

    by_day
        .into_iter()
        .map(|(date, mut day_slots)| {
            day_slots.sort_by_key(|s| (s.start_time, s.id));

            let available_slots = day_slots
                .iter()
                .filter(|s| s.occupancy.is_bookable())
                .count();
            let booked_slots = day_slots.iter().filter(|s| s.occupancy.is_full()).count();

            AvailabilityDay {
                date,
                day_of_week: date.format("%A").to_string(),
                total_slots: day_slots.len(),
                available_slots,
                booked_slots,
                slots: day_slots.into_iter().map(summarize).collect(),
            }
        })
        .collect()
}

fn summarize(slot: CalendarSlot) -> SlotSummary {
    SlotSummary {
        slot_id: slot.id,
        start_time: slot.start_time,
        end_time: slot.end_time,
        time_range: format!(
            "{} - {}",
            slot.start_time.format(TIME_FORMAT),
            slot.end_time.format(TIME_FORMAT)
        ),
        is_bookable: slot.occupancy.is_bookable(),
        remaining_capacity: slot.occupancy.remaining(),
        slot_type: slot.slot_type,
        location: format_location(
            slot.building.as_deref(),
            slot.floor.as_deref(),
            slot.room.as_deref(),
            slot.location.as_deref(),
        ),
        interviewer_name: slot.interviewer_name,
        duration_minutes: slot.duration_minutes,
    }
}
