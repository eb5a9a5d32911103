//! Interviewer double-booking detection.
//!
//! Two windows on the same day overlap iff `s1 < e2 && s2 < e1`
//! (half-open intervals), so back-to-back slots do not conflict.

use chrono::NaiveTime;

use super::error::InterviewError;
use super::time_range::SlotWindow;
use crate::types::DbId;

/// Half-open interval overlap test.
pub fn intervals_overlap(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

/// Whether two windows share a date and overlap in time.
pub fn windows_overlap(a: &SlotWindow, b: &SlotWindow) -> bool {
    a.date == b.date && intervals_overlap(a.start, a.end, b.start, b.end)
}

/// Return the id of the first existing slot that overlaps `candidate`.
pub fn find_conflict<I>(candidate: &SlotWindow, existing: I) -> Option<DbId>
where
    I: IntoIterator<Item = (DbId, SlotWindow)>,
{
    existing
        .into_iter()
        .find(|(_, window)| windows_overlap(candidate, window))
        .map(|(id, _)| id)
}

/// Fail with `SlotConflict` if any of the interviewer's slots overlap `candidate`.
pub fn ensure_no_conflict<I>(
    interviewer_id: DbId,
    candidate: &SlotWindow,
    existing: I,
) -> Result<(), InterviewError>
where
    I: IntoIterator<Item = (DbId, SlotWindow)>,
{
    match find_conflict(candidate, existing) {
        Some(existing_slot_id) => Err(InterviewError::SlotConflict {
            interviewer_id,
            existing_slot_id,
            date: candidate.date,
            start: candidate.start,
            end: candidate.end,
        }),
        None => Ok(()),
    }
}
