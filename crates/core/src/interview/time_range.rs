//! Date/time parsing and validation for slot windows.

use chrono::{NaiveDate, NaiveTime};

use super::error::TimeRangeError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for wall-clock times (24-hour, minute precision).
pub const TIME_FORMAT: &str = "%H:%M";

/// A validated `[start, end)` window on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Zero-padded digit layout of the wire formats; `0` stands for any digit.
const DATE_SHAPE: &str = "0000-00-00";
const TIME_SHAPE: &str = "00:00";

fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'0' => v.is_ascii_digit(),
            _ => v == s,
        })
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, TimeRangeError> {
    has_shape(value, DATE_SHAPE)
        .then(|| NaiveDate::parse_from_str(value, DATE_FORMAT).ok())
        .flatten()
        .ok_or_else(|| TimeRangeError::InvalidFormat {
            field,
            value: value.to_string(),
            expected: "YYYY-MM-DD",
        })
}

/// Parse an `HH:MM` time.
pub fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, TimeRangeError> {
    has_shape(value, TIME_SHAPE)
        .then(|| NaiveTime::parse_from_str(value, TIME_FORMAT).ok())
        .flatten()
        .ok_or_else(|| TimeRangeError::InvalidFormat {
            field,
            value: value.to_string(),
            expected: "HH:MM",
        })
}

/// Validate a slot window given as strings.
///
/// Checks run in order: format, then `start < end`, then that `date` is not
/// before `today`. Time of day is ignored for the past-date check, so a slot
/// later today is accepted.
pub fn validate_window(
    date: &str,
    start: &str,
    end: &str,
    today: NaiveDate,
) -> Result<SlotWindow, TimeRangeError> {
    let date = parse_date("slot_date", date)?;
    let start = parse_time("start_time", start)?;
    let end = parse_time("end_time", end)?;

    if end <= start {
        return Err(TimeRangeError::InvalidOrder { start, end });
    }
    if date < today {
        return Err(TimeRangeError::PastDate { date });
    }

    Ok(SlotWindow { date, start, end })
}
