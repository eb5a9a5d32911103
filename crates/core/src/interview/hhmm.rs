//! Serde adapter rendering wall-clock times as `HH:MM`.
//!
//! Use with `#[serde(with = "scholarship_core::interview::hhmm")]`.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

use super::time_range::{parse_time, TIME_FORMAT};

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format(TIME_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time("time", &raw).map_err(serde::de::Error::custom)
}

/// Same format for `Option<NaiveTime>`, serializing `None` as `null`.
pub mod option {
    use chrono::NaiveTime;
    use serde::Serializer;

    use super::TIME_FORMAT;

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.collect_str(&t.format(TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}
