//! Wall-clock helpers shared by schedule models and the availability engine
//!
//! Times are handled at minute precision: seconds are accepted on input but
//! dropped, and every time leaves the API as `HH:MM`.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{AppError, AppResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}

/// Parse `HH:MM` or `HH:MM:SS`, truncating to the minute
pub fn parse_time(value: &str, field: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}

pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    from_minute_of_day(minute_of_day(time)).unwrap_or(time)
}

/// Minutes elapsed since midnight, seconds ignored
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minute_of_day`]; `None` at or past midnight
pub fn from_minute_of_day(minutes: u32) -> Option<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn format_time(time: NaiveTime) -> String {
    format_minutes(minute_of_day(time))
}

/// Serde adapter writing `NaiveTime` as `HH:MM`
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw, "time").map_err(D::Error::custom)
    }
}
