//! Schedule models (weekly hours, blocked slots, holidays)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::clock::hhmm;

// ---------------------------------------------------------------------------
// WeeklyHours
// ---------------------------------------------------------------------------

/// Recurring opening hours of a shop for one day of the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHours {
    pub shop_id: Uuid,
    /// Day of week (0=Sunday, 6=Saturday)
    pub day_of_week: i16,
    /// Opening time (HH:MM)
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub open_time: NaiveTime,
    /// Closing time (HH:MM), exclusive
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "18:00")]
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

/// One day in a set-hours request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHoursEntry {
    /// Day of week (0=Sunday, 6=Saturday)
    #[validate(range(min = 0, max = 6, message = "dayOfWeek must be between 0 and 6"))]
    pub day_of_week: i16,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "18:00")]
    pub close_time: NaiveTime,
    #[serde(default)]
    pub is_closed: bool,
}

impl From<&WeeklyHours> for WeeklyHoursEntry {
    fn from(row: &WeeklyHours) -> Self {
        Self {
            day_of_week: row.day_of_week,
            open_time: row.open_time,
            close_time: row.close_time,
            is_closed: row.is_closed,
        }
    }
}

/// Replace-all weekly hours request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetWeeklyHours {
    pub shop_id: Option<String>,
    pub hours: Option<Vec<WeeklyHoursEntry>>,
}

/// Full weekly hours set of a shop
#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyHoursResponse {
    pub hours: Vec<WeeklyHours>,
}

// ---------------------------------------------------------------------------
// BlockedSlot
// ---------------------------------------------------------------------------

/// An owner-imposed block on one slot of one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockedSlot {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "11:00")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "11:30")]
    pub end_time: NaiveTime,
    pub reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Blocked slot about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlockedSlot {
    pub shop_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    Block,
    Unblock,
}

impl std::str::FromStr for SlotAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(SlotAction::Block),
            "unblock" => Ok(SlotAction::Unblock),
            other => Err(format!("Invalid action: {} (expected block or unblock)", other)),
        }
    }
}

/// Block or unblock request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlotRequest {
    pub shop_id: Option<String>,
    /// Date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Slot start (HH:MM)
    pub time: Option<String>,
    /// "block" or "unblock"
    pub action: Option<String>,
    #[validate(length(max = 500, message = "reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Outcome of a block or unblock request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BlockResult {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<BlockedSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Holiday
// ---------------------------------------------------------------------------

/// A full-day closure of a shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create holiday request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoliday {
    pub shop_id: Option<String>,
    /// Date (YYYY-MM-DD)
    pub date: Option<String>,
    #[validate(length(max = 500, message = "reason must be at most 500 characters"))]
    pub reason: Option<String>,
}
