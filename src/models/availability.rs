//! Availability engine output and its wire shape

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::clock;

/// One 30-minute slot of the grid, addressed by its start time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Slot {
    /// Start time (HH:MM)
    pub time: String,
    pub available: bool,
    /// Covered by an owner block
    pub blocked: bool,
    /// Covered by an active booking
    pub booked: bool,
}

impl Slot {
    pub fn new(minute_of_day: u32, blocked: bool, booked: bool) -> Self {
        Self {
            time: clock::format_minutes(minute_of_day),
            available: !blocked && !booked,
            blocked,
            booked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnavailableReason {
    Holiday,
    Closed,
}

/// Result of an availability computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Unavailable {
        reason: UnavailableReason,
        message: String,
    },
    Open {
        date: NaiveDate,
        open_time: String,
        close_time: String,
        slots: Vec<Slot>,
    },
}

impl Availability {
    pub fn is_open(&self) -> bool {
        matches!(self, Availability::Open { .. })
    }

    pub fn slots(&self) -> &[Slot] {
        match self {
            Availability::Open { slots, .. } => slots,
            Availability::Unavailable { .. } => &[],
        }
    }

    pub fn slot(&self, time: &str) -> Option<&Slot> {
        self.slots().iter().find(|s| s.time == time)
    }
}

/// Availability response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
    pub slots: Vec<Slot>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Unavailable { reason, message } => Self {
                available: false,
                reason: Some(reason),
                message: Some(message),
                date: None,
                open_time: None,
                close_time: None,
                slots: Vec::new(),
            },
            Availability::Open {
                date,
                open_time,
                close_time,
                slots,
            } => Self {
                available: true,
                reason: None,
                message: None,
                date: Some(date),
                open_time: Some(open_time),
                close_time: Some(close_time),
                slots,
            },
        }
    }
}

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Target date (YYYY-MM-DD)
    pub date: Option<String>,
}
