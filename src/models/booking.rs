//! Booking records as seen by the availability engine

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Statuses whose bookings take up time on the shop's grid
    pub const OCCUPYING: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn occupies_slot(&self) -> bool {
        Self::OCCUPYING.contains(self)
    }
}

/// Start time and service length of an active booking
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookedInterval {
    pub time: NaiveTime,
    /// Duration of the linked service; `None` when the service has none recorded
    pub duration_minutes: Option<i32>,
}
