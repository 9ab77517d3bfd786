//! Repository layer for database operations
//!
//! Services talk to storage through the [`ScheduleStore`] and [`BookingStore`]
//! traits; [`Repository`] implements both on top of PostgreSQL.

pub mod bookings;
pub mod schedules;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        booking::BookedInterval,
        schedule::{BlockedSlot, Holiday, NewBlockedSlot, WeeklyHours, WeeklyHoursEntry},
        shop::Shop,
    },
};

/// Shop schedule storage: weekly hours, blocked slots and holidays
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    async fn get_shop(&self, shop_id: Uuid) -> AppResult<Option<Shop>>;

    async fn get_weekly_hours(&self, shop_id: Uuid, day_of_week: i16) -> AppResult<Option<WeeklyHours>>;

    async fn list_weekly_hours(&self, shop_id: Uuid) -> AppResult<Vec<WeeklyHours>>;

    /// Delete every row of the shop and insert `hours`, atomically
    async fn replace_weekly_hours(
        &self,
        shop_id: Uuid,
        hours: Vec<WeeklyHoursEntry>,
    ) -> AppResult<Vec<WeeklyHours>>;

    async fn get_holiday(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Option<Holiday>>;

    async fn list_holidays(&self, shop_id: Uuid, from: NaiveDate) -> AppResult<Vec<Holiday>>;

    /// Fails with `AppError::Conflict` when the date is already a holiday
    async fn insert_holiday(
        &self,
        shop_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<Holiday>;

    /// Returns whether a row was removed
    async fn delete_holiday(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<bool>;

    async fn list_blocked_slots(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Vec<BlockedSlot>>;

    async fn list_upcoming_blocked_slots(&self, shop_id: Uuid, from: NaiveDate) -> AppResult<Vec<BlockedSlot>>;

    async fn find_blocked_slot(
        &self,
        shop_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> AppResult<Option<BlockedSlot>>;

    /// Fails with `AppError::Conflict` when the slot is already blocked
    async fn insert_blocked_slot(&self, slot: NewBlockedSlot) -> AppResult<BlockedSlot>;

    /// Returns the number of rows removed
    async fn delete_blocked_slot(&self, shop_id: Uuid, date: NaiveDate, start_time: NaiveTime) -> AppResult<u64>;
}

/// Read-only view of the marketplace's bookings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Pending and confirmed bookings of the shop on `date`
    async fn list_active_bookings(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Vec<BookedInterval>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
