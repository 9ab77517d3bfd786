//! In-memory store for service and router tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use super::{BookingStore, ScheduleStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookedInterval, BookingStatus},
        schedule::{BlockedSlot, Holiday, NewBlockedSlot, WeeklyHours, WeeklyHoursEntry},
        shop::Shop,
    },
};

#[derive(Debug, Clone)]
pub struct StoredBooking {
    pub shop_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: BookingStatus,
    pub duration_minutes: Option<i32>,
}

#[derive(Default)]
struct Tables {
    shops: Vec<Shop>,
    hours: Vec<WeeklyHours>,
    holidays: Vec<Holiday>,
    blocked: Vec<BlockedSlot>,
    bookings: Vec<StoredBooking>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shop(&self, owner_email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().shops.push(Shop {
            id,
            name: format!("Shop of {}", owner_email),
            owner_email: owner_email.to_string(),
        });
        id
    }

    pub fn add_booking(&self, booking: StoredBooking) {
        self.tables.lock().unwrap().bookings.push(booking);
    }

    pub fn blocked_count(&self, shop_id: Uuid) -> usize {
        self.tables
            .lock()
            .unwrap()
            .blocked
            .iter()
            .filter(|b| b.shop_id == shop_id)
            .count()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn get_shop(&self, shop_id: Uuid) -> AppResult<Option<Shop>> {
        let t = self.tables.lock().unwrap();
        Ok(t.shops.iter().find(|s| s.id == shop_id).cloned())
    }

    async fn get_weekly_hours(&self, shop_id: Uuid, day_of_week: i16) -> AppResult<Option<WeeklyHours>> {
        let t = self.tables.lock().unwrap();
        Ok(t.hours
            .iter()
            .find(|h| h.shop_id == shop_id && h.day_of_week == day_of_week)
            .cloned())
    }

    async fn list_weekly_hours(&self, shop_id: Uuid) -> AppResult<Vec<WeeklyHours>> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<_> = t.hours.iter().filter(|h| h.shop_id == shop_id).cloned().collect();
        rows.sort_by_key(|h| h.day_of_week);
        Ok(rows)
    }

    async fn replace_weekly_hours(
        &self,
        shop_id: Uuid,
        hours: Vec<WeeklyHoursEntry>,
    ) -> AppResult<Vec<WeeklyHours>> {
        let mut t = self.tables.lock().unwrap();
        let mut rows: Vec<WeeklyHours> = hours
            .into_iter()
            .map(|e| WeeklyHours {
                shop_id,
                day_of_week: e.day_of_week,
                open_time: e.open_time,
                close_time: e.close_time,
                is_closed: e.is_closed,
            })
            .collect();
        rows.sort_by_key(|h| h.day_of_week);
        if rows.windows(2).any(|w| w[0].day_of_week == w[1].day_of_week) {
            return Err(AppError::Conflict("Duplicate dayOfWeek in hours".to_string()));
        }
        t.hours.retain(|h| h.shop_id != shop_id);
        t.hours.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn get_holiday(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Option<Holiday>> {
        let t = self.tables.lock().unwrap();
        Ok(t.holidays
            .iter()
            .find(|h| h.shop_id == shop_id && h.date == date)
            .cloned())
    }

    async fn list_holidays(&self, shop_id: Uuid, from: NaiveDate) -> AppResult<Vec<Holiday>> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<_> = t
            .holidays
            .iter()
            .filter(|h| h.shop_id == shop_id && h.date >= from)
            .cloned()
            .collect();
        rows.sort_by_key(|h| h.date);
        Ok(rows)
    }

    async fn insert_holiday(
        &self,
        shop_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<Holiday> {
        let mut t = self.tables.lock().unwrap();
        if t.holidays.iter().any(|h| h.shop_id == shop_id && h.date == date) {
            return Err(AppError::Conflict("This date is already a holiday".to_string()));
        }
        let holiday = Holiday {
            id: Uuid::new_v4(),
            shop_id,
            date,
            reason,
            created_at: Some(Utc::now()),
        };
        t.holidays.push(holiday.clone());
        Ok(holiday)
    }

    async fn delete_holiday(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.holidays.len();
        t.holidays.retain(|h| !(h.shop_id == shop_id && h.date == date));
        Ok(t.holidays.len() < before)
    }

    async fn list_blocked_slots(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Vec<BlockedSlot>> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<_> = t
            .blocked
            .iter()
            .filter(|b| b.shop_id == shop_id && b.date == date)
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.start_time);
        Ok(rows)
    }

    async fn list_upcoming_blocked_slots(&self, shop_id: Uuid, from: NaiveDate) -> AppResult<Vec<BlockedSlot>> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<_> = t
            .blocked
            .iter()
            .filter(|b| b.shop_id == shop_id && b.date >= from)
            .cloned()
            .collect();
        rows.sort_by_key(|b| (b.date, b.start_time));
        Ok(rows)
    }

    async fn find_blocked_slot(
        &self,
        shop_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> AppResult<Option<BlockedSlot>> {
        let t = self.tables.lock().unwrap();
        Ok(t.blocked
            .iter()
            .find(|b| b.shop_id == shop_id && b.date == date && b.start_time == start_time)
            .cloned())
    }

    async fn insert_blocked_slot(&self, slot: NewBlockedSlot) -> AppResult<BlockedSlot> {
        let mut t = self.tables.lock().unwrap();
        if t.blocked.iter().any(|b| {
            b.shop_id == slot.shop_id && b.date == slot.date && b.start_time == slot.start_time
        }) {
            return Err(AppError::Conflict("Slot is already blocked".to_string()));
        }
        let row = BlockedSlot {
            id: Uuid::new_v4(),
            shop_id: slot.shop_id,
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            reason: slot.reason,
            created_at: Some(Utc::now()),
        };
        t.blocked.push(row.clone());
        Ok(row)
    }

    async fn delete_blocked_slot(&self, shop_id: Uuid, date: NaiveDate, start_time: NaiveTime) -> AppResult<u64> {
        let mut t = self.tables.lock().unwrap();
        let before = t.blocked.len();
        t.blocked
            .retain(|b| !(b.shop_id == shop_id && b.date == date && b.start_time == start_time));
        Ok((before - t.blocked.len()) as u64)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_active_bookings(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Vec<BookedInterval>> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<_> = t
            .bookings
            .iter()
            .filter(|b| b.shop_id == shop_id && b.date == date && b.status.occupies_slot())
            .map(|b| BookedInterval {
                time: b.time,
                duration_minutes: b.duration_minutes,
            })
            .collect();
        rows.sort_by_key(|b| b.time);
        Ok(rows)
    }
}
