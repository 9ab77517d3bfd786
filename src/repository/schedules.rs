//! Schedules storage on PostgreSQL (weekly hours, blocked slots, holidays)

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::{Repository, ScheduleStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        schedule::{BlockedSlot, Holiday, NewBlockedSlot, WeeklyHours, WeeklyHoursEntry},
        shop::Shop,
    },
};

#[async_trait]
impl ScheduleStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_shop(&self, shop_id: Uuid) -> AppResult<Option<Shop>> {
        let row = sqlx::query_as::<_, Shop>("SELECT id, name, owner_email FROM shops WHERE id = $1")
            .bind(shop_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    // ---- Weekly hours ----

    async fn get_weekly_hours(&self, shop_id: Uuid, day_of_week: i16) -> AppResult<Option<WeeklyHours>> {
        let row = sqlx::query_as::<_, WeeklyHours>(
            r#"
            SELECT shop_id, day_of_week, open_time, close_time, is_closed
            FROM weekly_hours
            WHERE shop_id = $1 AND day_of_week = $2
            "#,
        )
        .bind(shop_id)
        .bind(day_of_week)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_weekly_hours(&self, shop_id: Uuid) -> AppResult<Vec<WeeklyHours>> {
        let rows = sqlx::query_as::<_, WeeklyHours>(
            r#"
            SELECT shop_id, day_of_week, open_time, close_time, is_closed
            FROM weekly_hours
            WHERE shop_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn replace_weekly_hours(
        &self,
        shop_id: Uuid,
        hours: Vec<WeeklyHoursEntry>,
    ) -> AppResult<Vec<WeeklyHours>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM weekly_hours WHERE shop_id = $1")
            .bind(shop_id)
            .execute(&mut *tx)
            .await?;

        let mut rows = Vec::with_capacity(hours.len());
        for entry in &hours {
            let row = sqlx::query_as::<_, WeeklyHours>(
                r#"
                INSERT INTO weekly_hours (shop_id, day_of_week, open_time, close_time, is_closed)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING shop_id, day_of_week, open_time, close_time, is_closed
                "#,
            )
            .bind(shop_id)
            .bind(entry.day_of_week)
            .bind(entry.open_time)
            .bind(entry.close_time)
            .bind(entry.is_closed)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "Duplicate dayOfWeek in hours"))?;
            rows.push(row);
        }

        tx.commit().await?;
        rows.sort_by_key(|r| r.day_of_week);
        Ok(rows)
    }

    // ---- Holidays ----

    async fn get_holiday(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Option<Holiday>> {
        let row = sqlx::query_as::<_, Holiday>(
            "SELECT * FROM holidays WHERE shop_id = $1 AND date = $2",
        )
        .bind(shop_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_holidays(&self, shop_id: Uuid, from: NaiveDate) -> AppResult<Vec<Holiday>> {
        let rows = sqlx::query_as::<_, Holiday>(
            "SELECT * FROM holidays WHERE shop_id = $1 AND date >= $2 ORDER BY date",
        )
        .bind(shop_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_holiday(
        &self,
        shop_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<Holiday> {
        sqlx::query_as::<_, Holiday>(
            r#"
            INSERT INTO holidays (id, shop_id, date, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shop_id)
        .bind(date)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "This date is already a holiday"))
    }

    async fn delete_holiday(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM holidays WHERE shop_id = $1 AND date = $2")
            .bind(shop_id)
            .bind(date)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---- Blocked slots ----

    async fn list_blocked_slots(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Vec<BlockedSlot>> {
        let rows = sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_slots WHERE shop_id = $1 AND date = $2 ORDER BY start_time",
        )
        .bind(shop_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_upcoming_blocked_slots(&self, shop_id: Uuid, from: NaiveDate) -> AppResult<Vec<BlockedSlot>> {
        let rows = sqlx::query_as::<_, BlockedSlot>(
            r#"
            SELECT * FROM blocked_slots
            WHERE shop_id = $1 AND date >= $2
            ORDER BY date, start_time
            "#,
        )
        .bind(shop_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_blocked_slot(
        &self,
        shop_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> AppResult<Option<BlockedSlot>> {
        let row = sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_slots WHERE shop_id = $1 AND date = $2 AND start_time = $3",
        )
        .bind(shop_id)
        .bind(date)
        .bind(start_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_blocked_slot(&self, slot: NewBlockedSlot) -> AppResult<BlockedSlot> {
        sqlx::query_as::<_, BlockedSlot>(
            r#"
            INSERT INTO blocked_slots (id, shop_id, date, start_time, end_time, reason)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slot.shop_id)
        .bind(slot.date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Slot is already blocked"))
    }

    async fn delete_blocked_slot(&self, shop_id: Uuid, date: NaiveDate, start_time: NaiveTime) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM blocked_slots WHERE shop_id = $1 AND date = $2 AND start_time = $3",
        )
        .bind(shop_id)
        .bind(date)
        .bind(start_time)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
