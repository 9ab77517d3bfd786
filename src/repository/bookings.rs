//! Booking reads on PostgreSQL

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{BookingStore, Repository};
use crate::{
    error::AppResult,
    models::booking::{BookedInterval, BookingStatus},
};

#[async_trait]
impl BookingStore for Repository {
    async fn list_active_bookings(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Vec<BookedInterval>> {
        let statuses: Vec<&str> = BookingStatus::OCCUPYING.iter().map(|s| s.as_str()).collect();

        let rows = sqlx::query_as::<_, BookedInterval>(
            r#"
            SELECT b.time, s.duration_minutes
            FROM bookings b
            LEFT JOIN services s ON s.id = b.service_id
            WHERE b.shop_id = $1 AND b.date = $2 AND b.status = ANY($3)
            ORDER BY b.time
            "#,
        )
        .bind(shop_id)
        .bind(date)
        .bind(statuses)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
