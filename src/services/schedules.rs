//! Schedules service (weekly hours, blocked slots, holidays)

use std::{collections::HashSet, sync::Arc};

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        clock,
        schedule::{
            BlockResult, BlockSlotRequest, BlockedSlot, CreateHoliday, Holiday, NewBlockedSlot,
            SetWeeklyHours, SlotAction, WeeklyHours, WeeklyHoursEntry,
        },
        shop::Shop,
    },
    repository::ScheduleStore,
};

use super::availability::SLOT_MINUTES;

const ALREADY_BLOCKED: &str = "Already blocked";

/// Return the trimmed value of a required field, or a validation error naming it
fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing(field))
}

pub fn parse_shop_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| AppError::Validation("Invalid shopId".to_string()))
}

fn validation(err: validator::ValidationErrors) -> AppError {
    AppError::Validation(err.to_string())
}

/// End of a slot starting at `start`; a slot may end at midnight (`00:00`) but not run past it
pub fn slot_end(start: NaiveTime) -> AppResult<NaiveTime> {
    let end = clock::minute_of_day(start) + SLOT_MINUTES;
    if end > clock::MINUTES_PER_DAY {
        return Err(AppError::Validation(format!(
            "Slot starting at {} would end after midnight",
            clock::format_time(start)
        )));
    }
    clock::from_minute_of_day(end % clock::MINUTES_PER_DAY)
        .ok_or_else(|| AppError::Internal(format!("Invalid slot end minute {}", end)))
}

/// A validated block or unblock command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCommand {
    pub shop_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub action: SlotAction,
    pub reason: Option<String>,
}

impl TryFrom<&BlockSlotRequest> for SlotCommand {
    type Error = AppError;

    fn try_from(req: &BlockSlotRequest) -> AppResult<Self> {
        // presence of every field is checked before any of them is parsed
        let shop_id = required(&req.shop_id, "shopId")?;
        let date = required(&req.date, "date")?;
        let time = required(&req.time, "time")?;
        let action = required(&req.action, "action")?;
        req.validate().map_err(validation)?;

        Ok(Self {
            shop_id: parse_shop_id(shop_id)?,
            date: clock::parse_date(date, "date")?,
            time: clock::parse_time(time, "time")?,
            action: action.parse().map_err(AppError::Validation)?,
            reason: trimmed_reason(&req.reason),
        })
    }
}

fn trimmed_reason(reason: &Option<String>) -> Option<String> {
    reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Split a set-hours body into its shop and entries
pub fn parse_hours_request(req: SetWeeklyHours) -> AppResult<(Uuid, Vec<WeeklyHoursEntry>)> {
    let shop_id = parse_shop_id(required(&req.shop_id, "shopId")?)?;
    let hours = req.hours.ok_or_else(|| AppError::missing("hours"))?;
    Ok((shop_id, hours))
}

/// A validated add-holiday command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCommand {
    pub shop_id: Uuid,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

impl TryFrom<&CreateHoliday> for HolidayCommand {
    type Error = AppError;

    fn try_from(req: &CreateHoliday) -> AppResult<Self> {
        let shop_id = required(&req.shop_id, "shopId")?;
        let date = required(&req.date, "date")?;
        req.validate().map_err(validation)?;

        Ok(Self {
            shop_id: parse_shop_id(shop_id)?,
            date: clock::parse_date(date, "date")?,
            reason: trimmed_reason(&req.reason),
        })
    }
}

#[derive(Clone)]
pub struct SchedulesService {
    store: Arc<dyn ScheduleStore>,
}

impl SchedulesService {
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    pub async fn get_shop(&self, shop_id: Uuid) -> AppResult<Shop> {
        self.store
            .get_shop(shop_id)
            .await?
            .ok_or(AppError::ShopNotFound(shop_id))
    }

    // ---- Blocked slots ----

    /// Block or unblock one slot of an already resolved shop; both directions are idempotent
    pub async fn set_blocked_slot(&self, shop: &Shop, cmd: SlotCommand) -> AppResult<BlockResult> {
        match cmd.action {
            SlotAction::Block => self.block(shop.id, cmd).await,
            SlotAction::Unblock => {
                let removed = self
                    .store
                    .delete_blocked_slot(shop.id, cmd.date, cmd.time)
                    .await?;
                tracing::info!(shop_id = %shop.id, date = %cmd.date, time = %clock::format_time(cmd.time), removed, "slot unblocked");
                Ok(BlockResult {
                    blocked: false,
                    slot: None,
                    message: Some("Unblocked".to_string()),
                })
            }
        }
    }

    async fn block(&self, shop_id: Uuid, cmd: SlotCommand) -> AppResult<BlockResult> {
        let already = BlockResult {
            blocked: true,
            slot: None,
            message: Some(ALREADY_BLOCKED.to_string()),
        };

        if self
            .store
            .find_blocked_slot(shop_id, cmd.date, cmd.time)
            .await?
            .is_some()
        {
            return Ok(already);
        }

        let new_slot = NewBlockedSlot {
            shop_id,
            date: cmd.date,
            start_time: cmd.time,
            end_time: slot_end(cmd.time)?,
            reason: cmd.reason,
        };

        match self.store.insert_blocked_slot(new_slot).await {
            Ok(slot) => {
                tracing::info!(shop_id = %slot.shop_id, date = %slot.date, time = %clock::format_time(slot.start_time), "slot blocked");
                Ok(BlockResult {
                    blocked: true,
                    slot: Some(slot),
                    message: None,
                })
            }
            // a concurrent request inserted the same slot first
            Err(AppError::Conflict(_)) => Ok(already),
            Err(e) => Err(e),
        }
    }

    /// Blocked slots from today onwards
    pub async fn list_blocked_slots(&self, shop: &Shop) -> AppResult<Vec<BlockedSlot>> {
        self.store.list_upcoming_blocked_slots(shop.id, Self::today()).await
    }

    // ---- Weekly hours ----

    pub async fn get_weekly_hours(&self, shop_id: Uuid) -> AppResult<Vec<WeeklyHours>> {
        self.get_shop(shop_id).await?;
        self.store.list_weekly_hours(shop_id).await
    }

    /// Replace the whole weekly hours set of a shop
    pub async fn set_weekly_hours(&self, shop: &Shop, hours: Vec<WeeklyHoursEntry>) -> AppResult<Vec<WeeklyHours>> {
        let mut seen = HashSet::new();
        for entry in &hours {
            entry.validate().map_err(validation)?;
            if !seen.insert(entry.day_of_week) {
                return Err(AppError::Validation(format!(
                    "dayOfWeek {} appears more than once",
                    entry.day_of_week
                )));
            }
            if !entry.is_closed && entry.open_time >= entry.close_time {
                return Err(AppError::Validation(format!(
                    "openTime must be before closeTime for dayOfWeek {}",
                    entry.day_of_week
                )));
            }
        }

        let rows = self.store.replace_weekly_hours(shop.id, hours).await?;
        tracing::info!(shop_id = %shop.id, days = rows.len(), "weekly hours replaced");
        Ok(rows)
    }

    // ---- Holidays ----

    /// Holidays from today onwards
    pub async fn list_holidays(&self, shop_id: Uuid) -> AppResult<Vec<Holiday>> {
        self.get_shop(shop_id).await?;
        self.store.list_holidays(shop_id, Self::today()).await
    }

    pub async fn add_holiday(&self, shop: &Shop, cmd: HolidayCommand) -> AppResult<Holiday> {
        let holiday = self.store.insert_holiday(shop.id, cmd.date, cmd.reason).await?;
        tracing::info!(shop_id = %shop.id, date = %cmd.date, "holiday added");
        Ok(holiday)
    }

    pub async fn remove_holiday(&self, shop: &Shop, date: NaiveDate) -> AppResult<()> {
        if !self.store.delete_holiday(shop.id, date).await? {
            return Err(AppError::NotFound(format!("No holiday on {}", date)));
        }
        tracing::info!(shop_id = %shop.id, %date, "holiday removed");
        Ok(())
    }
}
