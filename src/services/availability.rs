//! Availability engine
//!
//! Turns a shop's weekly hours, holiday, blocked slots and active bookings for
//! one date into an ordered grid of 30-minute slots. Precedence is fixed:
//! a holiday closes the day whatever the hours say, a closed or unconfigured
//! weekday closes it next, and only then are blocks and bookings applied.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        availability::{Availability, Slot, UnavailableReason},
        booking::BookedInterval,
        clock,
        schedule::{BlockedSlot, Holiday, WeeklyHours},
    },
    repository::{BookingStore, ScheduleStore},
};

/// Width of a slot and step of the grid
pub const SLOT_MINUTES: u32 = 30;

/// Occupied span assumed for a booking whose service has no duration
pub const DEFAULT_BOOKING_MINUTES: u32 = SLOT_MINUTES;

const HOLIDAY_FALLBACK_MESSAGE: &str = "The shop is closed for a holiday on this date";
const CLOSED_MESSAGE: &str = "The shop is closed on this day";

/// Day-of-week key used by weekly hours (Sunday = 0 ... Saturday = 6)
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Slot start times from `open` while strictly before `close`, in minutes of day
///
/// Cloning the grid restarts it from wherever the clone was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    next: u32,
    close: u32,
}

impl SlotGrid {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            next: clock::minute_of_day(open),
            close: clock::minute_of_day(close),
        }
    }
}

impl Iterator for SlotGrid {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next >= self.close {
            return None;
        }
        let current = self.next;
        self.next += SLOT_MINUTES;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.close.saturating_sub(self.next).div_ceil(SLOT_MINUTES) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotGrid {}

/// Half-open `[start, start + duration)` span of a booking, in minutes of day
fn booking_span(booking: &BookedInterval) -> (u32, u32) {
    let start = clock::minute_of_day(booking.time);
    let duration = booking
        .duration_minutes
        .filter(|d| *d > 0)
        .map(|d| d as u32)
        .unwrap_or(DEFAULT_BOOKING_MINUTES);
    (start, start + duration)
}

/// Annotate every slot of the grid with block and booking occupancy
pub fn mark_slots(grid: SlotGrid, blocked: &[BlockedSlot], bookings: &[BookedInterval]) -> Vec<Slot> {
    let blocked_starts: Vec<u32> = blocked
        .iter()
        .map(|b| clock::minute_of_day(b.start_time))
        .collect();
    let spans: Vec<(u32, u32)> = bookings.iter().map(booking_span).collect();

    grid.map(|t| {
        let is_blocked = blocked_starts.contains(&t);
        let is_booked = spans.iter().any(|&(start, end)| start <= t && t < end);
        Slot::new(t, is_blocked, is_booked)
    })
    .collect()
}

/// Everything the engine reads for one (shop, date)
#[derive(Debug, Clone, Default)]
pub struct DayInputs {
    pub hours: Option<WeeklyHours>,
    pub holiday: Option<Holiday>,
    pub blocked: Vec<BlockedSlot>,
    pub bookings: Vec<BookedInterval>,
}

/// Pure availability computation over already fetched inputs
pub fn evaluate(date: NaiveDate, inputs: &DayInputs) -> Availability {
    if let Some(holiday) = &inputs.holiday {
        let message = holiday
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(HOLIDAY_FALLBACK_MESSAGE)
            .to_string();
        return Availability::Unavailable {
            reason: UnavailableReason::Holiday,
            message,
        };
    }

    let hours = match &inputs.hours {
        Some(hours) if !hours.is_closed => hours,
        _ => {
            return Availability::Unavailable {
                reason: UnavailableReason::Closed,
                message: CLOSED_MESSAGE.to_string(),
            }
        }
    };

    let grid = SlotGrid::new(hours.open_time, hours.close_time);
    Availability::Open {
        date,
        open_time: clock::format_time(hours.open_time),
        close_time: clock::format_time(hours.close_time),
        slots: mark_slots(grid, &inputs.blocked, &inputs.bookings),
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    schedules: Arc<dyn ScheduleStore>,
    bookings: Arc<dyn BookingStore>,
}

impl AvailabilityService {
    pub fn new(schedules: Arc<dyn ScheduleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { schedules, bookings }
    }

    /// Compute the slot grid of `shop_id` on `date`
    ///
    /// All reads run concurrently; if any of them fails the whole computation fails.
    pub async fn compute(&self, shop_id: Uuid, date: NaiveDate) -> AppResult<Availability> {
        let dow = day_of_week(date);

        let (shop, hours, holiday, blocked, bookings) = tokio::try_join!(
            self.schedules.get_shop(shop_id),
            self.schedules.get_weekly_hours(shop_id, dow),
            self.schedules.get_holiday(shop_id, date),
            self.schedules.list_blocked_slots(shop_id, date),
            self.bookings.list_active_bookings(shop_id, date),
        )?;

        if shop.is_none() {
            return Err(AppError::ShopNotFound(shop_id));
        }

        let inputs = DayInputs {
            hours,
            holiday,
            blocked,
            bookings,
        };
        let availability = evaluate(date, &inputs);

        match &availability {
            Availability::Unavailable { reason, .. } => {
                tracing::debug!(%shop_id, %date, ?reason, "shop unavailable");
            }
            Availability::Open { slots, .. } => {
                tracing::debug!(
                    %shop_id,
                    %date,
                    slots = slots.len(),
                    free = slots.iter().filter(|s| s.available).count(),
                    "availability computed"
                );
            }
        }

        Ok(availability)
    }
}
