//! Schedule API endpoints (weekly hours, blocked slots, holidays)

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::schedule::{
        BlockResult, BlockSlotRequest, BlockedSlot, CreateHoliday, Holiday, SetWeeklyHours,
        WeeklyHoursResponse,
    },
    services::schedules::{parse_hours_request, HolidayCommand, SlotCommand},
};

use super::{require_owner, ApiJson, ApiPath, AuthenticatedUser};

// ---- Weekly hours ----

/// Weekly hours of a shop
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/hours",
    tag = "schedules",
    params(("shop_id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Weekly hours ordered by day", body = WeeklyHoursResponse)
    )
)]
pub async fn get_hours(
    State(state): State<crate::AppState>,
    ApiPath(shop_id): ApiPath<Uuid>,
) -> AppResult<Json<WeeklyHoursResponse>> {
    let hours = state.services.schedules.get_weekly_hours(shop_id).await?;
    Ok(Json(WeeklyHoursResponse { hours }))
}

/// Replace the weekly hours of a shop
#[utoipa::path(
    put,
    path = "/schedule/hours",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = SetWeeklyHours,
    responses(
        (status = 200, description = "The full replaced set", body = WeeklyHoursResponse),
        (status = 400, description = "Invalid hours", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_hours(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<SetWeeklyHours>,
) -> AppResult<Json<WeeklyHoursResponse>> {
    let (shop_id, entries) = parse_hours_request(data)?;
    let shop = require_owner(&state, &claims, shop_id).await?;
    let hours = state.services.schedules.set_weekly_hours(&shop, entries).await?;
    Ok(Json(WeeklyHoursResponse { hours }))
}

// ---- Blocked slots ----

/// Upcoming blocked slots of a shop
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/blocked-slots",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("shop_id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Blocked slots from today on", body = Vec<BlockedSlot>)
    )
)]
pub async fn list_blocked_slots(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath(shop_id): ApiPath<Uuid>,
) -> AppResult<Json<Vec<BlockedSlot>>> {
    let shop = require_owner(&state, &claims, shop_id).await?;
    let slots = state.services.schedules.list_blocked_slots(&shop).await?;
    Ok(Json(slots))
}

/// Block or unblock a slot
#[utoipa::path(
    post,
    path = "/schedule/blocked-slots",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = BlockSlotRequest,
    responses(
        (status = 200, description = "Slot state after the action", body = BlockResult),
        (status = 400, description = "Missing field or invalid action", body = crate::error::ErrorResponse)
    )
)]
pub async fn set_blocked_slot(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<BlockSlotRequest>,
) -> AppResult<Json<BlockResult>> {
    let cmd = SlotCommand::try_from(&data)?;
    let shop = require_owner(&state, &claims, cmd.shop_id).await?;
    let result = state.services.schedules.set_blocked_slot(&shop, cmd).await?;
    Ok(Json(result))
}

// ---- Holidays ----

/// Upcoming holidays of a shop
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/holidays",
    tag = "schedules",
    params(("shop_id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Holidays from today on", body = Vec<Holiday>)
    )
)]
pub async fn list_holidays(
    State(state): State<crate::AppState>,
    ApiPath(shop_id): ApiPath<Uuid>,
) -> AppResult<Json<Vec<Holiday>>> {
    let holidays = state.services.schedules.list_holidays(shop_id).await?;
    Ok(Json(holidays))
}

/// Add a holiday
#[utoipa::path(
    post,
    path = "/schedule/holidays",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Holiday),
        (status = 409, description = "Date is already a holiday", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_holiday(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(data): ApiJson<CreateHoliday>,
) -> AppResult<(StatusCode, Json<Holiday>)> {
    let cmd = HolidayCommand::try_from(&data)?;
    let shop = require_owner(&state, &claims, cmd.shop_id).await?;
    let holiday = state.services.schedules.add_holiday(&shop, cmd).await?;
    Ok((StatusCode::CREATED, Json(holiday)))
}

/// Remove a holiday
#[utoipa::path(
    delete,
    path = "/shops/{shop_id}/holidays/{date}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(
        ("shop_id" = Uuid, Path, description = "Shop ID"),
        ("date" = String, Path, description = "Holiday date (YYYY-MM-DD)")
    ),
    responses(
        (status = 204, description = "Holiday removed"),
        (status = 404, description = "No holiday on that date", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_holiday(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiPath((shop_id, date)): ApiPath<(Uuid, NaiveDate)>,
) -> AppResult<StatusCode> {
    let shop = require_owner(&state, &claims, shop_id).await?;
    state.services.schedules.remove_holiday(&shop, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
