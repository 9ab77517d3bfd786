//! Availability API endpoint

use axum::{extract::State, Json};
use uuid::Uuid;

use super::{ApiPath, ApiQuery};
use crate::{
    error::{AppError, AppResult},
    models::{
        availability::{AvailabilityQuery, AvailabilityResponse},
        clock,
    },
};

/// Bookable slots of a shop on one date
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/availability",
    tag = "availability",
    params(
        ("shop_id" = Uuid, Path, description = "Shop ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Slot grid, or the reason the shop is unavailable", body = AvailabilityResponse),
        (status = 400, description = "Missing or malformed date", body = crate::error::ErrorResponse),
        (status = 404, description = "Shop not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    ApiPath(shop_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let raw = query
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::missing("date"))?;
    let date = clock::parse_date(raw, "date")?;

    let availability = state.services.availability.compute(shop_id, date).await?;
    Ok(Json(availability.into()))
}
