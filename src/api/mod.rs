//! API handlers for Shopslot REST endpoints

pub mod availability;
pub mod health;
pub mod openapi;
pub mod schedules;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{shop::Shop, user::UserClaims},
    AppState,
};

/// JSON body whose parse failures render as an `AppError` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters whose parse failures render as an `AppError` body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string whose parse failures render as an `AppError` body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Resolve the shop and check that the principal may manage it
pub(crate) async fn require_owner(state: &AppState, claims: &UserClaims, shop_id: Uuid) -> Result<Shop, AppError> {
    let shop = state.services.schedules.get_shop(shop_id).await?;
    claims.require_shop_owner(&shop)?;
    Ok(shop)
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Availability
        .route("/shops/:shop_id/availability", get(availability::get_availability))
        // Weekly hours
        .route("/shops/:shop_id/hours", get(schedules::get_hours))
        .route("/schedule/hours", put(schedules::set_hours))
        // Blocked slots
        .route("/shops/:shop_id/blocked-slots", get(schedules::list_blocked_slots))
        .route("/schedule/blocked-slots", post(schedules::set_blocked_slot))
        // Holidays
        .route("/shops/:shop_id/holidays", get(schedules::list_holidays))
        .route("/schedule/holidays", post(schedules::create_holiday))
        .route("/shops/:shop_id/holidays/:date", delete(schedules::delete_holiday))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
