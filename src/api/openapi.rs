//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, health, schedules};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shopslot API",
        version = "0.3.0",
        description = "Shop availability and schedule management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Availability
        availability::get_availability,
        // Schedules
        schedules::get_hours,
        schedules::set_hours,
        schedules::list_blocked_slots,
        schedules::set_blocked_slot,
        schedules::list_holidays,
        schedules::create_holiday,
        schedules::delete_holiday,
    ),
    components(
        schemas(
            // Availability
            crate::models::availability::AvailabilityResponse,
            crate::models::availability::Slot,
            crate::models::availability::UnavailableReason,
            // Schedules
            crate::models::schedule::WeeklyHours,
            crate::models::schedule::WeeklyHoursEntry,
            crate::models::schedule::SetWeeklyHours,
            crate::models::schedule::WeeklyHoursResponse,
            crate::models::schedule::BlockedSlot,
            crate::models::schedule::BlockSlotRequest,
            crate::models::schedule::BlockResult,
            crate::models::schedule::Holiday,
            crate::models::schedule::CreateHoliday,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Bookable slot computation"),
        (name = "schedules", description = "Weekly hours, blocked slots and holidays")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
