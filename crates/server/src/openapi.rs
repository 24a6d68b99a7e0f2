// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the DevEvents API.
// It is used by both the server (for Swagger UI) and the export-openapi
// binary (for static spec generation).

use crate::api;
use crate::api::ApiResponse;
use devevents_core::{Booking, BookingInput, Event, EventInput, EventMode};
use utoipa::OpenApi;

/// OpenAPI documentation for the DevEvents API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::create_event,
        api::events::list_events,
        api::events::get_event,
        api::events::update_event,
        api::bookings::create_booking,
        api::health::health,
    ),
    components(
        schemas(
            Event, EventMode, EventInput,
            Booking, BookingInput,
            ApiResponse<Event>,
            ApiResponse<Vec<Event>>,
            ApiResponse<Booking>,
            api::health::HealthResponse,
        )
    ),
    tags(
        (name = "events", description = "Event listing endpoints"),
        (name = "bookings", description = "Event booking endpoints"),
        (name = "health", description = "Liveness probe")
    ),
    info(
        title = "DevEvents API",
        version = "0.1.0",
        description = "API for listing developer events and booking them",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
