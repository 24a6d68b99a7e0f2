// Event HTTP routes
//
// Write handlers take the raw body so that malformed JSON and non-object
// bodies get the envelope errors instead of axum's extractor rejections.
// Order per request: parse body, connect to the store, validate, write.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use devevents_core::{Event, EventInput};
use std::sync::Arc;

use super::common::{
    parse_object, ApiError, ApiResponse, CREATE_EVENT, READ_EVENTS, UPDATE_EVENT,
};
use crate::services::EventService;
use crate::storage::PersistenceGateway;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<PersistenceGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<PersistenceGateway>) -> Self {
        Self { gateway }
    }

    async fn service(&self) -> Result<EventService, ApiError> {
        let db = self.gateway.connect().await.map_err(ApiError::from_connect)?;
        Ok(EventService::new(db))
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", post(create_event).get(list_events))
        .route("/api/events/:slug", get(get_event).patch(update_event))
        .with_state(state)
}

/// POST /api/events - Create a new event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = EventInput,
    responses(
        (status = 201, description = "Event created successfully", body = ApiResponse<Event>),
        (status = 400, description = "Invalid JSON, non-object body, or validation failure", body = ApiResponse<Event>),
        (status = 409, description = "An event with the same slug already exists", body = ApiResponse<Event>),
        (status = 500, description = "Database connection failed or unexpected error", body = ApiResponse<Event>)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    let object = parse_object(&body)?;
    let service = state.service().await?;

    let input = EventInput::from_json(&object)
        .map_err(|errors| ApiError::Validation(errors.messages()))?;
    let event = service
        .create(input)
        .await
        .map_err(|e| ApiError::from_store(e, CREATE_EVENT))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Event created successfully", event)),
    ))
}

/// GET /api/events - List events, newest first
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List of events", body = ApiResponse<Vec<Event>>),
        (status = 500, description = "Database connection failed or unexpected error", body = ApiResponse<Vec<Event>>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let events = state
        .service()
        .await?
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, READ_EVENTS))?;

    Ok(Json(ApiResponse::ok("Events fetched successfully", events)))
}

/// GET /api/events/{slug} - Get an event by slug
#[utoipa::path(
    get,
    path = "/api/events/{slug}",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Event found", body = ApiResponse<Event>),
        (status = 404, description = "Event not found", body = ApiResponse<Event>),
        (status = 500, description = "Database connection failed or unexpected error", body = ApiResponse<Event>)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state
        .service()
        .await?
        .get_by_slug(&slug)
        .await
        .map_err(|e| ApiError::from_store(e, READ_EVENTS))?
        .ok_or_else(|| not_found(&slug))?;

    Ok(Json(ApiResponse::ok("Event fetched successfully", event)))
}

/// PATCH /api/events/{slug} - Update an event. Only provided fields are
/// validated and written.
#[utoipa::path(
    patch,
    path = "/api/events/{slug}",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    request_body = EventInput,
    responses(
        (status = 200, description = "Event updated successfully", body = ApiResponse<Event>),
        (status = 400, description = "Invalid JSON, non-object body, or validation failure", body = ApiResponse<Event>),
        (status = 404, description = "Event not found", body = ApiResponse<Event>),
        (status = 409, description = "The new title collides with another event's slug", body = ApiResponse<Event>),
        (status = 500, description = "Database connection failed or unexpected error", body = ApiResponse<Event>)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let object = parse_object(&body)?;
    let service = state.service().await?;

    let input = EventInput::from_json_update(&object)
        .map_err(|errors| ApiError::Validation(errors.messages()))?;
    let event = service
        .update(&slug, input)
        .await
        .map_err(|e| ApiError::from_store(e, UPDATE_EVENT))?
        .ok_or_else(|| not_found(&slug))?;

    Ok(Json(ApiResponse::ok("Event updated successfully", event)))
}

fn not_found(slug: &str) -> ApiError {
    ApiError::NotFound {
        message: "Event not found",
        detail: format!("No event found with slug '{}'", slug),
    }
}
