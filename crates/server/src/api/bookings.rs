// Booking HTTP routes

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use devevents_core::{Booking, BookingInput};
use std::sync::Arc;

use super::common::{parse_object, ApiError, ApiResponse, CREATE_BOOKING};
use crate::services::BookingService;
use crate::storage::PersistenceGateway;

/// App state for booking routes
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<PersistenceGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

/// Create booking routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .with_state(state)
}

/// POST /api/bookings - Book an event
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = BookingInput,
    responses(
        (status = 201, description = "Booking created successfully", body = ApiResponse<Booking>),
        (status = 400, description = "Invalid JSON, non-object body, or validation failure", body = ApiResponse<Booking>),
        (status = 404, description = "The referenced event does not exist", body = ApiResponse<Booking>),
        (status = 500, description = "Database connection failed or unexpected error", body = ApiResponse<Booking>)
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), ApiError> {
    let object = parse_object(&body)?;
    let db = state
        .gateway
        .connect()
        .await
        .map_err(ApiError::from_connect)?;

    let input = BookingInput::from_json(&object)
        .map_err(|errors| ApiError::Validation(errors.messages()))?;
    let booking = BookingService::new(db)
        .create(input)
        .await
        .map_err(|e| ApiError::from_store(e, CREATE_BOOKING))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Booking created successfully", booking)),
    ))
}
