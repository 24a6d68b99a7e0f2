// DevEvents Server Library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Environment configuration
pub mod config;

// Services layer
pub mod services;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

pub use config::ServerConfig;
pub use storage::PersistenceGateway;

/// Build the router: health probe, API routes and Swagger UI, all sharing
/// one gateway.
pub fn build_router(gateway: Arc<PersistenceGateway>) -> Router {
    let events_state = api::events::AppState::new(gateway.clone());
    let bookings_state = api::bookings::AppState::new(gateway.clone());
    let health_state = api::health::HealthState { gateway };

    Router::new()
        .merge(api::health::routes(health_state))
        .merge(api::events::routes(events_state))
        .merge(api::bookings::routes(bookings_state))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", openapi::ApiDoc::openapi()),
        )
}

/// Add the HTTP layers: CORS (only if origins are configured) and request tracing
pub fn with_layers(app: Router, cors_origins: &[HeaderValue]) -> Router {
    let app = if cors_origins.is_empty() {
        app
    } else {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins.iter().cloned()))
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        )
    };

    app.layer(TraceLayer::new_for_http())
}
