// Common DTOs and error mapping for the public API
//
// Every endpoint answers with the same envelope:
// `{success, message, data?, errors?}`. Handlers return `ApiError` and this
// module decides the status code and the client-facing messages; driver
// details only go to the log.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use devevents_core::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Response envelope shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome.
    #[schema(example = "Event created successfully")]
    pub message: String,
    /// The resource, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// One message per problem, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

/// Client-facing wording for one write operation
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Message for rejected writes (conflict, missing reference)
    pub failed: &'static str,
    /// Detail for slug collisions
    pub conflict: &'static str,
    /// Message for unclassified failures
    pub internal: &'static str,
    /// Detail for unclassified failures
    pub internal_detail: &'static str,
}

pub const CREATE_EVENT: Operation = Operation {
    failed: "Event creation failed",
    conflict: "An event with similar details already exists",
    internal: "Failed to create event",
    internal_detail: "An unexpected error occurred while creating the event",
};

pub const UPDATE_EVENT: Operation = Operation {
    failed: "Event update failed",
    conflict: "An event with similar details already exists",
    internal: "Failed to update event",
    internal_detail: "An unexpected error occurred while updating the event",
};

pub const READ_EVENTS: Operation = Operation {
    failed: "Event lookup failed",
    conflict: "An event with similar details already exists",
    internal: "Failed to fetch events",
    internal_detail: "An unexpected error occurred while fetching events",
};

pub const CREATE_BOOKING: Operation = Operation {
    failed: "Booking creation failed",
    conflict: "A booking with similar details already exists",
    internal: "Failed to create booking",
    internal_detail: "An unexpected error occurred while creating the booking",
};

/// Errors returned by API handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body is not parseable JSON
    InvalidJson,
    /// Body is JSON but not an object
    InvalidBody,
    /// The store could not be reached
    DatabaseUnavailable,
    /// One or more fields failed validation
    Validation(Vec<String>),
    /// A unique index rejected the write
    Conflict {
        message: &'static str,
        detail: String,
    },
    /// The addressed resource does not exist
    NotFound {
        message: &'static str,
        detail: String,
    },
    /// Anything else
    Internal {
        message: &'static str,
        detail: &'static str,
    },
}

impl ApiError {
    /// Map a store failure for the given operation
    pub fn from_store(err: StoreError, op: Operation) -> Self {
        match err {
            StoreError::Validation(errors) => ApiError::Validation(errors.messages()),
            StoreError::DuplicateKey(index) => {
                tracing::warn!(index = %index, "Duplicate key on write");
                ApiError::Conflict {
                    message: op.failed,
                    detail: op.conflict.to_string(),
                }
            }
            StoreError::MissingReference(_) => ApiError::NotFound {
                message: op.failed,
                detail: err.to_string(),
            },
            StoreError::Connection(_) | StoreError::Configuration(_) | StoreError::Unknown(_) => {
                tracing::error!(error = %err, "{}", op.internal);
                ApiError::Internal {
                    message: op.internal,
                    detail: op.internal_detail,
                }
            }
        }
    }

    /// Map a failed `gateway.connect()`
    pub fn from_connect(err: StoreError) -> Self {
        tracing::error!(error = %err, "Database connection error");
        ApiError::DatabaseUnavailable
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::InvalidBody | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DatabaseUnavailable | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Envelope body for this error
    pub fn body(&self) -> ApiResponse<()> {
        match self {
            ApiError::InvalidJson => ApiResponse::failure(
                "Invalid JSON in request body",
                vec!["Request body must be valid JSON".to_string()],
            ),
            ApiError::InvalidBody => ApiResponse::failure(
                "Invalid request body",
                vec!["Request body must be a valid object".to_string()],
            ),
            ApiError::DatabaseUnavailable => ApiResponse::failure(
                "Database connection failed",
                vec!["Unable to connect to database. Please try again later.".to_string()],
            ),
            ApiError::Validation(errors) => {
                ApiResponse::failure("Validation failed", errors.clone())
            }
            ApiError::Conflict { message, detail } | ApiError::NotFound { message, detail } => {
                ApiResponse::failure(*message, vec![detail.clone()])
            }
            ApiError::Internal { message, detail } => {
                ApiResponse::failure(*message, vec![detail.to_string()])
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Parse a raw request body into a JSON object
pub fn parse_object(body: &Bytes) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(ApiError::InvalidBody),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected request body");
            Err(ApiError::InvalidJson)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devevents_core::ValidationErrors;
    use uuid::Uuid;

    #[test]
    fn test_parse_object() {
        assert!(parse_object(&Bytes::from_static(br#"{"title":"x"}"#)).is_ok());
        assert_eq!(
            parse_object(&Bytes::from_static(b"not json")),
            Err(ApiError::InvalidJson)
        );
        assert_eq!(
            parse_object(&Bytes::new()),
            Err(ApiError::InvalidJson)
        );
        assert_eq!(
            parse_object(&Bytes::from_static(b"null")),
            Err(ApiError::InvalidBody)
        );
        assert_eq!(
            parse_object(&Bytes::from_static(b"[1,2]")),
            Err(ApiError::InvalidBody)
        );
        assert_eq!(
            parse_object(&Bytes::from_static(b"\"text\"")),
            Err(ApiError::InvalidBody)
        );
    }

    #[test]
    fn test_store_error_status_mapping() {
        let mut errors = ValidationErrors::new();
        errors.push("title", "Title is required");

        let cases = [
            (StoreError::Validation(errors), StatusCode::BAD_REQUEST),
            (
                StoreError::DuplicateKey("events_slug_key".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::MissingReference(Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::unknown("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::connection("reset"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from_store(err, CREATE_EVENT).status(), status);
        }
    }

    #[test]
    fn test_conflict_body() {
        let err = ApiError::from_store(
            StoreError::DuplicateKey("events_slug_key".to_string()),
            CREATE_EVENT,
        );
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Event creation failed");
        assert_eq!(
            body["errors"][0],
            "An event with similar details already exists"
        );
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_internal_body_hides_driver_detail() {
        let err = ApiError::from_store(
            StoreError::unknown("relation \"events\" does not exist"),
            CREATE_EVENT,
        );
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["message"], "Failed to create event");
        assert_eq!(
            body["errors"][0],
            "An unexpected error occurred while creating the event"
        );
    }

    #[test]
    fn test_missing_reference_body() {
        let id = Uuid::now_v7();
        let err = ApiError::from_store(StoreError::MissingReference(id), CREATE_BOOKING);
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["message"], "Booking creation failed");
        assert_eq!(
            body["errors"][0],
            format!("Event with ID {} does not exist", id)
        );
    }

    #[test]
    fn test_success_envelope_omits_errors() {
        let body = serde_json::to_value(ApiResponse::ok("Done", 1)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 1);
        assert!(body.get("errors").is_none());
    }
}
