// Booking domain types and schema
//
// A booking is one email registered against one event. The event reference is
// checked for existence right before the write, by the storage layer; nothing
// in the store enforces it afterwards.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::validation::{json_text, ValidationErrors};

/// A registration for an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier for the booking.
    pub id: Uuid,
    /// ID of the event this booking is for.
    pub event_id: Uuid,
    /// Attendee email, trimmed and lowercased.
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied booking fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    /// ID of the event to book.
    pub event_id: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: Option<String>,
}

/// Validated booking fields, as written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub event_id: Uuid,
    pub email: String,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether an (already normalized) email matches the accepted pattern
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

impl BookingInput {
    /// Read booking fields from a JSON object.
    pub fn from_json(object: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let input = Self {
            event_id: json_text(&mut errors, object, "eventId", "Event ID"),
            email: json_text(&mut errors, object, "email", "Email"),
        };
        errors.into_result(input)
    }

    /// Validate the booking. The email is normalized before it is matched.
    pub fn validate(&self) -> Result<NewBooking, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let event_id = match self.event_id.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("eventId", "Event ID is required");
                None
            }
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("eventId", "Event ID is invalid");
                    None
                }
            },
        };

        let email = match self.email.as_deref().map(normalize_email) {
            None => {
                errors.push("email", "Email is required");
                None
            }
            Some(email) if email.is_empty() => {
                errors.push("email", "Email is required");
                None
            }
            Some(email) if !is_valid_email(&email) => {
                errors.push("email", "Please provide a valid email address");
                None
            }
            Some(email) => Some(email),
        };

        match (event_id, email) {
            (Some(event_id), Some(email)) if errors.is_empty() => {
                Ok(NewBooking { event_id, email })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.io"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@@example.com"));
    }

    #[test]
    fn test_validate_normalizes_email() {
        let event_id = Uuid::now_v7();
        let input = BookingInput {
            event_id: Some(event_id.to_string()),
            email: Some("  Ada@Example.COM ".to_string()),
        };
        let booking = input.validate().unwrap();
        assert_eq!(booking.event_id, event_id);
        assert_eq!(booking.email, "ada@example.com");
    }

    #[test]
    fn test_validate_missing_fields() {
        let errors = BookingInput::default().validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["Event ID is required", "Email is required"]
        );
    }

    #[test]
    fn test_validate_bad_values() {
        let input = BookingInput {
            event_id: Some("not-a-uuid".to_string()),
            email: Some("nobody".to_string()),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["Event ID is invalid", "Please provide a valid email address"]
        );
    }

    #[test]
    fn test_from_json_camel_case() {
        let body = json!({"eventId": "0191e0c2-7a3b-7000-8000-000000000001", "email": "x@y.z"});
        let input = BookingInput::from_json(body.as_object().unwrap()).unwrap();
        assert_eq!(
            input.event_id.as_deref(),
            Some("0191e0c2-7a3b-7000-8000-000000000001")
        );
        assert_eq!(input.email.as_deref(), Some("x@y.z"));
    }
}
