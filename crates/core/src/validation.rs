// Field-level validation errors
//
// Validators collect every failing field instead of stopping at the first one,
// so a client gets one message per invalid field in a single round trip.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the JSON payload (e.g. "agenda").
    pub field: &'static str,
    /// Human-readable message returned to the client.
    pub message: String,
}

/// All field errors produced by validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages in the order the fields were checked
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Whether a given field failed
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` if nothing failed, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a required string field: absent fails with `"{label} is required"`,
/// blank after trimming fails with `blank_message`. Returns the trimmed value.
pub(crate) fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<&str>,
    blank_message: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        None => {
            errors.push(field, format!("{} is required", label));
            None
        }
        Some("") => {
            let message = blank_message
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} is required", label));
            errors.push(field, message);
            None
        }
        Some(trimmed) => Some(trimmed.to_string()),
    }
}

/// Check a list that must contain at least one item. Absent lists count as
/// empty.
pub(crate) fn non_empty_list(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<&[String]>,
) -> Option<Vec<String>> {
    match value {
        Some(items) if !items.is_empty() => Some(items.to_vec()),
        _ => {
            errors.push(field, format!("{} must contain at least one item", label));
            None
        }
    }
}

// ============================================================================
// Lenient JSON extraction
// ============================================================================
//
// Scalars are cast to strings ("port": 8080 becomes "8080") and a bare scalar
// where a list is expected becomes a one-item list. `null` counts as absent.
// Objects (and arrays where a string is expected) are rejected per field.

/// Read an optional string field from a JSON object.
pub(crate) fn json_text(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
    field: &'static str,
    label: &str,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match scalar_to_string(value) {
            Some(text) => Some(text),
            None => {
                errors.push(field, format!("{} has an invalid type", label));
                None
            }
        },
    }
}

/// Read an optional list-of-strings field from a JSON object.
pub(crate) fn json_list(
    errors: &mut ValidationErrors,
    object: &Map<String, Value>,
    field: &'static str,
    label: &str,
) -> Option<Vec<String>> {
    let items = match object.get(field) {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items.iter().map(scalar_to_string).collect(),
        Some(value) => scalar_to_string(value).map(|s| vec![s]),
    };
    if items.is_none() {
        errors.push(field, format!("{} has an invalid type", label));
    }
    items
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_casts_scalars() {
        let body = json!({"title": "Rust Nation", "venue": 42, "audience": true, "image": null});
        let object = body.as_object().unwrap();
        let mut errors = ValidationErrors::new();

        assert_eq!(
            json_text(&mut errors, object, "title", "Title"),
            Some("Rust Nation".to_string())
        );
        assert_eq!(json_text(&mut errors, object, "venue", "Venue"), Some("42".to_string()));
        assert_eq!(
            json_text(&mut errors, object, "audience", "Audience"),
            Some("true".to_string())
        );
        assert_eq!(json_text(&mut errors, object, "image", "Image URL"), None);
        assert_eq!(json_text(&mut errors, object, "overview", "Overview"), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_json_text_rejects_structures() {
        let body = json!({"title": {"en": "Rust"}, "venue": ["a", "b"]});
        let object = body.as_object().unwrap();
        let mut errors = ValidationErrors::new();

        assert_eq!(json_text(&mut errors, object, "title", "Title"), None);
        assert_eq!(json_text(&mut errors, object, "venue", "Venue"), None);
        assert_eq!(
            errors.messages(),
            vec!["Title has an invalid type", "Venue has an invalid type"]
        );
    }

    #[test]
    fn test_json_list() {
        let body = json!({
            "agenda": ["Keynote", "Workshops"],
            "tags": "rust",
            "bad": [{"x": 1}],
        });
        let object = body.as_object().unwrap();
        let mut errors = ValidationErrors::new();

        assert_eq!(
            json_list(&mut errors, object, "agenda", "Agenda"),
            Some(vec!["Keynote".to_string(), "Workshops".to_string()])
        );
        assert_eq!(
            json_list(&mut errors, object, "tags", "Tags"),
            Some(vec!["rust".to_string()])
        );
        assert_eq!(json_list(&mut errors, object, "missing", "Missing"), None);
        assert!(errors.is_empty());

        assert_eq!(json_list(&mut errors, object, "bad", "Bad"), None);
        assert_eq!(errors.messages(), vec!["Bad has an invalid type"]);
    }

    #[test]
    fn test_required_text() {
        let mut errors = ValidationErrors::new();
        assert_eq!(
            required_text(&mut errors, "title", "Title", Some("  Rust Meetup "), None),
            Some("Rust Meetup".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(required_text(&mut errors, "title", "Title", None, None), None);
        assert_eq!(
            required_text(
                &mut errors,
                "venue",
                "Venue",
                Some("   "),
                Some("Venue cannot be empty")
            ),
            None
        );
        assert_eq!(required_text(&mut errors, "date", "Date", Some(""), None), None);

        assert_eq!(
            errors.messages(),
            vec![
                "Title is required",
                "Venue cannot be empty",
                "Date is required"
            ]
        );
        assert!(errors.has_field("venue"));
        assert!(!errors.has_field("time"));
    }

    #[test]
    fn test_non_empty_list() {
        let mut errors = ValidationErrors::new();
        let items = vec!["Keynote".to_string()];
        assert_eq!(
            non_empty_list(&mut errors, "agenda", "Agenda", Some(items.as_slice())),
            Some(items.clone())
        );
        assert_eq!(non_empty_list(&mut errors, "agenda", "Agenda", None), None);
        assert_eq!(non_empty_list(&mut errors, "tags", "Tags", Some(&[][..])), None);
        assert_eq!(
            errors.messages(),
            vec![
                "Agenda must contain at least one item",
                "Tags must contain at least one item"
            ]
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));

        let mut errors = ValidationErrors::new();
        errors.push("mode", "Mode is required");
        let err = errors.into_result(7).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.to_string(), "Mode is required");
    }
}
