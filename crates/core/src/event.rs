// Event domain types and schema
//
// An Event moves through three shapes on the write path:
// - EventInput: what the client sent (every field optional, lenient types)
// - EventDraft: validated, trimmed field values; slug may still be unset
// - NewEvent:   after the pre-persist step; this is what the store writes
//
// Event is the public representation read back from the store. The store's
// version counter never appears on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::normalize::{normalize_date, normalize_time};
use crate::slug::generate_slug;
use crate::validation::{json_list, json_text, non_empty_list, required_text, ValidationErrors};

/// Message returned when `mode` is not one of the allowed values
pub const MODE_VALUES_MESSAGE: &str = "Mode must be one of: online, offline, hybrid";

/// Message for each field when an update sets it to `null`, in schema order
const CLEARED_FIELD_MESSAGES: [(&str, &str); 13] = [
    ("title", "Title is required"),
    ("description", "Description is required"),
    ("overview", "Overview is required"),
    ("image", "Image URL is required"),
    ("venue", "Venue is required"),
    ("location", "Location is required"),
    ("date", "Date is required"),
    ("time", "Time is required"),
    ("mode", "Mode is required"),
    ("audience", "Audience is required"),
    ("agenda", "Agenda must contain at least one item"),
    ("organizer", "Organizer is required"),
    ("tags", "Tags must contain at least one item"),
];

/// How an event is attended.
/// - `online`: remote only
/// - `offline`: in person only
/// - `hybrid`: both
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
    Hybrid,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventMode::Online => "online",
            EventMode::Offline => "offline",
            EventMode::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for EventMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(EventMode::Online),
            "offline" => Ok(EventMode::Offline),
            "hybrid" => Ok(EventMode::Hybrid),
            other => Err(format!("unknown event mode: {}", other)),
        }
    }
}

/// A listed developer event (conference, meetup, hackathon).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// Event title.
    #[cfg_attr(feature = "openapi", schema(example = "React Summit US 2025"))]
    pub title: String,
    /// URL-safe identifier derived from the title. Unique across events.
    #[cfg_attr(feature = "openapi", schema(example = "react-summit-us-2025"))]
    pub slug: String,
    pub description: String,
    pub overview: String,
    /// Image URL.
    pub image: String,
    pub venue: String,
    #[cfg_attr(feature = "openapi", schema(example = "San Francisco, CA, USA"))]
    pub location: String,
    /// Normalized to `YYYY-MM-DD` when the submitted value could be parsed.
    #[cfg_attr(feature = "openapi", schema(example = "2025-11-07"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00 AM"))]
    pub time: String,
    pub mode: EventMode,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied event fields. Every field is optional here; whether an
/// absent field is an error depends on the write (create or update).
///
/// `slug`, `id` and timestamps are not part of this shape and are ignored if
/// sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventInput {
    #[cfg_attr(feature = "openapi", schema(example = "React Summit US 2025"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "https://example.com/event1.jpg"))]
    pub image: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-11-07"))]
    pub date: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "09:00 AM"))]
    pub time: Option<String>,
    /// One of `online`, `offline`, `hybrid`.
    #[cfg_attr(feature = "openapi", schema(example = "hybrid"))]
    pub mode: Option<String>,
    pub audience: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub organizer: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Fields written by a create or update that the pre-persist step cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFields {
    pub title: bool,
    pub date: bool,
    pub time: bool,
}

impl TouchedFields {
    /// Every field is new on create
    pub fn all() -> Self {
        Self {
            title: true,
            date: true,
            time: true,
        }
    }

    /// Fields present in a partial update
    pub fn from_input(input: &EventInput) -> Self {
        Self {
            title: input.title.is_some(),
            date: input.date.is_some(),
            time: input.time.is_some(),
        }
    }
}

/// Validated event fields, before the pre-persist step.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: EventMode,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
}

/// Event fields as written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: EventMode,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
}

impl EventInput {
    /// Read event fields from a JSON object.
    ///
    /// Unknown keys (including `slug`, `id`, timestamps) are ignored. Fails
    /// only when a field has a type that cannot be read as text.
    pub fn from_json(object: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let input = Self::read_fields(&mut errors, object);
        errors.into_result(input)
    }

    /// Read a partial update from a JSON object.
    ///
    /// Same as [`EventInput::from_json`], except that a field explicitly set to
    /// `null` is rejected: every event field is mandatory and cannot be cleared.
    pub fn from_json_update(object: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let input = Self::read_fields(&mut errors, object);
        for (field, message) in CLEARED_FIELD_MESSAGES {
            if matches!(object.get(field), Some(Value::Null)) {
                errors.push(field, message);
            }
        }
        errors.into_result(input)
    }

    fn read_fields(errors: &mut ValidationErrors, object: &Map<String, Value>) -> Self {
        Self {
            title: json_text(errors, object, "title", "Title"),
            description: json_text(errors, object, "description", "Description"),
            overview: json_text(errors, object, "overview", "Overview"),
            image: json_text(errors, object, "image", "Image URL"),
            venue: json_text(errors, object, "venue", "Venue"),
            location: json_text(errors, object, "location", "Location"),
            date: json_text(errors, object, "date", "Date"),
            time: json_text(errors, object, "time", "Time"),
            mode: json_text(errors, object, "mode", "Mode"),
            audience: json_text(errors, object, "audience", "Audience"),
            agenda: json_list(errors, object, "agenda", "Agenda"),
            organizer: json_text(errors, object, "organizer", "Organizer"),
            tags: json_list(errors, object, "tags", "Tags"),
        }
    }

    /// Whether the input carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.overview.is_none()
            && self.image.is_none()
            && self.venue.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.mode.is_none()
            && self.audience.is_none()
            && self.agenda.is_none()
            && self.organizer.is_none()
            && self.tags.is_none()
    }

    /// Validate a complete event for creation.
    ///
    /// Every field is checked and every failure reported, in schema order.
    pub fn validate(&self) -> Result<EventDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let checked = CheckedFields::check(&mut errors, self, Presence::Required);

        if !errors.is_empty() {
            return Err(errors);
        }

        // All Some once no errors were recorded
        match checked {
            CheckedFields {
                title: Some(title),
                description: Some(description),
                overview: Some(overview),
                image: Some(image),
                venue: Some(venue),
                location: Some(location),
                date: Some(date),
                time: Some(time),
                mode: Some(mode),
                audience: Some(audience),
                agenda: Some(agenda),
                organizer: Some(organizer),
                tags: Some(tags),
            } => Ok(EventDraft {
                title,
                slug: None,
                description,
                overview,
                image,
                venue,
                location,
                date,
                time,
                mode,
                audience,
                agenda,
                organizer,
                tags,
            }),
            _ => Err(errors),
        }
    }
}

impl Event {
    /// Merge a partial update into this event, validating only the fields the
    /// update carries. Returns the merged draft with the current slug kept, and
    /// the set of touched fields for the pre-persist step.
    pub fn apply_update(
        &self,
        update: &EventInput,
    ) -> Result<(EventDraft, TouchedFields), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let checked = CheckedFields::check(&mut errors, update, Presence::Optional);

        if !errors.is_empty() {
            return Err(errors);
        }

        let draft = EventDraft {
            title: checked.title.unwrap_or_else(|| self.title.clone()),
            slug: Some(self.slug.clone()),
            description: checked
                .description
                .unwrap_or_else(|| self.description.clone()),
            overview: checked.overview.unwrap_or_else(|| self.overview.clone()),
            image: checked.image.unwrap_or_else(|| self.image.clone()),
            venue: checked.venue.unwrap_or_else(|| self.venue.clone()),
            location: checked.location.unwrap_or_else(|| self.location.clone()),
            date: checked.date.unwrap_or_else(|| self.date.clone()),
            time: checked.time.unwrap_or_else(|| self.time.clone()),
            mode: checked.mode.unwrap_or(self.mode),
            audience: checked.audience.unwrap_or_else(|| self.audience.clone()),
            agenda: checked.agenda.unwrap_or_else(|| self.agenda.clone()),
            organizer: checked.organizer.unwrap_or_else(|| self.organizer.clone()),
            tags: checked.tags.unwrap_or_else(|| self.tags.clone()),
        };

        Ok((draft, TouchedFields::from_input(update)))
    }
}

impl EventDraft {
    /// Pre-persist step. Runs once per write, after validation.
    ///
    /// - title touched, or no slug yet: slug is regenerated from the title
    /// - date touched: date is normalized to `YYYY-MM-DD` when parseable
    /// - time touched: whitespace in time is collapsed
    pub fn prepare(self, touched: TouchedFields) -> NewEvent {
        let slug = match self.slug {
            Some(slug) if !touched.title && !slug.is_empty() => slug,
            _ => generate_slug(&self.title),
        };
        let date = if touched.date {
            normalize_date(&self.date)
        } else {
            self.date
        };
        let time = if touched.time {
            normalize_time(&self.time)
        } else {
            self.time
        };

        NewEvent {
            title: self.title,
            slug,
            description: self.description,
            overview: self.overview,
            image: self.image,
            venue: self.venue,
            location: self.location,
            date,
            time,
            mode: self.mode,
            audience: self.audience,
            agenda: self.agenda,
            organizer: self.organizer,
            tags: self.tags,
        }
    }
}

// ============================================================================
// Field checks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// Absent fields are errors (create)
    Required,
    /// Absent fields are skipped (update)
    Optional,
}

/// Per-field results of running the schema checks. `None` means the field
/// failed, or was absent on an optional check.
struct CheckedFields {
    title: Option<String>,
    description: Option<String>,
    overview: Option<String>,
    image: Option<String>,
    venue: Option<String>,
    location: Option<String>,
    date: Option<String>,
    time: Option<String>,
    mode: Option<EventMode>,
    audience: Option<String>,
    agenda: Option<Vec<String>>,
    organizer: Option<String>,
    tags: Option<Vec<String>>,
}

impl CheckedFields {
    fn check(errors: &mut ValidationErrors, input: &EventInput, presence: Presence) -> Self {
        let text = |errors: &mut ValidationErrors,
                    field: &'static str,
                    label: &str,
                    value: &Option<String>,
                    blank: Option<&str>| {
            if presence == Presence::Optional && value.is_none() {
                return None;
            }
            required_text(errors, field, label, value.as_deref(), blank)
        };
        let list = |errors: &mut ValidationErrors,
                    field: &'static str,
                    label: &str,
                    value: &Option<Vec<String>>| {
            if presence == Presence::Optional && value.is_none() {
                return None;
            }
            non_empty_list(errors, field, label, value.as_deref())
        };

        Self {
            title: text(errors, "title", "Title", &input.title, Some("Title cannot be empty")),
            description: text(
                errors,
                "description",
                "Description",
                &input.description,
                Some("Description cannot be empty"),
            ),
            overview: text(
                errors,
                "overview",
                "Overview",
                &input.overview,
                Some("Overview cannot be empty"),
            ),
            image: text(
                errors,
                "image",
                "Image URL",
                &input.image,
                Some("Image URL cannot be empty"),
            ),
            venue: text(errors, "venue", "Venue", &input.venue, Some("Venue cannot be empty")),
            location: text(
                errors,
                "location",
                "Location",
                &input.location,
                Some("Location cannot be empty"),
            ),
            date: text(errors, "date", "Date", &input.date, None),
            time: text(errors, "time", "Time", &input.time, None),
            mode: check_mode(errors, input.mode.as_deref(), presence),
            audience: text(
                errors,
                "audience",
                "Audience",
                &input.audience,
                Some("Audience cannot be empty"),
            ),
            agenda: list(errors, "agenda", "Agenda", &input.agenda),
            organizer: text(
                errors,
                "organizer",
                "Organizer",
                &input.organizer,
                Some("Organizer cannot be empty"),
            ),
            tags: list(errors, "tags", "Tags", &input.tags),
        }
    }
}

fn check_mode(
    errors: &mut ValidationErrors,
    value: Option<&str>,
    presence: Presence,
) -> Option<EventMode> {
    match value {
        None if presence == Presence::Optional => None,
        None => {
            errors.push("mode", "Mode is required");
            None
        }
        Some(mode) => match mode.parse::<EventMode>() {
            Ok(mode) => Some(mode),
            Err(_) => {
                errors.push("mode", MODE_VALUES_MESSAGE);
                None
            }
        },
    }
}
