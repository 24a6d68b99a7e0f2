// Database models (internal, may differ from public DTOs)
//
// Rows carry the write counter (`version`); conversion to the public types
// drops it.

use chrono::{DateTime, Utc};
use devevents_core::{Booking, Event, EventMode, StoreError};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Events
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub overview: String,
    pub image: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRow {
    /// Convert to the public record. Fails only if the stored mode is not one
    /// of the known values, which the table's CHECK constraint rules out.
    pub fn into_event(self) -> Result<Event, StoreError> {
        let mode: EventMode = self.mode.parse().map_err(StoreError::unknown)?;
        Ok(Event {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            overview: self.overview,
            image: self.image,
            venue: self.venue,
            location: self.location,
            date: self.date,
            time: self.time,
            mode,
            audience: self.audience,
            agenda: self.agenda,
            organizer: self.organizer,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ============================================
// Bookings
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            event_id: row.event_id,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(mode: &str) -> EventRow {
        let now = Utc::now();
        EventRow {
            id: Uuid::now_v7(),
            title: "RustConf".to_string(),
            slug: "rustconf".to_string(),
            description: "d".to_string(),
            overview: "o".to_string(),
            image: "https://example.com/a.png".to_string(),
            venue: "v".to_string(),
            location: "l".to_string(),
            date: "2025-09-02".to_string(),
            time: "09:00".to_string(),
            mode: mode.to_string(),
            audience: "a".to_string(),
            agenda: vec!["Keynote".to_string()],
            organizer: "org".to_string(),
            tags: vec!["rust".to_string()],
            version: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_into_event_drops_version() {
        let event = sample_row("hybrid").into_event().unwrap();
        assert_eq!(event.mode, EventMode::Hybrid);
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("version").is_none());
        assert_eq!(json["slug"], "rustconf");
    }

    #[test]
    fn test_into_event_rejects_unknown_mode() {
        let err = sample_row("virtual").into_event().unwrap_err();
        assert!(matches!(err, StoreError::Unknown(_)));
    }
}
