// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
// Decision: Slug uniqueness is checked under the same write lock as the insert
//
// This implementation mirrors the PostgreSQL repository API backed by in-memory
// HashMaps, allowing the server to run without a database for development and
// tests.

use chrono::{DateTime, Utc};
use devevents_core::{NewBooking, NewEvent, Result, StoreError};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// Name reported for slug collisions, matching the PostgreSQL index
const SLUG_INDEX: &str = "events_slug_key";

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    events: RwLock<HashMap<Uuid, EventRow>>,
    bookings: RwLock<HashMap<Uuid, BookingRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Number of stored events
    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    /// Number of stored bookings
    pub fn booking_count(&self) -> usize {
        self.bookings.read().len()
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: &NewEvent) -> Result<EventRow> {
        let mut events = self.events.write();
        if events.values().any(|e| e.slug == input.slug) {
            return Err(StoreError::DuplicateKey(SLUG_INDEX.to_string()));
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = EventRow {
            id,
            title: input.title.clone(),
            slug: input.slug.clone(),
            description: input.description.clone(),
            overview: input.overview.clone(),
            image: input.image.clone(),
            venue: input.venue.clone(),
            location: input.location.clone(),
            date: input.date.clone(),
            time: input.time.clone(),
            mode: input.mode.as_str().to_string(),
            audience: input.audience.clone(),
            agenda: input.agenda.clone(),
            organizer: input.organizer.clone(),
            tags: input.tags.clone(),
            version: 0,
            created_at: now,
            updated_at: now,
        };
        events.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Option<EventRow>> {
        Ok(self
            .events
            .read()
            .values()
            .find(|e| e.slug == slug)
            .cloned())
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let mut rows: Vec<EventRow> = self.events.read().values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    pub async fn update_event(&self, id: Uuid, input: &NewEvent) -> Result<Option<EventRow>> {
        let mut events = self.events.write();
        if events
            .values()
            .any(|e| e.id != id && e.slug == input.slug)
        {
            return Err(StoreError::DuplicateKey(SLUG_INDEX.to_string()));
        }

        let Some(row) = events.get_mut(&id) else {
            return Ok(None);
        };
        row.title = input.title.clone();
        row.slug = input.slug.clone();
        row.description = input.description.clone();
        row.overview = input.overview.clone();
        row.image = input.image.clone();
        row.venue = input.venue.clone();
        row.location = input.location.clone();
        row.date = input.date.clone();
        row.time = input.time.clone();
        row.mode = input.mode.as_str().to_string();
        row.audience = input.audience.clone();
        row.agenda = input.agenda.clone();
        row.organizer = input.organizer.clone();
        row.tags = input.tags.clone();
        row.version += 1;
        row.updated_at = Self::now();
        Ok(Some(row.clone()))
    }

    // ============================================
    // Bookings
    // ============================================

    pub async fn create_booking(&self, input: &NewBooking) -> Result<BookingRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = BookingRow {
            id,
            event_id: input.event_id,
            email: input.email.clone(),
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.bookings.write().insert(id, row.clone());
        Ok(row)
    }
}
