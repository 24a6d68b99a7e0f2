// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use devevents_core::{NewBooking, NewEvent, Result};
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Short name for logs and the health probe
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Release the underlying connections. A no-op for the in-memory store.
    pub async fn close(&self) {
        match self {
            Self::Postgres(db) => db.close().await,
            Self::InMemory(_) => {}
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: &NewEvent) -> Result<EventRow> {
        match self {
            Self::Postgres(db) => db.create_event(input).await,
            Self::InMemory(db) => db.create_event(input).await,
        }
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_event(id).await,
            Self::InMemory(db) => db.get_event(id).await,
        }
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_event_by_slug(slug).await,
            Self::InMemory(db) => db.get_event_by_slug(slug).await,
        }
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.list_events().await,
            Self::InMemory(db) => db.list_events().await,
        }
    }

    pub async fn update_event(&self, id: Uuid, input: &NewEvent) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.update_event(id, input).await,
            Self::InMemory(db) => db.update_event(id, input).await,
        }
    }

    // ============================================
    // Bookings
    // ============================================

    pub async fn create_booking(&self, input: &NewBooking) -> Result<BookingRow> {
        match self {
            Self::Postgres(db) => db.create_booking(input).await,
            Self::InMemory(db) => db.create_booking(input).await,
        }
    }
}
