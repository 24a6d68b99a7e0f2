// Booking service
//
// The referenced event is looked up right before the insert. The lookup and
// the insert are two separate store calls with nothing tying them together:
// an event removed in between would leave a dangling booking.

use crate::storage::StorageBackend;
use devevents_core::{Booking, BookingInput, Result, StoreError};

pub struct BookingService {
    db: StorageBackend,
}

impl BookingService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: BookingInput) -> Result<Booking> {
        let new_booking = input.validate()?;

        if self.db.get_event(new_booking.event_id).await?.is_none() {
            tracing::warn!(event.id = %new_booking.event_id, "Booking references unknown event");
            return Err(StoreError::MissingReference(new_booking.event_id));
        }

        let row = self.db.create_booking(&new_booking).await?;
        tracing::info!(booking.id = %row.id, event.id = %row.event_id, "Booking created");
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDatabase;
    use devevents_core::{EventMode, NewEvent};
    use std::sync::Arc;
    use uuid::Uuid;

    async fn seeded() -> (BookingService, Arc<InMemoryDatabase>, Uuid) {
        let db = Arc::new(InMemoryDatabase::new());
        let event = db
            .create_event(&NewEvent {
                title: "RustConf".to_string(),
                slug: "rustconf".to_string(),
                description: "d".to_string(),
                overview: "o".to_string(),
                image: "https://example.com/a.png".to_string(),
                venue: "v".to_string(),
                location: "l".to_string(),
                date: "2025-09-02".to_string(),
                time: "09:00".to_string(),
                mode: EventMode::Offline,
                audience: "a".to_string(),
                agenda: vec!["Talks".to_string()],
                organizer: "org".to_string(),
                tags: vec!["rust".to_string()],
            })
            .await
            .unwrap();
        (
            BookingService::new(StorageBackend::InMemory(db.clone())),
            db,
            event.id,
        )
    }

    #[tokio::test]
    async fn test_create_booking_normalizes_email() {
        let (service, db, event_id) = seeded().await;
        let booking = service
            .create(BookingInput {
                event_id: Some(event_id.to_string()),
                email: Some(" Ada@Example.com ".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(booking.event_id, event_id);
        assert_eq!(booking.email, "ada@example.com");
        assert_eq!(db.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_event_inserts_nothing() {
        let (service, db, _) = seeded().await;
        let missing = Uuid::now_v7();
        let err = service
            .create(BookingInput {
                event_id: Some(missing.to_string()),
                email: Some("ada@example.com".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference(id) if id == missing));
        assert_eq!(
            err.to_string(),
            format!("Event with ID {} does not exist", missing)
        );
        assert_eq!(db.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_lookup() {
        let (service, db, event_id) = seeded().await;
        let err = service
            .create(BookingInput {
                event_id: Some(event_id.to_string()),
                email: Some("not-an-email".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(db.booking_count(), 0);
    }
}
