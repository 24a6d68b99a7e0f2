// Event service for business logic
//
// Every write validates the submitted fields, runs the pre-persist step once
// with the set of touched fields, then writes. Slug collisions surface from
// the store as StoreError::DuplicateKey.

use crate::storage::StorageBackend;
use devevents_core::{Event, EventInput, Result, TouchedFields};
use tracing::Instrument;

pub struct EventService {
    db: StorageBackend,
}

impl EventService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: EventInput) -> Result<Event> {
        let span = tracing::info_span!(
            "create_event",
            title = input.title.as_deref().unwrap_or(""),
            event.id = tracing::field::Empty,
            event.slug = tracing::field::Empty,
        );
        self.create_inner(input).instrument(span).await
    }

    async fn create_inner(&self, input: EventInput) -> Result<Event> {
        let new_event = input.validate()?.prepare(TouchedFields::all());
        let row = self.db.create_event(&new_event).await?;

        let span = tracing::Span::current();
        span.record("event.id", row.id.to_string().as_str());
        span.record("event.slug", row.slug.as_str());
        tracing::info!(backend = self.db.kind(), "Event created");

        row.into_event()
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let rows = self.db.list_events().await?;
        rows.into_iter().map(|row| row.into_event()).collect()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        self.db
            .get_event_by_slug(slug)
            .await?
            .map(|row| row.into_event())
            .transpose()
    }

    /// Apply a partial update. Returns `None` if no event has this slug.
    ///
    /// An update that carries no fields leaves the record untouched.
    pub async fn update(&self, slug: &str, input: EventInput) -> Result<Option<Event>> {
        let Some(row) = self.db.get_event_by_slug(slug).await? else {
            return Ok(None);
        };
        let id = row.id;
        let current = row.into_event()?;

        if input.is_empty() {
            return Ok(Some(current));
        }

        let (draft, touched) = current.apply_update(&input)?;
        let new_event = draft.prepare(touched);
        let Some(updated) = self.db.update_event(id, &new_event).await? else {
            return Ok(None);
        };

        tracing::info!(
            event.id = %updated.id,
            event.slug = %updated.slug,
            version = updated.version,
            "Event updated"
        );
        updated.into_event().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDatabase;
    use devevents_core::{EventMode, StoreError};
    use std::sync::Arc;

    fn input(title: &str) -> EventInput {
        EventInput {
            title: Some(title.to_string()),
            description: Some("Three days of talks".to_string()),
            overview: Some("The flagship conference".to_string()),
            image: Some("https://example.com/event.png".to_string()),
            venue: Some("Moscone Center".to_string()),
            location: Some("San Francisco, CA".to_string()),
            date: Some("2025-11-07".to_string()),
            time: Some("09:00   AM".to_string()),
            mode: Some("hybrid".to_string()),
            audience: Some("Developers".to_string()),
            agenda: Some(vec!["Keynote".to_string(), "Workshops".to_string()]),
            organizer: Some("CNCF".to_string()),
            tags: Some(vec!["cloud".to_string()]),
        }
    }

    fn service() -> (EventService, Arc<InMemoryDatabase>) {
        let db = Arc::new(InMemoryDatabase::new());
        (
            EventService::new(StorageBackend::InMemory(db.clone())),
            db,
        )
    }

    #[tokio::test]
    async fn test_create_runs_pre_persist_step() {
        let (service, _) = service();
        let event = service
            .create(input("KubeCon + CloudNativeCon Europe 2026"))
            .await
            .unwrap();
        assert_eq!(event.slug, "kubecon-cloudnativecon-europe-2026");
        assert_eq!(event.time, "09:00 AM");
        assert_eq!(event.date, "2025-11-07");
        assert_eq!(event.mode, EventMode::Hybrid);
    }

    #[tokio::test]
    async fn test_create_duplicate_title() {
        let (service, db) = service();
        service.create(input("RustConf")).await.unwrap();
        let err = service.create(input("RustConf")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(db.event_count(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_input_writes_nothing() {
        let (service, db) = service();
        let mut bad = input("RustConf");
        bad.agenda = None;
        let err = service.create(bad).await.unwrap_err();
        let StoreError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors
            .messages()
            .contains(&"Agenda must contain at least one item".to_string()));
        assert_eq!(db.event_count(), 0);
    }

    #[tokio::test]
    async fn test_update_title_regenerates_slug() {
        let (service, _) = service();
        service.create(input("RustConf")).await.unwrap();

        let update = EventInput {
            title: Some("RustConf 2026".to_string()),
            ..Default::default()
        };
        let updated = service.update("rustconf", update).await.unwrap().unwrap();
        assert_eq!(updated.slug, "rustconf-2026");
        assert!(service.get_by_slug("rustconf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_time_keeps_slug() {
        let (service, db) = service();
        service.create(input("RustConf")).await.unwrap();

        let update = EventInput {
            time: Some("  10:30    AM ".to_string()),
            ..Default::default()
        };
        let updated = service.update("rustconf", update).await.unwrap().unwrap();
        assert_eq!(updated.slug, "rustconf");
        assert_eq!(updated.time, "10:30 AM");

        let row = db.get_event_by_slug("rustconf").await.unwrap().unwrap();
        assert_eq!(row.version, 1);
    }

    #[tokio::test]
    async fn test_update_missing_slug() {
        let (service, _) = service();
        let update = EventInput {
            title: Some("Anything".to_string()),
            ..Default::default()
        };
        assert!(service.update("missing", update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (service, _) = service();
        service.create(input("First")).await.unwrap();
        service.create(input("Second")).await.unwrap();

        let slugs: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.slug)
            .collect();
        assert_eq!(slugs, vec!["second", "first"]);
    }
}
