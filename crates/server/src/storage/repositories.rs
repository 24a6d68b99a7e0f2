// Repository layer for PostgreSQL
// Decision: Raw SQL via sqlx::query_as, no compile-time checked macros
// (no DATABASE_URL at build time)
// Decision: Driver errors are classified here into StoreError; nothing above sees sqlx::Error

use devevents_core::{NewBooking, NewEvent, Result, StoreError};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

const EVENT_COLUMNS: &str = "id, title, slug, description, overview, image, venue, location, \
     date, time, mode, audience, agenda, organizer, tags, version, created_at, updated_at";

const BOOKING_COLUMNS: &str = "id, event_id, email, version, created_at, updated_at";

/// Pool settings for [`Database::connect`]
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
        }
    }
}

/// Reduce a driver error to the store taxonomy
pub fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateKey(db_err.constraint().unwrap_or("unique").to_string())
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::connection(err.to_string()),
        sqlx::Error::Configuration(_) => StoreError::config(err.to_string()),
        _ => StoreError::unknown(err.to_string()),
    }
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool against `database_url` and apply pending migrations
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(database_url)
            .await
            .map_err(classify_sqlx_error)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::unknown(format!("migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: &NewEvent) -> Result<EventRow> {
        let sql = format!(
            r#"
            INSERT INTO events (id, title, slug, description, overview, image, venue, location,
                                date, time, mode, audience, agenda, organizer, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {EVENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.overview)
            .bind(&input.image)
            .bind(&input.venue)
            .bind(&input.location)
            .bind(&input.date)
            .bind(&input.time)
            .bind(input.mode.as_str())
            .bind(&input.audience)
            .bind(&input.agenda)
            .bind(&input.organizer)
            .bind(&input.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Option<EventRow>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1");
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    /// Overwrite every mutable column and bump the version counter
    pub async fn update_event(&self, id: Uuid, input: &NewEvent) -> Result<Option<EventRow>> {
        let sql = format!(
            r#"
            UPDATE events
            SET
                title = $2,
                slug = $3,
                description = $4,
                overview = $5,
                image = $6,
                venue = $7,
                location = $8,
                date = $9,
                time = $10,
                mode = $11,
                audience = $12,
                agenda = $13,
                organizer = $14,
                tags = $15,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.overview)
            .bind(&input.image)
            .bind(&input.venue)
            .bind(&input.location)
            .bind(&input.date)
            .bind(&input.time)
            .bind(input.mode.as_str())
            .bind(&input.audience)
            .bind(&input.agenda)
            .bind(&input.organizer)
            .bind(&input.tags)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    // ============================================
    // Bookings
    // ============================================

    pub async fn create_booking(&self, input: &NewBooking) -> Result<BookingRow> {
        let sql = format!(
            r#"
            INSERT INTO bookings (id, event_id, email)
            VALUES ($1, $2, $3)
            RETURNING {BOOKING_COLUMNS}
            "#
        );
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(input.event_id)
            .bind(&input.email)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}
