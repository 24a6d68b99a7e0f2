// Storage layer for the DevEvents server
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - models: row types and their conversion to public records
// - repositories: PostgreSQL queries
// - memory: in-memory database with the same API
// - backend: enum dispatch over the two
// - gateway: lazily opened, cached backend shared by all handlers

pub mod backend;
pub mod gateway;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use gateway::PersistenceGateway;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
