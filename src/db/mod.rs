//! Database module
//!
//! Storage for catalog records behind the `ContentStore` trait:
//! - PostgreSQL via sqlx (pool management, row types, repository)
//! - In-memory store for local runs and tests

pub mod memory;
pub mod models;
pub mod pool;
pub mod repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CatalogStats, ContentFilter, ContentRecord, StatusFlag};

// Re-export commonly used items
pub use memory::MemoryContentStore;
pub use pool::{create_pool, health_check, run_migrations};
pub use repository::PgContentStore;

/// Outcome of a conditional whole-record write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
    /// The stored version moved on since the record was read
    Stale,
    Missing,
}

/// Persistence collaborator for catalog records.
///
/// Each call is a single storage round trip. Whole-record writes are
/// conditional on the version the caller read, and every write that changes
/// a mutable field bumps that version.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Records matching `filter`, newest first
    async fn find(&self, filter: &ContentFilter, skip: u64, limit: u64) -> Result<Vec<ContentRecord>>;

    async fn count(&self, filter: &ContentFilter) -> Result<u64>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>>;

    async fn insert(&self, record: &ContentRecord) -> Result<()>;

    /// Overwrite a stored record as a whole, only if its stored version still
    /// equals `record.version`
    async fn replace(&self, record: &ContentRecord) -> Result<ReplaceOutcome>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;

    /// Atomically add one to the download counter, returning the new value
    async fn increment_downloads(&self, id: Uuid) -> Result<Option<i64>>;

    /// Atomically flip a boolean flag and bump the version, returning the
    /// updated record
    async fn toggle_flag(&self, id: Uuid, flag: StatusFlag) -> Result<Option<ContentRecord>>;

    /// Active records sharing the language or any genre with `record`
    async fn related(&self, record: &ContentRecord, limit: u64) -> Result<Vec<ContentRecord>>;

    /// Active records whose title contains `query` (case-insensitive)
    async fn suggest(&self, query: &str, limit: u64) -> Result<Vec<ContentRecord>>;

    async fn category_stats(&self) -> Result<CatalogStats>;

    async fn ping(&self) -> bool;
}
