//! In-memory content store
//!
//! Same semantics as the PostgreSQL repository, without durability.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{ContentStore, ReplaceOutcome};
use crate::error::{CatalogError, Result};
use crate::models::{CatalogStats, ContentFilter, ContentRecord, StatusFlag};

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, (u64, ContentRecord)>,
    next_seq: u64,
}

impl Inner {
    /// Matching records, newest first. Insertion order breaks timestamp ties.
    fn sorted<'a>(&'a self, predicate: impl Fn(&ContentRecord) -> bool) -> Vec<&'a ContentRecord> {
        let mut matches: Vec<&(u64, ContentRecord)> =
            self.records.values().filter(|(_, r)| predicate(r)).collect();
        matches.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        matches.into_iter().map(|(_, r)| r).collect()
    }
}

#[derive(Default)]
pub struct MemoryContentStore {
    inner: RwLock<Inner>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find(&self, filter: &ContentFilter, skip: u64, limit: u64) -> Result<Vec<ContentRecord>> {
        let inner = self.inner.read();
        Ok(inner
            .sorted(|r| filter.matches(r))
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ContentFilter) -> Result<u64> {
        let inner = self.inner.read();
        Ok(inner
            .records
            .values()
            .filter(|(_, r)| filter.matches(r))
            .count() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>> {
        Ok(self.inner.read().records.get(&id).map(|(_, r)| r.clone()))
    }

    async fn insert(&self, record: &ContentRecord) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.records.contains_key(&record.id) {
            return Err(CatalogError::Storage(format!("duplicate id {}", record.id)));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(record.id, (seq, record.clone()));
        Ok(())
    }

    async fn replace(&self, record: &ContentRecord) -> Result<ReplaceOutcome> {
        let mut inner = self.inner.write();
        let Some((_, stored)) = inner.records.get_mut(&record.id) else {
            return Ok(ReplaceOutcome::Missing);
        };
        if stored.version != record.version {
            return Ok(ReplaceOutcome::Stale);
        }

        let download_count = stored.download_count;
        let created_at = stored.created_at;
        *stored = record.clone();
        stored.download_count = download_count;
        stored.created_at = created_at;
        stored.version = record.version + 1;
        Ok(ReplaceOutcome::Replaced)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        Ok(self.inner.write().records.remove(&id).is_some())
    }

    async fn increment_downloads(&self, id: Uuid) -> Result<Option<i64>> {
        let mut inner = self.inner.write();
        Ok(inner.records.get_mut(&id).map(|(_, r)| {
            r.download_count += 1;
            r.download_count
        }))
    }

    async fn toggle_flag(&self, id: Uuid, flag: StatusFlag) -> Result<Option<ContentRecord>> {
        let mut inner = self.inner.write();
        Ok(inner.records.get_mut(&id).map(|(_, r)| {
            flag.toggle(r);
            r.version += 1;
            r.clone()
        }))
    }

    async fn related(&self, record: &ContentRecord, limit: u64) -> Result<Vec<ContentRecord>> {
        let inner = self.inner.read();
        Ok(inner
            .sorted(|r| {
                r.is_active
                    && r.id != record.id
                    && (r.language == record.language || r.genre.iter().any(|g| record.genre.contains(g)))
            })
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn suggest(&self, query: &str, limit: u64) -> Result<Vec<ContentRecord>> {
        let needle = query.to_lowercase();
        let inner = self.inner.read();
        Ok(inner
            .sorted(|r| r.is_active && r.title.to_lowercase().contains(&needle))
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn category_stats(&self) -> Result<CatalogStats> {
        let inner = self.inner.read();
        let mut stats = CatalogStats::default();

        for (_, record) in inner.records.values().filter(|(_, r)| r.is_active) {
            stats.total += 1;
            stats.total_downloads += record.download_count;
            *stats
                .by_category
                .entry(record.category().as_str().to_string())
                .or_default() += 1;
            *stats
                .by_language
                .entry(record.language.as_str().to_string())
                .or_default() += 1;
        }

        Ok(stats)
    }

    async fn ping(&self) -> bool {
        true
    }
}
