//! Catalog operations
//!
//! Content CRUD, listings and episode management on top of a `ContentStore`.
//! Writes go through normalization first, so nothing reaches the store that
//! breaks the movie/series field rules.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::{ContentStore, ReplaceOutcome};
use crate::error::{CatalogError, Result};
use crate::metrics;
use crate::models::{
    CatalogStats, ContentPayload, ContentRecord, Episode, EpisodeListing, EpisodePatch,
    EpisodePayload, ListParams, ListResponse, MovieSummary, SeriesSummary, StatusFlag, Suggestion,
};
use crate::services::normalize;
use crate::services::query::{build_filter, ListScope, Page};

const RELATED_LIMIT: u64 = 8;
const SUGGESTION_LIMIT: u64 = 8;
const SUGGESTION_MIN_CHARS: usize = 2;
/// Read-modify-write attempts before giving up with a conflict
const WRITE_ATTEMPTS: usize = 5;

/// Parse a path id. Anything that is not a UUID cannot name a record.
fn parse_id(id: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| CatalogError::not_found(what))
}

/// Log a rejected write at warn; storage errors are logged where they are mapped
fn rejected(operation: &str, err: CatalogError) -> CatalogError {
    if !matches!(err, CatalogError::Storage(_)) {
        warn!("{} rejected: {}", operation, err);
    }
    err
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ContentStore>,
    default_limit: u32,
    max_limit: u32,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ContentStore>, default_limit: u32, max_limit: u32) -> Self {
        Self {
            store,
            default_limit,
            max_limit,
        }
    }

    pub async fn ping(&self) -> bool {
        self.store.ping().await
    }

    // ========================================================================
    // Listings
    // ========================================================================

    async fn page_of(&self, params: &ListParams, scope: ListScope) -> Result<(Vec<ContentRecord>, u64, Page)> {
        let filter = build_filter(params, scope);
        let page = Page::from_params(params, self.default_limit, self.max_limit);

        let records = self.store.find(&filter, page.skip(), page.limit).await?;
        let total = self.store.count(&filter).await?;

        Ok((records, total, page))
    }

    /// Public list of active records
    pub async fn list(&self, params: &ListParams) -> Result<ListResponse<MovieSummary>> {
        let (records, total, page) = self.page_of(params, ListScope::Public).await?;

        Ok(ListResponse {
            items: records.iter().map(MovieSummary::from).collect(),
            total,
            page: page.page,
            pages: page.pages(total),
        })
    }

    /// Public list restricted to Web Series and TV Series
    pub async fn list_series(&self, params: &ListParams) -> Result<ListResponse<SeriesSummary>> {
        let (records, total, page) = self.page_of(params, ListScope::Series).await?;

        Ok(ListResponse {
            items: records.iter().map(SeriesSummary::from).collect(),
            total,
            page: page.page,
            pages: page.pages(total),
        })
    }

    /// Admin list: full records, inactive ones included
    pub async fn admin_list(&self, params: &ListParams) -> Result<ListResponse<ContentRecord>> {
        let (records, total, page) = self.page_of(params, ListScope::Admin).await?;

        Ok(ListResponse {
            items: records,
            total,
            page: page.page,
            pages: page.pages(total),
        })
    }

    /// Up to 8 active records sharing the language or a genre with `id`
    pub async fn related(&self, id: &str) -> Result<Vec<MovieSummary>> {
        let record = self.get(id).await?;
        let related = self.store.related(&record, RELATED_LIMIT).await?;

        Ok(related.iter().map(MovieSummary::from).collect())
    }

    /// Title suggestions; queries shorter than 2 characters yield nothing
    pub async fn suggestions(&self, query: Option<&str>) -> Result<Vec<Suggestion>> {
        let query = match query.map(str::trim) {
            Some(q) if q.chars().count() >= SUGGESTION_MIN_CHARS => q,
            _ => return Ok(Vec::new()),
        };

        let records = self.store.suggest(query, SUGGESTION_LIMIT).await?;
        Ok(records.iter().map(Suggestion::from).collect())
    }

    pub async fn category_stats(&self) -> Result<CatalogStats> {
        self.store.category_stats().await
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Raw record, regardless of its active flag
    pub async fn get(&self, id: &str) -> Result<ContentRecord> {
        let id = parse_id(id, "Movie")?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie"))
    }

    /// Record as the public sees it: inactive records are hidden, and so are
    /// inactive episodes
    pub async fn get_public(&self, id: &str) -> Result<ContentRecord> {
        let record = self.get(id).await?;
        if !record.is_active {
            return Err(CatalogError::not_found("Movie"));
        }
        Ok(record.public_view())
    }

    pub async fn create(&self, payload: ContentPayload) -> Result<ContentRecord> {
        let record = normalize::new_record(payload, Utc::now()).map_err(|e| rejected("Create", e))?;

        self.store.insert(&record).await?;
        metrics::CONTENT_CREATED.inc();

        info!(
            "Content created: {} ({}) category={}",
            record.id,
            record.title,
            record.category()
        );

        Ok(record)
    }

    /// Apply an update payload. A rejected update leaves the stored record unchanged.
    pub async fn update(&self, id: &str, payload: ContentPayload) -> Result<ContentRecord> {
        let uuid = parse_id(id, "Content")?;

        let (updated, previous) = self
            .modify(uuid, "Content", |record| {
                let previous = record.category();
                *record = normalize::apply_update(record, payload.clone())?;
                Ok(previous)
            })
            .await
            .map_err(|e| rejected("Update", e))?;

        info!(
            "Content updated: {} category={} (was {})",
            updated.id,
            updated.category(),
            previous
        );

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let uuid = parse_id(id, "Movie")?;

        if !self.store.delete_by_id(uuid).await? {
            return Err(CatalogError::not_found("Movie"));
        }
        metrics::CONTENT_DELETED.inc();

        info!("Content deleted: {}", uuid);
        Ok(())
    }

    /// Add one to the download counter, returning the new count
    pub async fn record_download(&self, id: &str) -> Result<i64> {
        let uuid = parse_id(id, "Movie")?;

        let count = self
            .store
            .increment_downloads(uuid)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie"))?;
        metrics::DOWNLOADS_RECORDED.inc();

        Ok(count)
    }

    pub async fn toggle(&self, id: &str, flag: StatusFlag) -> Result<ContentRecord> {
        let uuid = parse_id(id, "Movie")?;

        let record = self
            .store
            .toggle_flag(uuid, flag)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie"))?;
        metrics::CONTENT_UPDATED.inc();

        info!(
            "Content {} toggled {} -> active={} trending={} featured={}",
            record.id,
            flag.column(),
            record.is_active,
            record.is_trending,
            record.is_featured
        );

        Ok(record)
    }

    /// Read a record, apply `edit` and write it back unless someone else
    /// wrote it in between. A lost race re-reads and re-applies `edit`, so
    /// its checks always run against the latest stored state.
    async fn modify<T, F>(&self, id: Uuid, what: &str, mut edit: F) -> Result<(ContentRecord, T)>
    where
        F: FnMut(&mut ContentRecord) -> Result<T> + Send,
        T: Send,
    {
        for attempt in 1..=WRITE_ATTEMPTS {
            let mut record = self
                .store
                .find_by_id(id)
                .await?
                .ok_or_else(|| CatalogError::not_found(what))?;
            let outcome = edit(&mut record)?;

            match self.store.replace(&record).await? {
                ReplaceOutcome::Replaced => {
                    metrics::CONTENT_UPDATED.inc();
                    record.version += 1;
                    return Ok((record, outcome));
                }
                ReplaceOutcome::Missing => return Err(CatalogError::not_found(what)),
                ReplaceOutcome::Stale => {
                    debug!("Concurrent write to {}, retrying (attempt {})", id, attempt)
                }
            }
        }

        Err(CatalogError::Conflict)
    }

    // ========================================================================
    // Episodes
    // ========================================================================

    /// Load a series for an episode operation
    async fn series(&self, id: &str) -> Result<ContentRecord> {
        let uuid = parse_id(id, "Series")?;
        let record = self
            .store
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| CatalogError::not_found("Series"))?;

        if !record.is_series() {
            return Err(CatalogError::CategoryMismatch);
        }
        Ok(record)
    }

    /// Active episodes of an active series, by episode number
    pub async fn list_active_episodes(&self, id: &str) -> Result<EpisodeListing> {
        let record = self.series(id).await?;
        if !record.is_active {
            return Err(CatalogError::not_found("Series"));
        }

        let episodes: Vec<Episode> = record
            .kind
            .episodes()
            .map(|list| list.active().cloned().collect())
            .unwrap_or_default();

        Ok(EpisodeListing {
            series_title: record.title,
            episodes,
        })
    }

    pub async fn add_episode(&self, id: &str, payload: EpisodePayload) -> Result<Episode> {
        let uuid = parse_id(id, "Series")?;

        let (record, episode) = self
            .modify(uuid, "Series", |record| {
                let episodes = record
                    .kind
                    .episodes_mut()
                    .ok_or(CatalogError::CategoryMismatch)?;

                if let Some(number) = payload.episode_number {
                    if episodes.contains_number(number) {
                        return Err(CatalogError::DuplicateEpisodeNumber(number));
                    }
                }

                let episode = normalize::build_episode(payload.clone())?;
                episodes
                    .insert(episode.clone())
                    .map_err(|taken| CatalogError::DuplicateEpisodeNumber(taken.0))?;
                Ok(episode)
            })
            .await
            .map_err(|e| rejected("Add episode", e))?;

        info!(
            "Episode {} added to {} ({})",
            episode.episode_number, record.id, record.title
        );

        Ok(episode)
    }

    /// Partial update of one episode. Content without episodes has no episode
    /// to find.
    pub async fn update_episode(&self, id: &str, episode_id: &str, patch: EpisodePatch) -> Result<Episode> {
        let uuid = parse_id(id, "Series")?;
        let episode_id = parse_id(episode_id, "Episode")?;

        let (record, updated) = self
            .modify(uuid, "Series", |record| {
                let slot = record
                    .kind
                    .episodes_mut()
                    .and_then(|episodes| episodes.get_mut_by_id(episode_id))
                    .ok_or_else(|| CatalogError::not_found("Episode"))?;

                let updated = normalize::apply_episode_patch(slot, patch.clone())?;
                *slot = updated.clone();
                Ok(updated)
            })
            .await
            .map_err(|e| rejected("Update episode", e))?;

        info!("Episode {} of {} updated", updated.episode_number, record.id);
        Ok(updated)
    }

    /// Remove an episode. Removing one that is not there succeeds, on any
    /// kind of content; removing the only episode of a series is rejected.
    pub async fn delete_episode(&self, id: &str, episode_id: &str) -> Result<()> {
        let uuid = parse_id(id, "Series")?;
        let current = self
            .store
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| CatalogError::not_found("Series"))?;

        let episode_id = match Uuid::parse_str(episode_id.trim()) {
            Ok(uuid) => uuid,
            Err(_) => return Ok(()),
        };
        let present = current
            .kind
            .episodes()
            .is_some_and(|episodes| episodes.get_by_id(episode_id).is_some());
        if !present {
            return Ok(());
        }

        let (record, removed) = self
            .modify(uuid, "Series", |record| {
                let Some(episodes) = record.kind.episodes_mut() else {
                    return Ok(None);
                };
                if episodes.get_by_id(episode_id).is_some() && episodes.len() == 1 {
                    return Err(CatalogError::validation("Series must have at least one episode"));
                }
                Ok(episodes.remove_by_id(episode_id))
            })
            .await
            .map_err(|e| rejected("Delete episode", e))?;

        if let Some(episode) = removed {
            info!("Episode {} removed from {}", episode.episode_number, record.id);
        }
        Ok(())
    }
}
