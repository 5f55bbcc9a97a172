//! Listing filters and the projected shapes returned by list endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::content::{Category, ContentKind, ContentRecord, Genre, Language};
use super::episode::Episode;

// ============================================================================
// Filter
// ============================================================================

/// Storage-level predicate over records.
///
/// Text fields are compared literally against the canonical enum strings, so
/// an unknown value simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFilter {
    /// `Some(b)` keeps only records with `is_active == b`
    pub is_active: Option<bool>,
    pub language: Option<String>,
    /// Empty means any category
    pub categories: Vec<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub trending_only: bool,
    pub featured_only: bool,
    /// Case-insensitive substring on title or description
    pub search: Option<String>,
    /// Set when a filter value could not be interpreted (e.g. a non-numeric year)
    pub match_nothing: bool,
}

impl ContentFilter {
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        if self.match_nothing {
            return false;
        }
        if let Some(active) = self.is_active {
            if record.is_active != active {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if record.language.as_str() != language {
                return false;
            }
        }
        if !self.categories.is_empty()
            && !self
                .categories
                .iter()
                .any(|c| c == record.category().as_str())
        {
            return false;
        }
        if let Some(genre) = &self.genre {
            if !record.genre.iter().any(|g| g.as_str() == genre) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        if self.trending_only && !record.is_trending {
            return false;
        }
        if self.featured_only && !record.is_featured {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !record.title.to_lowercase().contains(&needle)
                && !record.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Boolean flags flipped by the toggle endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFlag {
    Active,
    Trending,
    Featured,
}

impl StatusFlag {
    pub fn column(&self) -> &'static str {
        match self {
            StatusFlag::Active => "is_active",
            StatusFlag::Trending => "is_trending",
            StatusFlag::Featured => "is_featured",
        }
    }

    pub fn toggle(&self, record: &mut ContentRecord) {
        match self {
            StatusFlag::Active => record.is_active = !record.is_active,
            StatusFlag::Trending => record.is_trending = !record.is_trending,
            StatusFlag::Featured => record.is_featured = !record.is_featured,
        }
    }
}

// ============================================================================
// Request params
// ============================================================================

/// Query string of the list endpoints. Kept as raw strings so malformed
/// values degrade to "matches nothing" instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub language: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub is_trending: Option<String>,
    pub is_featured: Option<String>,
    pub is_active: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// Query string of the search suggestion endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionParams {
    pub q: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Paginated list response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

/// Row of the public movie list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub language: Language,
    pub category: Category,
    pub genre: Vec<Genre>,
    pub year: i32,
    pub poster_url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    pub download_count: i64,
    pub is_trending: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ContentRecord> for MovieSummary {
    fn from(record: &ContentRecord) -> Self {
        let file_size = match &record.kind {
            ContentKind::Movie { file_size, .. } => Some(file_size.clone()),
            _ => None,
        };

        MovieSummary {
            id: record.id,
            title: record.title.clone(),
            language: record.language,
            category: record.category(),
            genre: record.genre.iter().copied().collect(),
            year: record.year,
            poster_url: record.poster_url.clone(),
            description: record.description.clone(),
            file_size,
            download_count: record.download_count,
            is_trending: record.is_trending,
            is_featured: record.is_featured,
            created_at: record.created_at,
        }
    }
}

/// Row of the public series list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub id: Uuid,
    pub title: String,
    pub language: Language,
    pub category: Category,
    pub genre: Vec<Genre>,
    pub year: i32,
    pub poster_url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    pub is_trending: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ContentRecord> for SeriesSummary {
    fn from(record: &ContentRecord) -> Self {
        let (total_episodes, seasons) = match &record.kind {
            ContentKind::Series {
                total_episodes,
                seasons,
                ..
            } => (*total_episodes, Some(*seasons)),
            _ => (None, None),
        };

        SeriesSummary {
            id: record.id,
            title: record.title.clone(),
            language: record.language,
            category: record.category(),
            genre: record.genre.iter().copied().collect(),
            year: record.year,
            poster_url: record.poster_url.clone(),
            description: record.description.clone(),
            total_episodes,
            seasons,
            is_trending: record.is_trending,
            is_featured: record.is_featured,
            created_at: record.created_at,
        }
    }
}

/// Search suggestion entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Uuid,
    pub title: String,
    pub poster_url: String,
    pub language: Language,
    pub year: i32,
}

impl From<&ContentRecord> for Suggestion {
    fn from(record: &ContentRecord) -> Self {
        Suggestion {
            id: record.id,
            title: record.title.clone(),
            poster_url: record.poster_url.clone(),
            language: record.language,
            year: record.year,
        }
    }
}

/// Public episode listing of a series
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeListing {
    pub series_title: String,
    pub episodes: Vec<Episode>,
}

/// Aggregate counts over active records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: u64,
    pub total_downloads: i64,
    pub by_category: BTreeMap<String, u64>,
    pub by_language: BTreeMap<String, u64>,
}
