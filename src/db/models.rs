//! Database row types for PostgreSQL
//!
//! These types map directly to rows of the `content` table and convert
//! to and from the domain record in models/content.rs

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::{
    Category, ContentKind, ContentRecord, DownloadLink, EpisodeList, Genre, Language,
    SeriesFormat,
};

/// Column list shared by every SELECT on `content`
pub const CONTENT_COLUMNS: &str = "id, title, language, category, genre, year, poster_url, \
     description, file_size, download_links, total_episodes, seasons, current_season, episodes, \
     is_trending, is_featured, is_active, download_count, created_at, version";

/// Content row from database
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub category: String,
    pub genre: Vec<String>,
    pub year: i32,
    pub poster_url: String,
    pub description: String,
    pub file_size: Option<String>,
    pub download_links: Json<Vec<DownloadLink>>,
    pub total_episodes: Option<i32>,
    pub seasons: Option<i32>,
    pub current_season: Option<i32>,
    pub episodes: Json<EpisodeList>,
    pub is_trending: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
    pub version: i64,
}

fn corrupt(id: Uuid, what: &str, value: &str) -> CatalogError {
    CatalogError::Storage(format!("record {} has invalid {}: {}", id, what, value))
}

impl TryFrom<ContentRow> for ContentRecord {
    type Error = CatalogError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let language =
            Language::parse(&row.language).ok_or_else(|| corrupt(id, "language", &row.language))?;
        let category =
            Category::parse(&row.category).ok_or_else(|| corrupt(id, "category", &row.category))?;
        let genre: BTreeSet<Genre> = row
            .genre
            .iter()
            .map(|g| Genre::parse(g).ok_or_else(|| corrupt(id, "genre", g)))
            .collect::<Result<_, _>>()?;

        let count = |what: &str, value: i32| {
            u32::try_from(value).map_err(|_| corrupt(id, what, &value.to_string()))
        };

        let kind = match category {
            Category::Movie => ContentKind::Movie {
                file_size: row.file_size.unwrap_or_default(),
                download_links: row.download_links.0,
            },
            Category::Dubbed => ContentKind::Dubbed {
                download_links: row.download_links.0,
            },
            Category::WebSeries | Category::TvSeries => ContentKind::Series {
                format: if category == Category::WebSeries {
                    SeriesFormat::Web
                } else {
                    SeriesFormat::Tv
                },
                total_episodes: row
                    .total_episodes
                    .map(|n| count("total_episodes", n))
                    .transpose()?,
                seasons: count("seasons", row.seasons.unwrap_or(1))?,
                current_season: count("current_season", row.current_season.unwrap_or(1))?,
                episodes: row.episodes.0,
            },
        };

        Ok(ContentRecord {
            id,
            title: row.title,
            language,
            genre,
            year: row.year,
            poster_url: row.poster_url,
            description: row.description,
            kind,
            is_trending: row.is_trending,
            is_featured: row.is_featured,
            is_active: row.is_active,
            download_count: row.download_count,
            created_at: row.created_at,
            version: row.version,
        })
    }
}

/// Column values of a record ready to bind
#[derive(Debug, Clone)]
pub struct ContentColumns {
    pub file_size: Option<String>,
    pub download_links: Vec<DownloadLink>,
    pub total_episodes: Option<i32>,
    pub seasons: Option<i32>,
    pub current_season: Option<i32>,
    pub episodes: EpisodeList,
    pub genre: Vec<String>,
}

/// Episode and season counts are INTEGER columns
fn column_count(value: u32, field: &str) -> Result<i32, CatalogError> {
    i32::try_from(value).map_err(|_| CatalogError::validation(format!("{} is too large", field)))
}

impl ContentColumns {
    pub fn from_record(record: &ContentRecord) -> Result<Self, CatalogError> {
        let genre = record.genre.iter().map(|g| g.as_str().to_string()).collect();

        let columns = match &record.kind {
            ContentKind::Movie {
                file_size,
                download_links,
            } => ContentColumns {
                file_size: Some(file_size.clone()),
                download_links: download_links.clone(),
                total_episodes: None,
                seasons: None,
                current_season: None,
                episodes: EpisodeList::new(),
                genre,
            },
            ContentKind::Dubbed { download_links } => ContentColumns {
                file_size: None,
                download_links: download_links.clone(),
                total_episodes: None,
                seasons: None,
                current_season: None,
                episodes: EpisodeList::new(),
                genre,
            },
            ContentKind::Series {
                total_episodes,
                seasons,
                current_season,
                episodes,
                ..
            } => ContentColumns {
                file_size: None,
                download_links: Vec::new(),
                total_episodes: total_episodes
                    .map(|n| column_count(n, "totalEpisodes"))
                    .transpose()?,
                seasons: Some(column_count(*seasons, "seasons")?),
                current_season: Some(column_count(*current_season, "currentSeason")?),
                episodes: episodes.clone(),
                genre,
            },
        };

        Ok(columns)
    }
}
