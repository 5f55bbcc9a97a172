//! Catalog record types
//!
//! A record is either a Movie, a Dubbed release, or a Series. The category
//! is derived from the variant, so fields that only make sense for one kind
//! cannot exist on another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::episode::{Episode, EpisodeList};

// ============================================================================
// Enumerations
// ============================================================================

/// Release language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    Telugu,
    Tamil,
    Hindi,
    English,
    Kannada,
    Malayalam,
    Dubbed,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::Telugu,
        Language::Tamil,
        Language::Hindi,
        Language::English,
        Language::Kannada,
        Language::Malayalam,
        Language::Dubbed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Telugu => "Telugu",
            Language::Tamil => "Tamil",
            Language::Hindi => "Hindi",
            Language::English => "English",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Dubbed => "Dubbed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// Category discriminator as exposed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Movie,
    #[serde(rename = "Web Series")]
    WebSeries,
    #[serde(rename = "TV Series")]
    TvSeries,
    Dubbed,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Movie,
        Category::WebSeries,
        Category::TvSeries,
        Category::Dubbed,
    ];

    pub const SERIES: [Category; 2] = [Category::WebSeries, Category::TvSeries];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "Movie",
            Category::WebSeries => "Web Series",
            Category::TvSeries => "TV Series",
            Category::Dubbed => "Dubbed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn is_series(&self) -> bool {
        matches!(self, Category::WebSeries | Category::TvSeries)
    }
}

/// Genre tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Romance,
    Thriller,
    Horror,
    Drama,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Adventure,
    Crime,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Romance,
        Genre::Thriller,
        Genre::Horror,
        Genre::Drama,
        Genre::SciFi,
        Genre::Adventure,
        Genre::Crime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Adventure => "Adventure",
            Genre::Crime => "Crime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

/// Download quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "480p")]
    Sd480,
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "4K")]
    Uhd4k,
}

impl Quality {
    pub const ALL: [Quality; 4] = [
        Quality::Sd480,
        Quality::Hd720,
        Quality::FullHd1080,
        Quality::Uhd4k,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Sd480 => "480p",
            Quality::Hd720 => "720p",
            Quality::FullHd1080 => "1080p",
            Quality::Uhd4k => "4K",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s)
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(Language, Category, Genre, Quality);

// ============================================================================
// Record
// ============================================================================

/// Quality/url pair. The url is stored already rewritten to direct-download form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub quality: Quality,
    pub url: String,
}

/// Which series category a series record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Web,
    Tv,
}

/// Category-specific payload of a record
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Movie {
        file_size: String,
        download_links: Vec<DownloadLink>,
    },
    Dubbed {
        download_links: Vec<DownloadLink>,
    },
    Series {
        format: SeriesFormat,
        total_episodes: Option<u32>,
        seasons: u32,
        current_season: u32,
        episodes: EpisodeList,
    },
}

impl ContentKind {
    pub fn category(&self) -> Category {
        match self {
            ContentKind::Movie { .. } => Category::Movie,
            ContentKind::Dubbed { .. } => Category::Dubbed,
            ContentKind::Series { format: SeriesFormat::Web, .. } => Category::WebSeries,
            ContentKind::Series { format: SeriesFormat::Tv, .. } => Category::TvSeries,
        }
    }

    /// Top-level download links (never present on series)
    pub fn download_links(&self) -> Option<&[DownloadLink]> {
        match self {
            ContentKind::Movie { download_links, .. } | ContentKind::Dubbed { download_links } => {
                Some(download_links)
            }
            ContentKind::Series { .. } => None,
        }
    }

    pub fn episodes(&self) -> Option<&EpisodeList> {
        match self {
            ContentKind::Series { episodes, .. } => Some(episodes),
            _ => None,
        }
    }

    pub fn episodes_mut(&mut self) -> Option<&mut EpisodeList> {
        match self {
            ContentKind::Series { episodes, .. } => Some(episodes),
            _ => None,
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ContentView")]
pub struct ContentRecord {
    pub id: Uuid,
    pub title: String,
    pub language: Language,
    pub genre: BTreeSet<Genre>,
    pub year: i32,
    pub poster_url: String,
    pub description: String,
    pub kind: ContentKind,
    pub is_trending: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
    /// Write counter used to detect concurrent modification; never serialized
    pub version: i64,
}

impl ContentRecord {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn is_series(&self) -> bool {
        self.category().is_series()
    }

    /// Copy of the record with inactive episodes removed, for public responses
    pub fn public_view(&self) -> ContentRecord {
        let mut record = self.clone();
        if let Some(episodes) = record.kind.episodes_mut() {
            episodes.retain_active();
        }
        record
    }
}

/// Wire shape of a record, matching the flat document layout clients expect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_links: Option<Vec<DownloadLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<Episode>>,
    pub is_trending: bool,
    pub is_featured: bool,
    pub is_active: bool,
    pub download_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ContentRecord> for ContentView {
    fn from(record: ContentRecord) -> Self {
        let category = record.category();

        let mut view = ContentView {
            id: record.id,
            title: record.title,
            language: record.language,
            category,
            genre: record.genre.into_iter().collect(),
            year: record.year,
            poster_url: record.poster_url,
            description: record.description,
            file_size: None,
            download_links: None,
            total_episodes: None,
            seasons: None,
            current_season: None,
            episodes: None,
            is_trending: record.is_trending,
            is_featured: record.is_featured,
            is_active: record.is_active,
            download_count: record.download_count,
            created_at: record.created_at,
        };

        match record.kind {
            ContentKind::Movie {
                file_size,
                download_links,
            } => {
                view.file_size = Some(file_size);
                view.download_links = Some(download_links);
            }
            ContentKind::Dubbed { download_links } => {
                view.download_links = Some(download_links);
            }
            ContentKind::Series {
                total_episodes,
                seasons,
                current_season,
                episodes,
                ..
            } => {
                view.total_episodes = total_episodes;
                view.seasons = Some(seasons);
                view.current_season = Some(current_season);
                view.episodes = Some(episodes.into_vec());
            }
        }

        view
    }
}
