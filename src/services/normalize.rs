//! Write-time normalization
//!
//! Turns loosely typed admin payloads into well-formed records:
//! - drops fields that do not apply to the target category
//! - validates required fields
//! - rewrites cloud share links into direct-download links

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::models::{
    Category, ContentKind, ContentPayload, ContentRecord, DownloadLink, Episode, EpisodeList,
    EpisodePatch, EpisodePayload, Genre, Language, LinkPayload, Quality, SeriesFormat,
};

lazy_static! {
    // https://drive.google.com/file/d/<id>/view?usp=sharing
    static ref DRIVE_FILE_PATH: Regex =
        Regex::new(r"^https?://drive\.google\.com/file/d/([A-Za-z0-9_-]+)").unwrap();
    // https://drive.google.com/open?id=<id>
    static ref DRIVE_OPEN: Regex =
        Regex::new(r"^https?://drive\.google\.com/open\?(?:[^#]*&)?id=([A-Za-z0-9_-]+)").unwrap();
    // https://drive.google.com/uc?id=<id>&export=download (already direct, canonicalized)
    static ref DRIVE_UC: Regex =
        Regex::new(r"^https?://drive\.google\.com/uc\?(?:[^#]*&)?id=([A-Za-z0-9_-]+)").unwrap();
}

const DRIVE_DIRECT_PREFIX: &str = "https://drive.google.com/uc?export=download&id=";

/// Rewrite a Google Drive share link into its direct-download form.
///
/// Unrecognized URLs are returned unchanged. Applying this to its own output
/// yields the same URL.
pub fn convert_drive_link(url: &str) -> String {
    let trimmed = url.trim();

    for pattern in [&*DRIVE_FILE_PATH, &*DRIVE_OPEN, &*DRIVE_UC] {
        if let Some(caps) = pattern.captures(trimmed) {
            return format!("{}{}", DRIVE_DIRECT_PREFIX, &caps[1]);
        }
    }

    trimmed.to_string()
}

// ============================================================================
// Field parsing
// ============================================================================

fn required_text(value: Option<String>, field: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CatalogError::validation(format!("{} is required", field))),
    }
}

/// `None` stays `None`; a provided value must be non-blank
fn optional_text(value: Option<String>, field: &str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => required_text(Some(v), field).map(Some),
    }
}

fn parse_language(value: &str) -> Result<Language> {
    Language::parse(value)
        .ok_or_else(|| CatalogError::validation(format!("Invalid language: {}", value)))
}

fn parse_category(value: &str) -> Result<Category> {
    Category::parse(value)
        .ok_or_else(|| CatalogError::validation(format!("Invalid category: {}", value)))
}

fn parse_genres(values: Vec<String>) -> Result<BTreeSet<Genre>> {
    let genres = values
        .iter()
        .map(|g| {
            Genre::parse(g).ok_or_else(|| CatalogError::validation(format!("Invalid genre: {}", g)))
        })
        .collect::<Result<BTreeSet<_>>>()?;

    if genres.is_empty() {
        return Err(CatalogError::validation("At least one genre is required"));
    }
    Ok(genres)
}

fn parse_air_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| CatalogError::validation(format!("Invalid airDate: {}", value)))
}

fn optional_air_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_air_date(&v).map(Some),
        _ => Ok(None),
    }
}

/// Validate qualities and rewrite every url
pub fn normalize_links(links: Vec<LinkPayload>) -> Result<Vec<DownloadLink>> {
    links
        .into_iter()
        .map(|link| {
            let quality = Quality::parse(link.quality.trim()).ok_or_else(|| {
                CatalogError::validation(format!("Invalid quality: {}", link.quality))
            })?;
            let url = link.url.trim();
            if url.is_empty() {
                return Err(CatalogError::validation("Download link url is required"));
            }
            Ok(DownloadLink {
                quality,
                url: convert_drive_link(url),
            })
        })
        .collect()
}

// ============================================================================
// Episodes
// ============================================================================

/// Build a new episode from a payload
pub fn build_episode(payload: EpisodePayload) -> Result<Episode> {
    let missing = || {
        CatalogError::validation(
            "Episode number, title, and at least one download link are required",
        )
    };

    let episode_number = match payload.episode_number {
        Some(n) if n > 0 => n,
        _ => return Err(missing()),
    };
    let title = required_text(payload.title, "title").map_err(|_| missing())?;
    let links = match payload.download_links {
        Some(links) if !links.is_empty() => normalize_links(links)?,
        _ => return Err(missing()),
    };

    Ok(Episode {
        id: Uuid::new_v4(),
        episode_number,
        title,
        download_links: links,
        duration: payload
            .duration
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        air_date: optional_air_date(payload.air_date)?,
        is_active: payload.is_active.unwrap_or(true),
    })
}

/// Build a whole episode collection, rejecting repeated numbers
pub fn build_episodes(payloads: Vec<EpisodePayload>) -> Result<EpisodeList> {
    if payloads.is_empty() {
        return Err(CatalogError::validation(
            "Series must have at least one episode",
        ));
    }

    let episodes = payloads
        .into_iter()
        .map(build_episode)
        .collect::<Result<Vec<_>>>()?;

    EpisodeList::from_episodes(episodes).map_err(|taken| CatalogError::DuplicateEpisodeNumber(taken.0))
}

/// Partial update of one episode. Only provided fields change.
///
/// Works on a copy so a rejected patch leaves the episode untouched.
pub fn apply_episode_patch(episode: &Episode, patch: EpisodePatch) -> Result<Episode> {
    let mut updated = episode.clone();

    if let Some(title) = optional_text(patch.title, "title")? {
        updated.title = title;
    }
    if let Some(links) = patch.download_links {
        if links.is_empty() {
            return Err(CatalogError::validation(
                "Episode requires at least one download link",
            ));
        }
        updated.download_links = normalize_links(links)?;
    }
    if let Some(duration) = patch.duration {
        updated.duration = duration
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
    }
    if let Some(air_date) = patch.air_date {
        updated.air_date = optional_air_date(air_date)?;
    }
    if let Some(is_active) = patch.is_active {
        updated.is_active = is_active;
    }

    Ok(updated)
}

// ============================================================================
// Records
// ============================================================================

/// Category-dependent fields carried over from the previous version of a record
struct PreviousKind<'a> {
    file_size: Option<&'a str>,
    download_links: Option<&'a [DownloadLink]>,
    series: Option<(Option<u32>, u32, u32, &'a EpisodeList)>,
}

impl<'a> PreviousKind<'a> {
    fn none() -> Self {
        Self {
            file_size: None,
            download_links: None,
            series: None,
        }
    }

    fn of(kind: &'a ContentKind) -> Self {
        match kind {
            ContentKind::Movie {
                file_size,
                download_links,
            } => Self {
                file_size: Some(file_size),
                download_links: Some(download_links),
                series: None,
            },
            ContentKind::Dubbed { download_links } => Self {
                file_size: None,
                download_links: Some(download_links),
                series: None,
            },
            ContentKind::Series {
                total_episodes,
                seasons,
                current_season,
                episodes,
                ..
            } => Self {
                file_size: None,
                download_links: None,
                series: Some((*total_episodes, *seasons, *current_season, episodes)),
            },
        }
    }
}

/// Counts are stored as INTEGER
const MAX_COUNT: u32 = i32::MAX as u32;

fn positive(value: Option<u32>, field: &str) -> Result<Option<u32>> {
    match value {
        Some(0) => Err(CatalogError::validation(format!("{} must be at least 1", field))),
        Some(n) if n > MAX_COUNT => Err(CatalogError::validation(format!(
            "{} must be at most {}",
            field, MAX_COUNT
        ))),
        other => Ok(other),
    }
}

/// Resolve the category-specific part of a record, dropping inapplicable fields
fn build_kind(category: Category, payload: &mut ContentPayload, previous: PreviousKind) -> Result<ContentKind> {
    let mut dropped: Vec<&'static str> = Vec::new();

    let kind = match category {
        Category::Movie | Category::Dubbed => {
            if payload.episodes.take().is_some() {
                dropped.push("episodes");
            }
            if payload.total_episodes.take().is_some() {
                dropped.push("totalEpisodes");
            }
            if payload.seasons.take().is_some() {
                dropped.push("seasons");
            }
            if payload.current_season.take().is_some() {
                dropped.push("currentSeason");
            }

            let download_links = match payload.download_links.take() {
                Some(links) => normalize_links(links)?,
                None => previous.download_links.map(<[_]>::to_vec).unwrap_or_default(),
            };

            if category == Category::Movie {
                let file_size = match optional_text(payload.file_size.take(), "fileSize")? {
                    Some(size) => size,
                    None => previous
                        .file_size
                        .map(str::to_string)
                        .ok_or_else(|| CatalogError::validation("File size is required for movies"))?,
                };
                ContentKind::Movie {
                    file_size,
                    download_links,
                }
            } else {
                if payload.file_size.take().is_some() {
                    dropped.push("fileSize");
                }
                ContentKind::Dubbed { download_links }
            }
        }
        Category::WebSeries | Category::TvSeries => {
            if payload.file_size.take().is_some() {
                dropped.push("fileSize");
            }
            if payload.download_links.take().is_some() {
                dropped.push("downloadLinks");
            }

            let (prev_total, prev_seasons, prev_current, prev_episodes) = match previous.series {
                Some((total, seasons, current, episodes)) => {
                    (total, Some(seasons), Some(current), Some(episodes))
                }
                None => (None, None, None, None),
            };

            let episodes = match payload.episodes.take() {
                Some(list) => build_episodes(list)?,
                None => prev_episodes.cloned().ok_or_else(|| {
                    CatalogError::validation("Series must have at least one episode")
                })?,
            };

            ContentKind::Series {
                format: if category == Category::WebSeries {
                    SeriesFormat::Web
                } else {
                    SeriesFormat::Tv
                },
                total_episodes: positive(payload.total_episodes.take(), "totalEpisodes")?
                    .or(prev_total),
                seasons: positive(payload.seasons.take(), "seasons")?
                    .or(prev_seasons)
                    .unwrap_or(1),
                current_season: positive(payload.current_season.take(), "currentSeason")?
                    .or(prev_current)
                    .unwrap_or(1),
                episodes,
            }
        }
    };

    if !dropped.is_empty() {
        tracing::debug!(
            "Dropped fields not applicable to {}: {}",
            category,
            dropped.join(", ")
        );
    }

    Ok(kind)
}

/// Build a new record from a create payload
pub fn new_record(mut payload: ContentPayload, now: DateTime<Utc>) -> Result<ContentRecord> {
    let title = required_text(payload.title.take(), "title")?;
    let language = parse_language(&required_text(payload.language.take(), "language")?)?;
    let category = parse_category(&required_text(payload.category.take(), "category")?)?;
    let genre = parse_genres(payload.genre.take().unwrap_or_default())?;
    let year = payload
        .year
        .ok_or_else(|| CatalogError::validation("year is required"))?;
    let poster_url = required_text(payload.poster_url.take(), "posterUrl")?;
    let description = required_text(payload.description.take(), "description")?;

    let kind = build_kind(category, &mut payload, PreviousKind::none())?;

    Ok(ContentRecord {
        id: Uuid::new_v4(),
        title,
        language,
        genre,
        year,
        poster_url,
        description,
        kind,
        is_trending: payload.is_trending.unwrap_or(false),
        is_featured: payload.is_featured.unwrap_or(false),
        is_active: payload.is_active.unwrap_or(true),
        download_count: 0,
        created_at: now,
        version: 0,
    })
}

/// Merge an update payload onto an existing record.
///
/// Identity, creation time and the download counter are never taken from the
/// payload. The category-dependent fields are re-resolved for the resulting
/// category, falling back to the existing values where they still apply.
pub fn apply_update(existing: &ContentRecord, mut payload: ContentPayload) -> Result<ContentRecord> {
    let title = optional_text(payload.title.take(), "title")?.unwrap_or_else(|| existing.title.clone());
    let language = match optional_text(payload.language.take(), "language")? {
        Some(l) => parse_language(&l)?,
        None => existing.language,
    };
    let category = match optional_text(payload.category.take(), "category")? {
        Some(c) => parse_category(&c)?,
        None => existing.category(),
    };
    let genre = match payload.genre.take() {
        Some(values) => parse_genres(values)?,
        None => existing.genre.clone(),
    };
    let poster_url = optional_text(payload.poster_url.take(), "posterUrl")?
        .unwrap_or_else(|| existing.poster_url.clone());
    let description = optional_text(payload.description.take(), "description")?
        .unwrap_or_else(|| existing.description.clone());

    let kind = build_kind(category, &mut payload, PreviousKind::of(&existing.kind))?;

    Ok(ContentRecord {
        id: existing.id,
        title,
        language,
        genre,
        year: payload.year.unwrap_or(existing.year),
        poster_url,
        description,
        kind,
        is_trending: payload.is_trending.unwrap_or(existing.is_trending),
        is_featured: payload.is_featured.unwrap_or(existing.is_featured),
        is_active: payload.is_active.unwrap_or(existing.is_active),
        download_count: existing.download_count,
        created_at: existing.created_at,
        version: existing.version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(quality: &str, url: &str) -> LinkPayload {
        LinkPayload {
            quality: quality.to_string(),
            url: url.to_string(),
        }
    }

    fn episode_payload(number: u32) -> EpisodePayload {
        EpisodePayload {
            episode_number: Some(number),
            title: Some(format!("Episode {}", number)),
            download_links: Some(vec![link("720p", "https://cdn.example.com/e.mkv")]),
            ..Default::default()
        }
    }

    fn movie_payload() -> ContentPayload {
        ContentPayload {
            title: Some("  X  ".to_string()),
            language: Some("Telugu".to_string()),
            category: Some("Movie".to_string()),
            genre: Some(vec!["Action".to_string(), "Action".to_string()]),
            year: Some(2024),
            poster_url: Some("https://img.example.com/x.jpg".to_string()),
            description: Some("An action film".to_string()),
            file_size: Some("1GB".to_string()),
            download_links: Some(vec![link(
                "720p",
                "https://drive.google.com/file/d/ABC123/view",
            )]),
            ..Default::default()
        }
    }

    fn series_payload() -> ContentPayload {
        ContentPayload {
            category: Some("Web Series".to_string()),
            file_size: Some("5GB".to_string()),
            download_links: Some(vec![link("480p", "https://cdn.example.com/s.mkv")]),
            episodes: Some(vec![episode_payload(1), episode_payload(2)]),
            ..movie_payload()
        }
    }

    #[test]
    fn test_convert_drive_file_link() {
        assert_eq!(
            convert_drive_link("https://drive.google.com/file/d/ABC123/view?usp=sharing"),
            "https://drive.google.com/uc?export=download&id=ABC123"
        );
    }

    #[test]
    fn test_convert_drive_open_link() {
        assert_eq!(
            convert_drive_link("https://drive.google.com/open?id=1a-B_c"),
            "https://drive.google.com/uc?export=download&id=1a-B_c"
        );
    }

    #[test]
    fn test_convert_is_stable() {
        let once = convert_drive_link("https://drive.google.com/file/d/ABC123/view");
        assert_eq!(convert_drive_link(&once), once);

        let uc = convert_drive_link("https://drive.google.com/uc?id=XYZ&export=download");
        assert_eq!(uc, "https://drive.google.com/uc?export=download&id=XYZ");
    }

    #[test]
    fn test_convert_passes_through_unknown() {
        let url = "https://cdn.example.com/movies/x.mkv";
        assert_eq!(convert_drive_link(url), url);
        assert_eq!(
            convert_drive_link("https://example.com/?u=https://drive.google.com/file/d/A/view"),
            "https://example.com/?u=https://drive.google.com/file/d/A/view"
        );
    }

    #[test]
    fn test_new_movie_record() {
        let record = new_record(movie_payload(), Utc::now()).unwrap();

        assert_eq!(record.title, "X");
        assert_eq!(record.category(), Category::Movie);
        assert_eq!(record.genre.len(), 1);
        assert!(record.is_active);
        assert!(!record.is_trending);
        assert_eq!(record.download_count, 0);

        match &record.kind {
            ContentKind::Movie {
                file_size,
                download_links,
            } => {
                assert_eq!(file_size, "1GB");
                assert!(download_links[0].url.contains("export=download"));
                assert!(download_links[0].url.contains("ABC123"));
            }
            other => panic!("expected movie, got {:?}", other),
        }
    }

    #[test]
    fn test_movie_requires_file_size() {
        let payload = ContentPayload {
            file_size: None,
            ..movie_payload()
        };
        assert!(matches!(
            new_record(payload, Utc::now()),
            Err(CatalogError::Validation(_))
        ));

        let payload = ContentPayload {
            file_size: Some("   ".to_string()),
            ..movie_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());
    }

    #[test]
    fn test_movie_drops_series_fields() {
        let payload = ContentPayload {
            episodes: Some(vec![episode_payload(1)]),
            seasons: Some(3),
            total_episodes: Some(10),
            ..movie_payload()
        };
        let record = new_record(payload, Utc::now()).unwrap();
        assert!(record.kind.episodes().is_none());
    }

    #[test]
    fn test_dubbed_keeps_links_drops_file_size() {
        let payload = ContentPayload {
            category: Some("Dubbed".to_string()),
            ..movie_payload()
        };
        let record = new_record(payload, Utc::now()).unwrap();
        assert_eq!(record.kind.download_links().map(|l| l.len()), Some(1));
        assert!(matches!(record.kind, ContentKind::Dubbed { .. }));
    }

    #[test]
    fn test_new_series_record() {
        let record = new_record(series_payload(), Utc::now()).unwrap();

        assert_eq!(record.category(), Category::WebSeries);
        assert!(record.kind.download_links().is_none());
        match &record.kind {
            ContentKind::Series {
                seasons,
                current_season,
                episodes,
                ..
            } => {
                assert_eq!(*seasons, 1);
                assert_eq!(*current_season, 1);
                assert_eq!(episodes.len(), 2);
            }
            other => panic!("expected series, got {:?}", other),
        }
    }

    #[test]
    fn test_series_counts_fit_integer_columns() {
        let payload = ContentPayload {
            total_episodes: Some(3_000_000_000),
            ..series_payload()
        };
        assert!(matches!(
            new_record(payload, Utc::now()),
            Err(CatalogError::Validation(_))
        ));

        let payload = ContentPayload {
            seasons: Some(i32::MAX as u32 + 1),
            ..series_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());

        let payload = ContentPayload {
            current_season: Some(i32::MAX as u32),
            ..series_payload()
        };
        assert!(new_record(payload, Utc::now()).is_ok());
    }

    #[test]
    fn test_series_requires_episodes() {
        let payload = ContentPayload {
            episodes: None,
            ..series_payload()
        };
        assert!(matches!(
            new_record(payload, Utc::now()),
            Err(CatalogError::Validation(_))
        ));

        let payload = ContentPayload {
            episodes: Some(vec![]),
            ..series_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());
    }

    #[test]
    fn test_series_episode_needs_link() {
        let mut bad = episode_payload(1);
        bad.download_links = Some(vec![]);
        let payload = ContentPayload {
            episodes: Some(vec![bad]),
            ..series_payload()
        };
        assert!(matches!(
            new_record(payload, Utc::now()),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_series_duplicate_episode_numbers() {
        let payload = ContentPayload {
            episodes: Some(vec![episode_payload(4), episode_payload(4)]),
            ..series_payload()
        };
        assert!(matches!(
            new_record(payload, Utc::now()),
            Err(CatalogError::DuplicateEpisodeNumber(4))
        ));
    }

    #[test]
    fn test_rejects_missing_and_invalid_fields() {
        let payload = ContentPayload {
            genre: Some(vec![]),
            ..movie_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());

        let payload = ContentPayload {
            language: Some("Klingon".to_string()),
            ..movie_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());

        let payload = ContentPayload {
            title: None,
            ..movie_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());

        let payload = ContentPayload {
            download_links: Some(vec![link("8K", "https://x")]),
            ..movie_payload()
        };
        assert!(new_record(payload, Utc::now()).is_err());
    }

    #[test]
    fn test_update_movie_to_series_without_episodes_fails() {
        let movie = new_record(movie_payload(), Utc::now()).unwrap();
        let patch = ContentPayload {
            category: Some("Web Series".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            apply_update(&movie, patch),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_update_series_to_movie() {
        let series = new_record(series_payload(), Utc::now()).unwrap();

        let patch = ContentPayload {
            category: Some("Movie".to_string()),
            ..Default::default()
        };
        assert!(apply_update(&series, patch).is_err(), "movie needs a file size");

        let patch = ContentPayload {
            category: Some("Movie".to_string()),
            file_size: Some("700MB".to_string()),
            ..Default::default()
        };
        let movie = apply_update(&series, patch).unwrap();
        assert_eq!(movie.category(), Category::Movie);
        assert!(movie.kind.episodes().is_none());
        assert_eq!(movie.id, series.id);
        assert_eq!(movie.created_at, series.created_at);
    }

    #[test]
    fn test_update_keeps_existing_values() {
        let mut movie = new_record(movie_payload(), Utc::now()).unwrap();
        movie.download_count = 7;

        let patch = ContentPayload {
            title: Some("Y".to_string()),
            is_featured: Some(true),
            ..Default::default()
        };
        let updated = apply_update(&movie, patch).unwrap();

        assert_eq!(updated.title, "Y");
        assert!(updated.is_featured);
        assert_eq!(updated.download_count, 7);
        assert_eq!(updated.kind, movie.kind);
    }

    #[test]
    fn test_update_series_fields_keep_episodes() {
        let series = new_record(series_payload(), Utc::now()).unwrap();
        let patch = ContentPayload {
            seasons: Some(2),
            current_season: Some(2),
            file_size: Some("9GB".to_string()),
            ..Default::default()
        };
        let updated = apply_update(&series, patch).unwrap();

        match updated.kind {
            ContentKind::Series {
                seasons,
                current_season,
                episodes,
                ..
            } => {
                assert_eq!(seasons, 2);
                assert_eq!(current_season, 2);
                assert_eq!(episodes.len(), 2);
            }
            other => panic!("expected series, got {:?}", other),
        }
    }

    #[test]
    fn test_episode_patch_partial() {
        let mut payload = episode_payload(1);
        payload.duration = Some("45 min".to_string());
        payload.air_date = Some("2024-03-01".to_string());
        let episode = build_episode(payload).unwrap();

        let patch = EpisodePatch {
            is_active: Some(false),
            air_date: Some(None),
            ..Default::default()
        };
        let updated = apply_episode_patch(&episode, patch).unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.air_date, None);
        assert_eq!(updated.duration.as_deref(), Some("45 min"));
        assert_eq!(updated.title, episode.title);
        assert_eq!(updated.id, episode.id);
    }

    #[test]
    fn test_episode_patch_rejects_empty_links() {
        let episode = build_episode(episode_payload(1)).unwrap();
        let patch = EpisodePatch {
            download_links: Some(vec![]),
            ..Default::default()
        };
        assert!(apply_episode_patch(&episode, patch).is_err());
    }

    #[test]
    fn test_air_date_formats() {
        assert_eq!(
            parse_air_date("2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert_eq!(
            parse_air_date("2024-01-05T10:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert!(parse_air_date("next tuesday").is_err());
    }
}
