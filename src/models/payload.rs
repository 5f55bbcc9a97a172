//! Request bodies for admin writes
//!
//! Everything is optional and loosely typed here; normalization decides
//! what is required and what is legal for the target category.

use serde::{Deserialize, Deserializer};

/// Download link as sent by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkPayload {
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub url: String,
}

/// Body of POST /movies and PUT /movies/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    pub title: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub description: Option<String>,
    pub download_links: Option<Vec<LinkPayload>>,
    pub file_size: Option<String>,
    pub total_episodes: Option<u32>,
    pub seasons: Option<u32>,
    pub current_season: Option<u32>,
    pub episodes: Option<Vec<EpisodePayload>>,
    pub is_trending: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Body of POST /movies/:id/episodes, also used for episodes inside a series payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePayload {
    pub episode_number: Option<u32>,
    pub title: Option<String>,
    pub download_links: Option<Vec<LinkPayload>>,
    pub duration: Option<String>,
    pub air_date: Option<String>,
    pub is_active: Option<bool>,
}

/// Body of PATCH /movies/:id/episodes/:episodeId
///
/// `duration` and `airDate` distinguish "absent" (leave untouched) from an
/// explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePatch {
    pub title: Option<String>,
    pub download_links: Option<Vec<LinkPayload>>,
    #[serde(default, deserialize_with = "double_option")]
    pub duration: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub air_date: Option<Option<String>>,
    pub is_active: Option<bool>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
