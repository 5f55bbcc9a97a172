//! Episodes of a series record
//!
//! Episodes live only inside their owning record. The collection is keyed by
//! episode number, so two episodes with the same number cannot coexist.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::content::DownloadLink;

/// Single episode of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: Uuid,
    pub episode_number: u32,
    pub title: String,
    pub download_links: Vec<DownloadLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Episode collection ordered by episode number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeList(BTreeMap<u32, Episode>);

/// Returned when inserting an episode whose number is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeNumberTaken(pub u32);

impl EpisodeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence, rejecting repeated episode numbers
    pub fn from_episodes(
        episodes: impl IntoIterator<Item = Episode>,
    ) -> Result<Self, EpisodeNumberTaken> {
        let mut list = Self::new();
        for episode in episodes {
            list.insert(episode)?;
        }
        Ok(list)
    }

    pub fn insert(&mut self, episode: Episode) -> Result<(), EpisodeNumberTaken> {
        let number = episode.episode_number;
        if self.0.contains_key(&number) {
            return Err(EpisodeNumberTaken(number));
        }
        self.0.insert(number, episode);
        Ok(())
    }

    pub fn contains_number(&self, number: u32) -> bool {
        self.0.contains_key(&number)
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&Episode> {
        self.0.values().find(|e| e.id == id)
    }

    pub fn get_mut_by_id(&mut self, id: Uuid) -> Option<&mut Episode> {
        self.0.values_mut().find(|e| e.id == id)
    }

    /// Remove by id; returns the removed episode if it was present
    pub fn remove_by_id(&mut self, id: Uuid) -> Option<Episode> {
        let number = self.get_by_id(id)?.episode_number;
        self.0.remove(&number)
    }

    /// Active episodes, ascending by episode number
    pub fn active(&self) -> impl Iterator<Item = &Episode> {
        self.0.values().filter(|e| e.is_active)
    }

    pub fn retain_active(&mut self) {
        self.0.retain(|_, e| e.is_active);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Episode> {
        self.0.into_values().collect()
    }
}

impl Serialize for EpisodeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
    }
}

impl<'de> Deserialize<'de> for EpisodeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let episodes = Vec::<Episode>::deserialize(deserializer)?;
        EpisodeList::from_episodes(episodes)
            .map_err(|EpisodeNumberTaken(n)| de::Error::custom(format!("duplicate episode {}", n)))
    }
}
