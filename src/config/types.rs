use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionPolicy,

    #[serde(default)]
    pub databases: DatabaseConfig,
}

/// Which library records have their artwork protected from hash checks.
///
/// Passed by value into each scan; nothing reads it concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectionPolicy {
    #[serde(default = "default_true")]
    pub include_movies: bool,

    #[serde(default)]
    pub include_tvshows: bool,

    /// Only consulted when TV shows are included
    #[serde(default = "default_true")]
    pub include_seasons: bool,

    /// Only consulted when TV shows are included
    #[serde(default = "default_true")]
    pub include_episodes: bool,

    #[serde(default)]
    pub episode_nfo_logic: EpisodeNfoLogic,

    /// Skip NFO filtering and take every record's local artwork
    #[serde(default)]
    pub update_all_local: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            include_movies: true,
            include_tvshows: false,
            include_seasons: true,
            include_episodes: true,
            episode_nfo_logic: EpisodeNfoLogic::default(),
            update_all_local: false,
        }
    }
}

impl SelectionPolicy {
    /// Whether the policy selects anything at all.
    pub fn is_empty(&self) -> bool {
        !self.include_movies && !self.include_tvshows
    }
}

/// How an episode qualifies when NFO filtering is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeNfoLogic {
    /// The episode's own NFO is enough
    #[default]
    PerItem,
    /// The episode's NFO and its show's tvshow.nfo are both required
    RequireShowNfo,
}

impl std::fmt::Display for EpisodeNfoLogic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerItem => write!(f, "per_item"),
            Self::RequireShowNfo => write!(f, "require_show_nfo"),
        }
    }
}

/// Explicit database locations. Unset entries fall back to discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textures: Option<PathBuf>,
}
