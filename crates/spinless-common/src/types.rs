//! Core type definitions for Kodi library records.
//!
//! Kodi's video database names the same record kind differently depending on
//! where it appears: the `seasons` table holds rows whose artwork is filed
//! under `media_type = 'season'`. [`MediaKind`] keeps those names together.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// Kind of library record that can own artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A single movie.
    Movie,
    /// A TV show.
    TvShow,
    /// A season within a show.
    Season,
    /// A single episode within a show.
    Episode,
}

impl MediaKind {
    /// All kinds in scan order.
    pub const ALL: [MediaKind; 4] = [Self::Movie, Self::TvShow, Self::Season, Self::Episode];

    /// Table holding records of this kind.
    pub fn table(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvShow => "tvshow",
            Self::Season => "seasons",
            Self::Episode => "episode",
        }
    }

    /// Primary key column of [`MediaKind::table`].
    pub fn id_column(self) -> &'static str {
        match self {
            Self::Movie => "idMovie",
            Self::TvShow => "idShow",
            Self::Season => "idSeason",
            Self::Episode => "idEpisode",
        }
    }

    /// Value of `art.media_type` for artwork owned by this kind.
    pub fn art_media_type(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvShow => "tvshow",
            Self::Season => "season",
            Self::Episode => "episode",
        }
    }

    /// Resolve a `(table, id_column)` pair to a kind.
    ///
    /// Only the four known pairs are accepted; anything else is
    /// [`Error::InvalidSchema`]. Table and column names are interpolated into
    /// SQL, so this is the gate that keeps them to a fixed set.
    pub fn from_table(table: &str, id_column: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.table() == table && kind.id_column() == id_column)
            .ok_or_else(|| Error::invalid_schema(format!("{}.{}", table, id_column)))
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.art_media_type())
    }
}
