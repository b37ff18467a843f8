//! Rows read from Kodi's databases.
//!
//! Ids are Kodi's integer primary keys. Nothing here outlives a single scan.

use serde::{Deserialize, Serialize};

/// A library record together with the folder it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFolder {
    pub id: i64,
    pub path: String,
}

/// An episode with its folder and media file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeFile {
    pub id: i64,
    pub path: String,
    pub file_name: String,
}

/// A locally stored artwork reference from the `art` table.
///
/// `url` is always a plain filesystem path: remote and already
/// `image://`-wrapped URLs are filtered out by the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRow {
    pub media_id: i64,
    pub art_type: String,
    pub url: String,
}

/// A row of the `texture` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub id: i64,
    pub url: String,
    pub last_hash_check: Option<String>,
}

/// A texture whose `lasthashcheck` should be pushed to the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUpdate {
    pub texture_id: i64,
    /// Artwork URL as stored in the video library.
    pub url: String,
    pub current_hash_check: Option<String>,
}
