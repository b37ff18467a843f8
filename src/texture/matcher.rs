use rusqlite::Connection;
use spinless_common::Result;
use spinless_db::models::{ArtworkRow, PendingUpdate, TextureRecord};
use spinless_db::queries::textures::load_textures;
use std::collections::HashMap;

use super::url::normalize_texture_url;

/// `lasthashcheck` value that keeps Kodi from re-hashing a texture.
pub const FUTURE_DATE: &str = "2099-01-01 00:00:00";

/// Whether a texture with this `lasthashcheck` still needs protecting.
///
/// Kodi stores `YYYY-MM-DD HH:MM:SS`, so string order is date order.
pub fn needs_update(last_hash_check: Option<&str>) -> bool {
    match last_hash_check {
        None => true,
        Some(value) => value.is_empty() || value < FUTURE_DATE,
    }
}

/// Texture cache rows keyed by their stored URL.
#[derive(Debug, Default)]
pub struct TextureIndex {
    by_url: HashMap<String, TextureRecord>,
}

impl TextureIndex {
    /// Index `records`. A later record wins over an earlier one with the same URL.
    pub fn from_records(records: impl IntoIterator<Item = TextureRecord>) -> Self {
        let by_url = records
            .into_iter()
            .map(|record| (record.url.clone(), record))
            .collect();
        Self { by_url }
    }

    /// Read the whole `texture` table.
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Self::from_records(load_textures(conn)?))
    }

    /// Find the texture for an artwork URL, trying the cache key form first
    /// and the URL as stored second.
    pub fn lookup(&self, url: &str) -> Option<&TextureRecord> {
        self.by_url
            .get(&normalize_texture_url(url))
            .or_else(|| self.by_url.get(url))
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

/// Match artwork against the cache.
///
/// Returns the textures needing a new `lasthashcheck`, in artwork order, and
/// the number of artwork rows with no cached texture. Rows are not merged by
/// texture id: two rows reaching the same texture yield two entries.
pub fn resolve_updates(
    index: &TextureIndex,
    artwork: &[ArtworkRow],
) -> (Vec<PendingUpdate>, usize) {
    let mut updates = Vec::new();
    let mut not_cached = 0;

    for row in artwork {
        match index.lookup(&row.url) {
            Some(texture) => {
                if needs_update(texture.last_hash_check.as_deref()) {
                    updates.push(PendingUpdate {
                        texture_id: texture.id,
                        url: row.url.clone(),
                        current_hash_check: texture.last_hash_check.clone(),
                    });
                }
            }
            None => not_cached += 1,
        }
    }

    (updates, not_cached)
}
