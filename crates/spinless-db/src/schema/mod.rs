//! Kodi table layouts used by spinless.
//!
//! Kodi owns both databases; spinless never creates or migrates them. These
//! helpers build empty stores with the same tables so the query layer can be
//! exercised without a real Kodi profile.

use rusqlite::Connection;
use spinless_common::{Error, Result};
use std::path::Path;

const VIDEO_SCHEMA: &str = include_str!("video.sql");
const TEXTURE_SCHEMA: &str = include_str!("textures.sql");

/// Create the video library tables on an open connection.
pub fn create_video_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(VIDEO_SCHEMA)
        .map_err(|e| Error::store_unavailable(format!("Failed to create video schema: {}", e)))
}

/// Create the texture cache tables on an open connection.
pub fn create_texture_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(TEXTURE_SCHEMA)
        .map_err(|e| Error::store_unavailable(format!("Failed to create texture schema: {}", e)))
}

/// Create a video library database file at `path`.
pub fn init_video_store(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|e| Error::store_unavailable(e.to_string()))?;
    create_video_schema(&conn)?;
    Ok(conn)
}

/// Create a texture cache database file at `path`.
pub fn init_texture_store(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|e| Error::store_unavailable(e.to_string()))?;
    create_texture_schema(&conn)?;
    Ok(conn)
}
