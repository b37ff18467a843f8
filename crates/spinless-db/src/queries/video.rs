//! Video library queries.
//!
//! Read-only access to Kodi's `MyVideos*.db`: record enumeration per kind,
//! the folder joins used for NFO probing, and local artwork lookup.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use spinless_common::{Error, MediaKind, Result};
use tracing::debug;

use super::{placeholders, MAX_PARAMS_PER_QUERY};
use crate::models::{ArtworkRow, EpisodeFile, MediaFolder};

/// Get every id of a record kind.
pub fn all_ids(conn: &Connection, kind: MediaKind) -> Result<Vec<i64>> {
    // Table and column come from MediaKind, never from callers.
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        kind.id_column(),
        kind.table(),
        kind.id_column()
    );
    query_ids(conn, &sql, Vec::new())
}

/// Get every id of a `(table, id_column)` pair.
///
/// Fails with [`Error::InvalidSchema`] unless the pair names one of the four
/// known record kinds.
pub fn all_ids_in(conn: &Connection, table: &str, id_column: &str) -> Result<Vec<i64>> {
    let kind = MediaKind::from_table(table, id_column)?;
    all_ids(conn, kind)
}

/// Get every movie with the folder of its media file.
pub fn movie_folders(conn: &Connection) -> Result<Vec<MediaFolder>> {
    query_folders(
        conn,
        "SELECT m.idMovie, p.strPath
         FROM movie m
         JOIN files f ON m.idFile = f.idFile
         JOIN path p ON f.idPath = p.idPath
         ORDER BY m.idMovie",
    )
}

/// Get every TV show with each folder linked to it.
///
/// A show linked to several folders appears once per folder.
pub fn tvshow_folders(conn: &Connection) -> Result<Vec<MediaFolder>> {
    query_folders(
        conn,
        "SELECT ts.idShow, p.strPath
         FROM tvshow ts
         JOIN tvshowlinkpath tsl ON ts.idShow = tsl.idShow
         JOIN path p ON tsl.idPath = p.idPath
         ORDER BY ts.idShow, p.idPath",
    )
}

/// Get the season ids belonging to the given shows.
///
/// Returns an empty list without touching the database when `show_ids` is
/// empty.
pub fn seasons_for_shows(conn: &Connection, show_ids: &[i64]) -> Result<Vec<i64>> {
    let mut seasons = Vec::new();
    for chunk in show_ids.chunks(MAX_PARAMS_PER_QUERY) {
        let sql = format!(
            "SELECT idSeason FROM seasons WHERE idShow IN ({}) ORDER BY idSeason",
            placeholders(chunk.len())
        );
        seasons.extend(query_ids(conn, &sql, id_values(chunk))?);
    }
    Ok(seasons)
}

/// Get episodes with their folder and file name.
///
/// With `show_ids`, only episodes of those shows are returned; an empty
/// restriction yields no episodes. This deliberately differs from treating
/// an empty list as "no restriction": a require-show-NFO scan with no
/// qualifying shows must not fall back to every episode.
pub fn episode_files(
    conn: &Connection,
    show_ids: Option<&[i64]>,
) -> Result<Vec<EpisodeFile>> {
    const SELECT: &str = "SELECT e.idEpisode, p.strPath, f.strFilename
         FROM episode e
         JOIN files f ON e.idFile = f.idFile
         JOIN path p ON f.idPath = p.idPath";

    match show_ids {
        None => query_episodes(conn, &format!("{} ORDER BY e.idEpisode", SELECT), Vec::new()),
        Some(ids) => {
            let mut episodes = Vec::new();
            for chunk in ids.chunks(MAX_PARAMS_PER_QUERY) {
                let sql = format!(
                    "{} WHERE e.idShow IN ({}) ORDER BY e.idEpisode",
                    SELECT,
                    placeholders(chunk.len())
                );
                episodes.extend(query_episodes(conn, &sql, id_values(chunk))?);
            }
            Ok(episodes)
        }
    }
}

/// Get the local artwork of the given records.
///
/// URLs that are remote (`http...`) or already wrapped as `image://` are
/// excluded. Returns an empty list without touching the database when
/// `media_ids` is empty.
pub fn local_artwork(
    conn: &Connection,
    kind: MediaKind,
    media_ids: &[i64],
) -> Result<Vec<ArtworkRow>> {
    let mut artwork = Vec::new();

    for chunk in media_ids.chunks(MAX_PARAMS_PER_QUERY) {
        let sql = format!(
            "SELECT media_id, type, url
             FROM art
             WHERE media_type = ?
               AND media_id IN ({})
               AND url NOT LIKE 'http%'
               AND url NOT LIKE 'image://%'
             ORDER BY art_id",
            placeholders(chunk.len())
        );

        let mut params = Vec::with_capacity(chunk.len() + 1);
        params.push(Value::Text(kind.art_media_type().to_string()));
        params.extend(id_values(chunk));

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| Error::store_unavailable(e.to_string()))?;

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(ArtworkRow {
                    media_id: row.get(0)?,
                    art_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    url: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })
            .map_err(|e| Error::store_unavailable(e.to_string()))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::store_unavailable(e.to_string()))?;

        artwork.extend(rows);
    }

    debug!(
        "{} local {} artwork rows for {} records",
        artwork.len(),
        kind,
        media_ids.len()
    );
    Ok(artwork)
}

fn id_values(ids: &[i64]) -> Vec<Value> {
    ids.iter().map(|&id| Value::Integer(id)).collect()
}

fn query_ids(conn: &Connection, sql: &str, params: Vec<Value>) -> Result<Vec<i64>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    let ids = stmt
        .query_map(params_from_iter(params.iter()), |row| row.get(0))
        .map_err(|e| Error::store_unavailable(e.to_string()))?
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    Ok(ids)
}

fn query_folders(conn: &Connection, sql: &str) -> Result<Vec<MediaFolder>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    let folders = stmt
        .query_map([], |row| {
            Ok(MediaFolder {
                id: row.get(0)?,
                path: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            })
        })
        .map_err(|e| Error::store_unavailable(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    Ok(folders)
}

fn query_episodes(conn: &Connection, sql: &str, params: Vec<Value>) -> Result<Vec<EpisodeFile>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    let episodes = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok(EpisodeFile {
                id: row.get(0)?,
                path: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                file_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })
        .map_err(|e| Error::store_unavailable(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    Ok(episodes)
}
