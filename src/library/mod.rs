//! Read-only view of the Kodi video library.
//!
//! Wraps the video store queries and filters records by whether their
//! folder carries an NFO, which is how Kodi users mark locally curated
//! artwork.

use spinless_common::paths::TVSHOW_NFO;
use spinless_common::{MediaKind, NfoProbe, Result};
use spinless_db::models::ArtworkRow;
use spinless_db::pool::{get_conn, DbPool};
use spinless_db::queries::video;
use std::collections::HashSet;
use tracing::debug;

use crate::scanner::observer::report_progress;
use crate::scanner::ScanObserver;

/// Movies between progress reports.
pub const MOVIE_PROGRESS_STRIDE: usize = 100;

/// TV shows between progress reports.
pub const TVSHOW_PROGRESS_STRIDE: usize = 50;

/// Episodes between progress reports.
pub const EPISODE_PROGRESS_STRIDE: usize = 200;

/// Query layer over the video library store.
pub struct VideoLibrary {
    pool: DbPool,
    probe: NfoProbe,
}

impl VideoLibrary {
    pub fn new(pool: DbPool, probe: NfoProbe) -> Self {
        Self { pool, probe }
    }

    /// Every id of the given kind.
    pub fn all_ids(&self, kind: MediaKind) -> Result<Vec<i64>> {
        let conn = get_conn(&self.pool)?;
        video::all_ids(&conn, kind)
    }

    /// Every id of the kind stored in `table`.`id_column`.
    ///
    /// Fails with `InvalidSchema` unless the pair names one of the four
    /// media tables.
    pub fn all_ids_in(&self, table: &str, id_column: &str) -> Result<Vec<i64>> {
        let conn = get_conn(&self.pool)?;
        video::all_ids_in(&conn, table, id_column)
    }

    /// Movies whose folder holds at least one NFO.
    pub fn movies_with_nfo(&self, observer: &mut dyn ScanObserver) -> Result<Vec<i64>> {
        let folders = {
            let conn = get_conn(&self.pool)?;
            video::movie_folders(&conn)?
        };

        let total = folders.len();
        let mut ids = Vec::new();
        for (i, movie) in folders.iter().enumerate() {
            if self.probe.has_nfo(&movie.path, None) {
                ids.push(movie.id);
            }
            report_progress(
                observer,
                i,
                total,
                MOVIE_PROGRESS_STRIDE,
                "Scanning movies for NFOs",
            );
        }

        debug!("{} of {} movies have an NFO", ids.len(), total);
        Ok(ids)
    }

    /// TV shows whose folder holds `tvshow.nfo`.
    ///
    /// A show linked to several folders qualifies once if any of them does.
    pub fn tvshows_with_nfo(&self, observer: &mut dyn ScanObserver) -> Result<Vec<i64>> {
        let folders = {
            let conn = get_conn(&self.pool)?;
            video::tvshow_folders(&conn)?
        };

        let total = folders.len();
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for (i, show) in folders.iter().enumerate() {
            if !seen.contains(&show.id) && self.probe.has_nfo(&show.path, Some(TVSHOW_NFO)) {
                seen.insert(show.id);
                ids.push(show.id);
            }
            report_progress(
                observer,
                i,
                total,
                TVSHOW_PROGRESS_STRIDE,
                "Scanning TV shows for NFOs",
            );
        }

        debug!("{} of {} show folders have tvshow.nfo", ids.len(), total);
        Ok(ids)
    }

    pub fn seasons_for_shows(&self, show_ids: &[i64]) -> Result<Vec<i64>> {
        if show_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = get_conn(&self.pool)?;
        video::seasons_for_shows(&conn, show_ids)
    }

    /// Episodes with an NFO named after their media file.
    ///
    /// `show_ids` restricts the candidates to episodes of those shows. An
    /// empty restriction finds nothing rather than falling back to every
    /// episode.
    pub fn episodes_with_nfo(
        &self,
        show_ids: Option<&[i64]>,
        observer: &mut dyn ScanObserver,
    ) -> Result<Vec<i64>> {
        let episodes = {
            let conn = get_conn(&self.pool)?;
            video::episode_files(&conn, show_ids)?
        };

        let total = episodes.len();
        let mut ids = Vec::new();
        for (i, episode) in episodes.iter().enumerate() {
            if self.probe.has_sibling_nfo(&episode.path, &episode.file_name) {
                ids.push(episode.id);
            }
            report_progress(
                observer,
                i,
                total,
                EPISODE_PROGRESS_STRIDE,
                "Scanning episodes for NFOs",
            );
        }

        debug!("{} of {} episodes have an NFO", ids.len(), total);
        Ok(ids)
    }

    /// Local artwork of the given records.
    pub fn local_artwork(&self, kind: MediaKind, ids: &[i64]) -> Result<Vec<ArtworkRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = get_conn(&self.pool)?;
        video::local_artwork(&conn, kind, ids)
    }
}
