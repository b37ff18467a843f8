//! Selection of the textures to protect.
//!
//! Walks the video library according to a [`SelectionPolicy`], collects the
//! local artwork of every selected record and matches it against the texture
//! cache. Nothing is written; the result is handed to the
//! [`Applier`](crate::applier::Applier).

pub mod observer;

use serde::Serialize;
use spinless_common::{MediaKind, NfoProbe, Result};
use spinless_db::models::{ArtworkRow, PendingUpdate};
use spinless_db::pool::{get_conn, DbPool};
use tracing::{debug, info};

use crate::config::{EpisodeNfoLogic, SelectionPolicy};
use crate::library::VideoLibrary;
use crate::texture::{resolve_updates, TextureIndex};

pub use observer::{NullObserver, RecordingObserver, ScanObserver, ScanProgress};

/// Outcome of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub movie_count: usize,
    pub tvshow_count: usize,
    pub season_count: usize,
    pub episode_count: usize,
    /// Local artwork rows considered across all kinds
    pub artwork_count: usize,
    /// In discovery order: movies, shows, seasons, episodes
    pub textures_to_update: Vec<PendingUpdate>,
    /// Artwork rows with no texture in the cache
    pub not_cached: usize,
}

/// Scanner over a video library and its texture cache.
pub struct Scanner {
    library: VideoLibrary,
    texture_pool: DbPool,
}

impl Scanner {
    pub fn new(video_pool: DbPool, texture_pool: DbPool, probe: NfoProbe) -> Self {
        Self {
            library: VideoLibrary::new(video_pool, probe),
            texture_pool,
        }
    }

    /// Run a scan. Any store failure aborts it.
    pub fn scan(
        &self,
        policy: &SelectionPolicy,
        observer: &mut dyn ScanObserver,
    ) -> Result<ScanResult> {
        info!("Starting scan");
        debug!("Selection: {:?}", policy);

        let mut result = ScanResult::default();
        let mut artwork: Vec<ArtworkRow> = Vec::new();

        if policy.include_movies {
            observer.log("Scanning movies...");
            let movie_ids = if policy.update_all_local {
                let ids = self.library.all_ids(MediaKind::Movie)?;
                observer.log(&format!("  Found {} movies (all)", ids.len()));
                ids
            } else {
                let ids = self.library.movies_with_nfo(observer)?;
                observer.log(&format!("  Found {} movies with NFO files", ids.len()));
                ids
            };

            result.movie_count = movie_ids.len();
            self.collect_artwork(MediaKind::Movie, &movie_ids, "movie", &mut artwork, observer)?;
        }

        if policy.include_tvshows {
            observer.log("\nScanning TV shows...");
            let show_ids = if policy.update_all_local {
                let ids = self.library.all_ids(MediaKind::TvShow)?;
                observer.log(&format!("  Found {} TV shows (all)", ids.len()));
                ids
            } else {
                let ids = self.library.tvshows_with_nfo(observer)?;
                observer.log(&format!("  Found {} TV shows with tvshow.nfo", ids.len()));
                ids
            };

            result.tvshow_count = show_ids.len();
            self.collect_artwork(MediaKind::TvShow, &show_ids, "TV show", &mut artwork, observer)?;

            if policy.include_seasons {
                observer.log("\nScanning seasons...");
                let season_ids = if policy.update_all_local {
                    let ids = self.library.all_ids(MediaKind::Season)?;
                    observer.log(&format!("  Found {} seasons (all)", ids.len()));
                    ids
                } else {
                    let ids = self.library.seasons_for_shows(&show_ids)?;
                    observer.log(&format!(
                        "  Found {} seasons for shows with tvshow.nfo",
                        ids.len()
                    ));
                    ids
                };

                result.season_count = season_ids.len();
                self.collect_artwork(
                    MediaKind::Season,
                    &season_ids,
                    "season",
                    &mut artwork,
                    observer,
                )?;
            }

            if policy.include_episodes {
                observer.log("\nScanning episodes...");
                let episode_ids = if policy.update_all_local {
                    let ids = self.library.all_ids(MediaKind::Episode)?;
                    observer.log(&format!("  Found {} episodes (all)", ids.len()));
                    ids
                } else {
                    match policy.episode_nfo_logic {
                        EpisodeNfoLogic::RequireShowNfo => {
                            let ids = self.library.episodes_with_nfo(Some(&show_ids), observer)?;
                            observer.log(&format!(
                                "  Found {} episodes with NFO (in shows with tvshow.nfo)",
                                ids.len()
                            ));
                            ids
                        }
                        EpisodeNfoLogic::PerItem => {
                            let ids = self.library.episodes_with_nfo(None, observer)?;
                            observer.log(&format!("  Found {} episodes with NFO files", ids.len()));
                            ids
                        }
                    }
                };

                result.episode_count = episode_ids.len();
                self.collect_artwork(
                    MediaKind::Episode,
                    &episode_ids,
                    "episode",
                    &mut artwork,
                    observer,
                )?;
            }
        }

        result.artwork_count = artwork.len();

        if !artwork.is_empty() {
            observer.log("\nFinding textures to update...");
            let index = {
                let conn = get_conn(&self.texture_pool)?;
                TextureIndex::load(&conn)?
            };
            debug!("Loaded {} textures", index.len());

            let (updates, not_cached) = resolve_updates(&index, &artwork);
            result.textures_to_update = updates;
            result.not_cached = not_cached;

            observer.log(&format!(
                "  Textures needing update: {}",
                result.textures_to_update.len()
            ));
            observer.log(&format!("  Artwork not yet cached: {}", result.not_cached));
        }

        info!(
            "Scan complete: {} artwork entries, {} textures to update, {} not cached",
            result.artwork_count,
            result.textures_to_update.len(),
            result.not_cached
        );
        Ok(result)
    }

    fn collect_artwork(
        &self,
        kind: MediaKind,
        ids: &[i64],
        label: &str,
        artwork: &mut Vec<ArtworkRow>,
        observer: &mut dyn ScanObserver,
    ) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let rows = self.library.local_artwork(kind, ids)?;
        observer.log(&format!("  Found {} local {} artwork entries", rows.len(), label));
        artwork.extend(rows);
        Ok(())
    }
}
