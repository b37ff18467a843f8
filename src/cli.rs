use clap::{Args, Parser, Subcommand};
use spinless::config::{EpisodeNfoLogic, SelectionPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spinless")]
#[command(author, version, about = "Stop Kodi from waking media drives to re-hash local artwork")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which textures would be updated, without changing anything
    Scan {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Number of pending updates to preview
        #[arg(long, default_value_t = spinless::report::DEFAULT_PREVIEW)]
        preview: usize,

        /// Output the scan result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan, then push lasthashcheck of the selected textures into the future
    Apply {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Number of pending updates to preview
        #[arg(long, default_value_t = spinless::report::DEFAULT_PREVIEW)]
        preview: usize,
    },

    /// List Kodi database folders and the databases found in them
    Locate,

    /// Write a default configuration file
    Init {
        /// Where to write it (defaults to the per-user config file)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Overrides applied on top of the configured selection.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Kodi video library database (MyVideos*.db)
    #[arg(long)]
    pub video_db: Option<PathBuf>,

    /// Kodi texture cache database (Textures*.db)
    #[arg(long)]
    pub texture_db: Option<PathBuf>,

    /// Include movies
    #[arg(long, conflicts_with = "no_movies")]
    pub movies: bool,

    /// Exclude movies
    #[arg(long)]
    pub no_movies: bool,

    /// Include TV shows
    #[arg(long)]
    pub tvshows: bool,

    /// Exclude seasons of included TV shows
    #[arg(long)]
    pub no_seasons: bool,

    /// Exclude episodes of included TV shows
    #[arg(long)]
    pub no_episodes: bool,

    /// How episodes qualify when NFO filtering is on
    #[arg(long, value_enum)]
    pub nfo_logic: Option<EpisodeNfoLogic>,

    /// Take all local artwork, ignoring NFO files
    #[arg(long)]
    pub all_local: bool,

    /// Save the resulting selection to the config file
    #[arg(long)]
    pub save: bool,
}

impl SelectionArgs {
    /// `base` with these flags applied.
    pub fn apply_to(&self, base: &SelectionPolicy) -> SelectionPolicy {
        let mut policy = base.clone();
        if self.movies {
            policy.include_movies = true;
        }
        if self.no_movies {
            policy.include_movies = false;
        }
        if self.tvshows {
            policy.include_tvshows = true;
        }
        if self.no_seasons {
            policy.include_seasons = false;
        }
        if self.no_episodes {
            policy.include_episodes = false;
        }
        if let Some(logic) = self.nfo_logic {
            policy.episode_nfo_logic = logic;
        }
        if self.all_local {
            policy.update_all_local = true;
        }
        policy
    }
}
