pub mod locations;
pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use spinless_common::Environment;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "spinless.toml";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_database_paths(&mut config.databases);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>, env: &dyn Environment) -> Result<Config> {
    match find_config(custom_path, env) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

/// Locate the config file to read.
///
/// An explicit path always wins, even if it does not exist yet. Otherwise
/// `./spinless.toml`, then the per-user config file.
pub fn find_config(custom_path: Option<&Path>, env: &dyn Environment) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    user_config_path(env).filter(|path| path.exists())
}

/// Per-user config file: `<config dir>/spinless/config.toml`.
pub fn user_config_path(env: &dyn Environment) -> Option<PathBuf> {
    env.config_dir()
        .map(|dir| dir.join("spinless").join("config.toml"))
}

fn expand_database_paths(databases: &mut DatabaseConfig) {
    for path in [&mut databases.video, &mut databases.textures]
        .into_iter()
        .flatten()
    {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        *path = PathBuf::from(expanded);
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    for path in [&config.databases.video, &config.databases.textures]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            tracing::warn!("Configured database does not exist: {:?}", path);
        }
    }

    if config.selection.is_empty() {
        tracing::warn!("Neither movies nor TV shows are selected; scans will find nothing");
    }

    Ok(())
}
