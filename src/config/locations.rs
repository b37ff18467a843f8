//! Discovery of Kodi's database files.
//!
//! Kodi keeps `MyVideos<N>.db` and `Textures<N>.db` in its profile's
//! `userdata/Database` folder, where `<N>` is the schema version. Old
//! versions are left behind after upgrades, so the highest version wins.

use spinless_common::{Environment, Platform};
use std::path::{Path, PathBuf};

/// File name prefix of the video library database.
pub const VIDEO_DB_PREFIX: &str = "MyVideos";

/// File name prefix of the texture cache database.
pub const TEXTURE_DB_PREFIX: &str = "Textures";

/// Candidate Kodi database folders for the current platform, most likely first.
pub fn kodi_database_dirs(env: &dyn Environment) -> Vec<PathBuf> {
    let userdata = |base: PathBuf| base.join("Kodi").join("userdata").join("Database");
    let home = env.home_dir();
    let mut dirs = Vec::new();

    match env.platform() {
        Platform::Windows => {
            if let Some(appdata) = env.var("APPDATA") {
                dirs.push(userdata(PathBuf::from(appdata)));
            }
            if let Some(local) = env.var("LOCALAPPDATA") {
                dirs.push(userdata(PathBuf::from(local)));
            }
            if let Some(home) = home {
                dirs.push(userdata(home.join("AppData").join("Roaming")));
            }
        }
        Platform::MacOs => {
            if let Some(home) = home {
                dirs.push(userdata(home.join("Library").join("Application Support")));
            }
        }
        Platform::Linux => {
            if let Some(home) = home {
                dirs.push(home.join(".kodi").join("userdata").join("Database"));
                dirs.push(
                    home.join(".var")
                        .join("app")
                        .join("tv.kodi.Kodi")
                        .join("data")
                        .join("userdata")
                        .join("Database"),
                );
            }
            dirs.push(PathBuf::from("/storage/.kodi/userdata/Database"));
        }
        Platform::Other => {}
    }

    dirs
}

/// Find the newest `<prefix>*.db` in the first candidate folder that has one.
pub fn find_database(env: &dyn Environment, prefix: &str) -> Option<PathBuf> {
    kodi_database_dirs(env)
        .iter()
        .filter(|dir| dir.is_dir())
        .find_map(|dir| newest_database_in(dir, prefix))
}

/// Newest `<prefix>*.db` directly inside `dir`.
pub fn newest_database_in(dir: &Path, prefix: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;

    entries
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let version = schema_version(&name, prefix)?;
            Some((version, name, entry.path()))
        })
        .max_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)))
        .map(|(_, _, path)| path)
}

/// Numeric schema version of `<prefix><N>.db`; `0` when the middle is not a number.
fn schema_version(file_name: &str, prefix: &str) -> Option<u32> {
    let middle = file_name.strip_prefix(prefix)?.strip_suffix(".db")?;
    Some(middle.parse().unwrap_or(0))
}
