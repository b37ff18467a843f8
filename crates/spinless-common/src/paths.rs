//! Path utilities for locating NFO metadata files.
//!
//! Kodi stores folder paths as the host that scanned them saw them. When the
//! tool runs under WSL against a Windows Kodi install those paths look like
//! `C:\Movies\Film\`, so they are translated to the `/mnt/c/...` mount before
//! touching the filesystem.
//!
//! Probing never fails: a folder that is missing, unreadable, or not a
//! directory simply has no NFO.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;
use walkdir::WalkDir;

use crate::env::{Environment, Platform};

/// Extension of Kodi metadata files.
pub const NFO_EXTENSION: &str = "nfo";

/// NFO file name Kodi expects in a TV show folder.
pub const TVSHOW_NFO: &str = "tvshow.nfo";

/// Translate a Windows drive path to its WSL mount point.
///
/// Returns `None` when `path` does not start with a drive letter.
///
/// # Examples
///
/// ```
/// use spinless_common::paths::translate_wsl_path;
///
/// assert_eq!(
///     translate_wsl_path(r"D:\Movies\Alien (1979)\").as_deref(),
///     Some("/mnt/d/Movies/Alien (1979)/")
/// );
/// assert_eq!(translate_wsl_path("/srv/movies"), None);
/// ```
pub fn translate_wsl_path(path: &str) -> Option<String> {
    let mut chars = path.chars();
    let drive = chars.next()?;
    if chars.next()? != ':' || !drive.is_ascii_alphabetic() {
        return None;
    }
    let rest = &path[2..];
    Some(format!(
        "/mnt/{}{}",
        drive.to_ascii_lowercase(),
        rest.replace('\\', "/")
    ))
}

/// Check if a path has the NFO extension.
///
/// The match is exact, the way a shell glob behaves on a case-sensitive
/// filesystem. Use [`is_nfo_file_ignore_case`] for Windows hosts.
///
/// ```
/// use std::path::Path;
/// use spinless_common::paths::is_nfo_file;
///
/// assert!(is_nfo_file(Path::new("movie.nfo")));
/// assert!(!is_nfo_file(Path::new("MOVIE.NFO")));
/// assert!(!is_nfo_file(Path::new("movie.mkv")));
/// ```
pub fn is_nfo_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == NFO_EXTENSION)
        .unwrap_or(false)
}

/// Check if a path has the NFO extension, ignoring ASCII case.
///
/// ```
/// use std::path::Path;
/// use spinless_common::paths::is_nfo_file_ignore_case;
///
/// assert!(is_nfo_file_ignore_case(Path::new("MOVIE.NFO")));
/// assert!(!is_nfo_file_ignore_case(Path::new("movie.mkv")));
/// ```
pub fn is_nfo_file_ignore_case(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(NFO_EXTENSION))
        .unwrap_or(false)
}

/// Name of the NFO that sits next to a media file.
///
/// ```
/// use spinless_common::paths::nfo_name_for;
///
/// assert_eq!(nfo_name_for("Show.S01E02.720p.mkv"), "Show.S01E02.720p.nfo");
/// assert_eq!(nfo_name_for("noext"), "noext.nfo");
/// ```
pub fn nfo_name_for(media_file_name: &str) -> String {
    let stem = Path::new(media_file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}", stem, NFO_EXTENSION)
}

/// Filesystem probe answering "does this folder carry an NFO?".
#[derive(Debug, Clone)]
pub struct NfoProbe {
    wsl: bool,
    ignore_case: bool,
}

impl NfoProbe {
    /// Create a probe for the given environment.
    ///
    /// WSL detection runs once here rather than per path. Extension
    /// matching ignores case only on Windows hosts.
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self {
            wsl: env.is_wsl(),
            ignore_case: env.platform() == Platform::Windows,
        }
    }

    /// Resolve a stored Kodi path to a path this process can open.
    pub fn resolve(&self, stored: &str) -> PathBuf {
        if self.wsl {
            if let Some(translated) = translate_wsl_path(stored) {
                return PathBuf::from(translated);
            }
        }
        PathBuf::from(stored)
    }

    /// Check whether `folder` contains an NFO.
    ///
    /// With `nfo_name`, that exact file must exist. Without it, any
    /// non-hidden `*.nfo` directly inside the folder counts.
    pub fn has_nfo(&self, folder: &str, nfo_name: Option<&str>) -> bool {
        if folder.is_empty() {
            return false;
        }
        let dir = self.resolve(folder);
        if !dir.is_dir() {
            trace!("Not a directory: {:?}", dir);
            return false;
        }

        match nfo_name {
            Some(name) => dir.join(name).exists(),
            None => any_nfo_in(&dir, self.ignore_case),
        }
    }

    /// Check whether the NFO matching `media_file_name` exists in `folder`.
    pub fn has_sibling_nfo(&self, folder: &str, media_file_name: &str) -> bool {
        if folder.is_empty() {
            return false;
        }
        let dir = self.resolve(folder);
        if !dir.is_dir() {
            trace!("Not a directory: {:?}", dir);
            return false;
        }
        dir.join(nfo_name_for(media_file_name)).exists()
    }
}

fn any_nfo_in(dir: &Path, ignore_case: bool) -> bool {
    let matches: fn(&Path) -> bool = if ignore_case {
        is_nfo_file_ignore_case
    } else {
        is_nfo_file
    };
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|entry| {
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            !hidden && matches(entry.path())
        })
}
