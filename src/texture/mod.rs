//! Kodi texture cache matching.

mod matcher;
mod url;

pub use matcher::{needs_update, resolve_updates, TextureIndex, FUTURE_DATE};
pub use url::{normalize_texture_url, IMAGE_SCHEME};
