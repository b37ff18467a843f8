//! Texture cache URL keys.

/// Scheme prefix Kodi uses for cache keys.
pub const IMAGE_SCHEME: &str = "image://";

/// Turn a raw artwork URL into the key Kodi stores in `texture.url`.
///
/// Already wrapped URLs are returned unchanged. Anything else is
/// percent-encoded with no safe characters and wrapped as
/// `image://<encoded>/`.
pub fn normalize_texture_url(url: &str) -> String {
    if url.starts_with(IMAGE_SCHEME) {
        return url.to_string();
    }
    format!("{}{}/", IMAGE_SCHEME, urlencoding::encode(url))
}
