//! Database query modules.
//!
//! - video: read-only queries over Kodi's video library
//! - textures: texture cache reads, the lock probe, and the hash-check update

pub mod textures;
pub mod video;

/// Upper bound on bound parameters per `IN (...)` statement.
///
/// SQLite builds before 3.32 cap a statement at 999 variables.
pub(crate) const MAX_PARAMS_PER_QUERY: usize = 500;

/// `?,?,...,?` with `count` placeholders.
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
        assert_eq!(placeholders(0), "");
    }
}
