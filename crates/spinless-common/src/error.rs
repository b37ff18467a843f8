//! Common error types used throughout spinless.
//!
//! The variants mirror the failure classes of a scan/apply cycle: misuse of
//! the schema helpers, an unreachable or corrupt store, and a store held open
//! by another writer (usually a running Kodi instance).

/// Common error type for spinless.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A table or column outside the known Kodi schema was requested.
    #[error("Invalid schema reference: {0}")]
    InvalidSchema(String),

    /// A database could not be opened, queried, or committed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Another process holds a write lock on the database.
    #[error("Texture database is locked: {path}\nClose Kodi and try again.")]
    StoreLocked { path: String },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new InvalidSchema error.
    pub fn invalid_schema<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSchema(msg.into())
    }

    /// Create a new StoreUnavailable error.
    pub fn store_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create a new StoreLocked error for the database at `path`.
    pub fn store_locked<S: Into<String>>(path: S) -> Self {
        Self::StoreLocked { path: path.into() }
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error means another writer holds the store.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::StoreLocked { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
