//! Spinless-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across spinless:
//!
//! - **Media Kinds**: The four Kodi library record kinds and their schema names
//! - **Environment**: Injectable view of the host OS (platform, WSL, env vars)
//! - **Path Utilities**: WSL path translation and NFO marker probing
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use spinless_common::{MediaKind, Error, Result};
//! use spinless_common::paths::nfo_name_for;
//!
//! let kind = MediaKind::Episode;
//! assert_eq!(kind.art_media_type(), "episode");
//!
//! assert_eq!(nfo_name_for("S01E01.mkv"), "S01E01.nfo");
//!
//! fn example() -> Result<()> {
//!     Err(Error::store_unavailable("no such table: texture"))
//! }
//! ```

pub mod env;
pub mod error;
pub mod paths;
pub mod types;

pub use env::{Environment, Platform, StaticEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use paths::NfoProbe;
pub use types::*;
