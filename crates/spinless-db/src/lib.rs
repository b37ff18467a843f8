//! Spinless-DB: Access to Kodi's video library and texture cache databases
//!
//! This crate reads Kodi's `MyVideos*.db` and reads/writes `Textures*.db`
//! using rusqlite with r2d2 connection pooling. It never creates either
//! database in production; [`schema`] only exists so tests can build
//! stores with Kodi's table layout.
//!
//! # Modules
//!
//! - `pool` - Connection pools for the two stores
//! - `models` - Rows read from (or written to) the stores
//! - `queries` - Library and texture query operations
//! - `schema` - The subset of Kodi's schema spinless touches
//!
//! # Example
//!
//! ```no_run
//! use spinless_common::MediaKind;
//! use spinless_db::pool::{get_conn, open_video_pool};
//! use spinless_db::queries::video;
//! use std::path::Path;
//!
//! let db = Path::new("/home/me/.kodi/userdata/Database/MyVideos131.db");
//! let pool = open_video_pool(db).unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let movies = video::all_ids(&conn, MediaKind::Movie).unwrap();
//! println!("{} movies", movies.len());
//! ```

pub mod models;
pub mod pool;
pub mod queries;
pub mod schema;
