//! Database connection pool management.
//!
//! Both stores are owned by Kodi and must already exist. The video library is
//! opened read-only; the texture cache read-write but without `CREATE`, so a
//! wrong path never leaves an empty database behind.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use spinless_common::{Error, Result};
use tracing::debug;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// How long a statement waits on a lock held by another connection.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Busy timeout used when probing whether Kodi holds the texture store.
pub const LOCK_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

const POOL_SIZE: u32 = 2;
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a read-only pool over a Kodi video library database.
///
/// # Example
///
/// ```no_run
/// use spinless_db::pool::open_video_pool;
/// use std::path::Path;
///
/// let pool = open_video_pool(Path::new("MyVideos131.db")).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn open_video_pool(db_path: &Path) -> Result<DbPool> {
    build_pool(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

/// Open a read-write pool over a Kodi texture cache database.
pub fn open_texture_pool(db_path: &Path) -> Result<DbPool> {
    build_pool(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn build_pool(db_path: &Path, flags: OpenFlags) -> Result<DbPool> {
    if !db_path.is_file() {
        return Err(Error::store_unavailable(format!(
            "Database not found: {}",
            db_path.display()
        )));
    }

    debug!("Opening database pool for {}", db_path.display());
    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(flags)
        .with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));

    Pool::builder()
        .max_size(POOL_SIZE)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)
        .map_err(|e| {
            Error::store_unavailable(format!(
                "Failed to open {}: {}",
                db_path.display(),
                e
            ))
        })
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get().map_err(|e| {
        Error::store_unavailable(format!("Failed to get connection from pool: {}", e))
    })
}
