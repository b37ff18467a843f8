//! Texture cache queries.
//!
//! Kodi re-hashes cached local artwork once `lasthashcheck` is older than a
//! day, which wakes the disk holding the source image. These queries read the
//! cache and push `lasthashcheck` forward.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, TransactionBehavior};
use spinless_common::{Error, Result};
use tracing::debug;

use crate::models::TextureRecord;

/// Get every texture row.
///
/// Rows with a NULL url are skipped. `lasthashcheck` is read whatever its
/// storage class: NULL is absent, numbers are rendered as text.
pub fn load_textures(conn: &Connection) -> Result<Vec<TextureRecord>> {
    let mut stmt = conn
        .prepare("SELECT id, url, lasthashcheck FROM texture ORDER BY id")
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let id: i64 = row.get(0)?;
            let url: Option<String> = row.get(1)?;
            let last_hash_check = match row.get_ref(2)? {
                ValueRef::Null => None,
                ValueRef::Integer(i) => Some(i.to_string()),
                ValueRef::Real(f) => Some(f.to_string()),
                ValueRef::Text(t) | ValueRef::Blob(t) => {
                    Some(String::from_utf8_lossy(t).into_owned())
                }
            };
            Ok(url.map(|url| TextureRecord {
                id,
                url,
                last_hash_check,
            }))
        })
        .map_err(|e| Error::store_unavailable(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    Ok(rows.into_iter().flatten().collect())
}

/// Verify that no other connection holds a write lock.
///
/// Opens and immediately rolls back an `IMMEDIATE` transaction. The caller
/// sets the busy timeout that bounds the wait. `label` names the database in
/// the [`Error::StoreLocked`] message.
pub fn check_writable(conn: &Connection, label: &str) -> Result<()> {
    if let Err(e) = conn.execute_batch("BEGIN IMMEDIATE") {
        return Err(match e.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                Error::store_locked(label)
            }
            _ => Error::store_unavailable(e.to_string()),
        });
    }

    conn.execute_batch("ROLLBACK")
        .map_err(|e| Error::store_unavailable(e.to_string()))
}

/// Set `lasthashcheck` to `stamp` for every texture id, atomically.
///
/// Returns the summed affected-row count. Any failure rolls the whole batch
/// back.
pub fn set_last_hash_check(
    conn: &mut Connection,
    texture_ids: &[i64],
    stamp: &str,
) -> Result<usize> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    let mut updated = 0;
    {
        let mut stmt = tx
            .prepare("UPDATE texture SET lasthashcheck = ?1 WHERE id = ?2")
            .map_err(|e| Error::store_unavailable(e.to_string()))?;

        for id in texture_ids {
            updated += stmt
                .execute(rusqlite::params![stamp, id])
                .map_err(|e| Error::store_unavailable(e.to_string()))?;
        }
    }

    tx.commit()
        .map_err(|e| Error::store_unavailable(e.to_string()))?;

    debug!("Set lasthashcheck on {} textures", updated);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{create_texture_schema, init_texture_store};
    use rusqlite::params;
    use std::time::Duration;
    use tempfile::tempdir;

    fn textures() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_texture_schema(&conn).unwrap();
        conn
    }

    fn hash_check(conn: &Connection, id: i64) -> Option<String> {
        conn.query_row(
            "SELECT lasthashcheck FROM texture WHERE id = ?",
            [id],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_load_textures() {
        let conn = textures();
        conn.execute_batch(
            "INSERT INTO texture (id, url, lasthashcheck) VALUES (7, 'image://%2Fm1%2Fposter.jpg/', '');
             INSERT INTO texture (id, url, lasthashcheck) VALUES (8, 'image://%2Fm2%2Fposter.jpg/', NULL);
             INSERT INTO texture (id, url, lasthashcheck) VALUES (9, 'image://%2Fm3%2Fposter.jpg/', '2024-05-01 10:00:00');
             INSERT INTO texture (id, url, lasthashcheck) VALUES (10, NULL, '');",
        )
        .unwrap();

        let rows = load_textures(&conn).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, 7);
        assert_eq!(rows[0].last_hash_check.as_deref(), Some(""));
        assert_eq!(rows[1].last_hash_check, None);
        assert_eq!(rows[2].last_hash_check.as_deref(), Some("2024-05-01 10:00:00"));
    }

    #[test]
    fn test_load_textures_tolerates_numeric_hash_check() {
        let conn = textures();
        conn.execute(
            "INSERT INTO texture (id, url, lasthashcheck) VALUES (1, 'image://x/', ?1)",
            params![20240501_i64],
        )
        .unwrap();

        let rows = load_textures(&conn).unwrap();
        assert_eq!(rows[0].last_hash_check.as_deref(), Some("20240501"));
    }

    #[test]
    fn test_set_last_hash_check() {
        let mut conn = textures();
        conn.execute_batch(
            "INSERT INTO texture (id, url, lasthashcheck) VALUES (1, 'a', '');
             INSERT INTO texture (id, url, lasthashcheck) VALUES (2, 'b', NULL);
             INSERT INTO texture (id, url, lasthashcheck) VALUES (3, 'c', '2020-01-01 00:00:00');",
        )
        .unwrap();

        let updated = set_last_hash_check(&mut conn, &[1, 2], "2099-01-01 00:00:00").unwrap();
        assert_eq!(updated, 2);
        assert_eq!(hash_check(&conn, 1).as_deref(), Some("2099-01-01 00:00:00"));
        assert_eq!(hash_check(&conn, 2).as_deref(), Some("2099-01-01 00:00:00"));
        assert_eq!(hash_check(&conn, 3).as_deref(), Some("2020-01-01 00:00:00"));
    }

    #[test]
    fn test_set_last_hash_check_empty() {
        let mut conn = textures();
        assert_eq!(set_last_hash_check(&mut conn, &[], "2099-01-01 00:00:00").unwrap(), 0);
    }

    #[test]
    fn test_check_writable_unlocked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Textures13.db");
        let conn = init_texture_store(&path).unwrap();

        check_writable(&conn, "Textures13.db").unwrap();
        // The probe must not leave a transaction open
        assert!(conn.is_autocommit());
    }

    #[test]
    fn test_check_writable_locked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Textures13.db");
        let holder = init_texture_store(&path).unwrap();
        holder.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.busy_timeout(Duration::from_millis(100)).unwrap();

        let err = check_writable(&conn, "Textures13.db").unwrap_err();
        assert!(err.is_locked());

        holder.execute_batch("ROLLBACK").unwrap();
        check_writable(&conn, "Textures13.db").unwrap();
    }
}
