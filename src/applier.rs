//! Writes the sentinel `lasthashcheck` into the texture cache.

use spinless_common::{Error, Result};
use spinless_db::models::PendingUpdate;
use spinless_db::pool::{get_conn, DbPool, BUSY_TIMEOUT, LOCK_PROBE_TIMEOUT};
use spinless_db::queries::textures::{check_writable, set_last_hash_check};
use tracing::info;

use crate::texture::FUTURE_DATE;

/// Applies pending updates to a texture store.
pub struct Applier {
    pool: DbPool,
    label: String,
}

impl Applier {
    /// `label` names the store in lock errors, usually its path.
    pub fn new(pool: DbPool, label: impl Into<String>) -> Self {
        Self {
            pool,
            label: label.into(),
        }
    }

    /// Set every update's texture to [`FUTURE_DATE`] in one transaction.
    ///
    /// Fails with [`Error::StoreLocked`] without writing anything when another
    /// process (normally Kodi) holds the store.
    ///
    /// Returns the affected-row count SQLite reports, not `updates.len()`.
    /// The two differ when a texture row was deleted between scan and apply.
    pub fn apply(&self, updates: &[PendingUpdate]) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }

        let mut conn = get_conn(&self.pool)?;

        conn.busy_timeout(LOCK_PROBE_TIMEOUT)
            .map_err(|e| Error::store_unavailable(e.to_string()))?;
        let probe = check_writable(&conn, &self.label);
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| Error::store_unavailable(e.to_string()))?;
        probe?;

        let ids: Vec<i64> = updates.iter().map(|u| u.texture_id).collect();
        let updated = set_last_hash_check(&mut conn, &ids, FUTURE_DATE)?;

        info!("Updated lasthashcheck on {} textures", updated);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinless_db::pool::open_texture_pool;
    use spinless_db::schema::init_texture_store;
    use tempfile::tempdir;

    fn pending(id: i64) -> PendingUpdate {
        PendingUpdate {
            texture_id: id,
            url: format!("/m{id}/poster.jpg"),
            current_hash_check: None,
        }
    }

    #[test]
    fn test_apply_counts_only_rows_still_present() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Textures13.db");
        let conn = init_texture_store(&path).unwrap();
        conn.execute_batch(
            "INSERT INTO texture (id, url, lasthashcheck) VALUES (1, 'image://a/', '');",
        )
        .unwrap();

        let applier = Applier::new(open_texture_pool(&path).unwrap(), path.display().to_string());
        assert_eq!(applier.apply(&[pending(1), pending(99)]).unwrap(), 1);

        let stamp: Option<String> = conn
            .query_row("SELECT lasthashcheck FROM texture WHERE id = 1", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(stamp.as_deref(), Some(FUTURE_DATE));
    }

    #[test]
    fn test_apply_sets_future_date() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Textures13.db");
        let conn = init_texture_store(&path).unwrap();
        conn.execute_batch(
            "INSERT INTO texture (id, url, lasthashcheck) VALUES (1, 'image://a/', '');
             INSERT INTO texture (id, url, lasthashcheck) VALUES (2, 'image://b/', NULL);",
        )
        .unwrap();

        let applier = Applier::new(open_texture_pool(&path).unwrap(), path.display().to_string());
        assert_eq!(applier.apply(&[pending(1), pending(2)]).unwrap(), 2);

        let stamps: Vec<String> = conn
            .prepare("SELECT lasthashcheck FROM texture ORDER BY id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(stamps, vec![FUTURE_DATE, FUTURE_DATE]);
    }

    #[test]
    fn test_apply_nothing_skips_lock_probe() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Textures13.db");
        let holder = init_texture_store(&path).unwrap();
        holder.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let applier = Applier::new(open_texture_pool(&path).unwrap(), "Textures13.db");
        assert_eq!(applier.apply(&[]).unwrap(), 0);
    }

    #[test]
    fn test_apply_locked_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Textures13.db");
        let holder = init_texture_store(&path).unwrap();
        holder
            .execute_batch(
                "INSERT INTO texture (id, url, lasthashcheck) VALUES (1, 'image://a/', '')",
            )
            .unwrap();
        holder.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let applier = Applier::new(open_texture_pool(&path).unwrap(), "Textures13.db");
        let err = applier.apply(&[pending(1)]).unwrap_err();
        assert!(err.is_locked());
        assert!(err.to_string().contains("Textures13.db"));

        holder.execute_batch("ROLLBACK").unwrap();
        let stamp: String = holder
            .query_row("SELECT lasthashcheck FROM texture WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stamp, "");
    }
}
