//! Favorites, the recently-viewed log, and per-hymn usage counters. These are
//! the only tables the UI mutates directly, so the contracts are deliberately
//! explicit: booleans report whether a row actually changed, and view
//! recording bundles its two writes into one transaction.

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::models::{Hymn, UsageStat};

use super::connection::Database;
use super::hymns::{hymn_from_row, HYMN_COLUMNS};

impl Database {
    /// Mark a hymn as favorite. `Ok(true)` when a row was inserted,
    /// `Ok(false)` when the hymn was already a favorite (the unique
    /// constraint makes the re-add a no-op). Failures, including an unknown
    /// `hymn_id`, surface as `Err`.
    pub fn add_favorite(&self, hymn_id: i64) -> Result<bool> {
        self.with_tx(|tx| {
            let inserted = tx
                .execute(
                    "INSERT OR IGNORE INTO favorites (hymn_id) VALUES (?1)",
                    [hymn_id],
                )
                .context("failed to add favorite")?;
            Ok(inserted > 0)
        })
    }

    /// Remove a favorite. `Ok(true)` iff a row was deleted.
    pub fn remove_favorite(&self, hymn_id: i64) -> Result<bool> {
        self.with_tx(|tx| {
            let deleted = tx
                .execute("DELETE FROM favorites WHERE hymn_id = ?1", [hymn_id])
                .context("failed to remove favorite")?;
            Ok(deleted > 0)
        })
    }

    /// Whether the hymn is currently favorited.
    pub fn is_favorite(&self, hymn_id: i64) -> Result<bool> {
        self.with_tx(|tx| {
            let count: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM favorites WHERE hymn_id = ?1",
                    [hymn_id],
                    |row| row.get(0),
                )
                .context("failed to check favorite")?;
            Ok(count > 0)
        })
    }

    /// Favorited hymns, most recently added first.
    pub fn fetch_favorites(&self) -> Result<Vec<Hymn>> {
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HYMN_COLUMNS}
                     FROM favorites f
                     JOIN hymns h ON h.id = f.hymn_id
                     LEFT JOIN categories c ON c.id = h.category_id
                     ORDER BY f.added_at DESC, f.id DESC"
                ))
                .context("failed to prepare favorites query")?;

            let hymns = stmt
                .query_map(params![], hymn_from_row)
                .context("failed to iterate favorites")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect favorites")?;

            Ok(hymns)
        })
    }

    /// Record that a hymn was viewed: append a row to the view log and bump
    /// its usage counter (creating it at 1 on the first view). Both writes
    /// share one transaction, so a failure rolls back the pair.
    pub fn add_recently_viewed(&self, hymn_id: i64) -> Result<()> {
        self.with_tx(|tx| {
            tx.execute(
                "INSERT INTO recently_viewed (hymn_id) VALUES (?1)",
                [hymn_id],
            )
            .context("failed to append view log entry")?;

            tx.execute(
                "INSERT INTO usage_stats (hymn_id, view_count, last_viewed)
                 VALUES (?1, 1, datetime('now'))
                 ON CONFLICT(hymn_id) DO UPDATE SET
                     view_count = view_count + 1,
                     last_viewed = excluded.last_viewed",
                [hymn_id],
            )
            .context("failed to update usage counter")?;

            Ok(())
        })
    }

    /// Distinct recently-viewed hymns, most recent first, capped at `limit`.
    /// Ordering keys on the append-only row id: `viewed_at` only has
    /// one-second granularity, and back-to-back views must stay ordered.
    pub fn fetch_recently_viewed(&self, limit: usize) -> Result<Vec<Hymn>> {
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HYMN_COLUMNS}, MAX(rv.id) AS last_view
                     FROM recently_viewed rv
                     JOIN hymns h ON h.id = rv.hymn_id
                     LEFT JOIN categories c ON c.id = h.category_id
                     GROUP BY h.id
                     ORDER BY last_view DESC
                     LIMIT ?1"
                ))
                .context("failed to prepare recently viewed query")?;

            let hymns = stmt
                .query_map([limit as i64], hymn_from_row)
                .context("failed to iterate recently viewed")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect recently viewed")?;

            Ok(hymns)
        })
    }

    /// View counter for one hymn; `Ok(None)` when it has never been viewed.
    pub fn usage_stat(&self, hymn_id: i64) -> Result<Option<UsageStat>> {
        self.with_tx(|tx| {
            tx.query_row(
                "SELECT hymn_id, view_count, last_viewed
                 FROM usage_stats
                 WHERE hymn_id = ?1",
                [hymn_id],
                |row| {
                    Ok(UsageStat {
                        hymn_id: row.get(0)?,
                        view_count: row.get(1)?,
                        last_viewed: row.get(2)?,
                    })
                },
            )
            .optional()
            .context("failed to fetch usage stat")
        })
    }

    /// Most-viewed hymns, capped at `limit`.
    pub fn fetch_popular_hymns(&self, limit: usize) -> Result<Vec<Hymn>> {
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HYMN_COLUMNS}
                     FROM usage_stats u
                     JOIN hymns h ON h.id = u.hymn_id
                     LEFT JOIN categories c ON c.id = h.category_id
                     ORDER BY u.view_count DESC, u.last_viewed DESC
                     LIMIT ?1"
                ))
                .context("failed to prepare popular hymns query")?;

            let hymns = stmt
                .query_map([limit as i64], hymn_from_row)
                .context("failed to iterate popular hymns")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect popular hymns")?;

            Ok(hymns)
        })
    }
}
