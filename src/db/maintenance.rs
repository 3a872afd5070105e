//! Whole-database maintenance: the stats snapshot and timestamped file
//! backups.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::OptionalExtension;

use crate::models::DatabaseStats;

use super::connection::Database;

impl Database {
    /// Row counts, on-disk size, and the schema version recorded in
    /// `db_metadata`.
    pub fn database_stats(&self) -> Result<DatabaseStats> {
        let counts = self.with_tx(|tx| {
            let total_hymns: i64 = tx
                .query_row("SELECT COUNT(*) FROM hymns", [], |row| row.get(0))
                .context("failed to count hymns")?;
            let total_categories: i64 = tx
                .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
                .context("failed to count categories")?;
            let total_favorites: i64 = tx
                .query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))
                .context("failed to count favorites")?;
            let version: Option<String> = tx
                .query_row(
                    "SELECT value FROM db_metadata WHERE key = 'version'",
                    [],
                    |row| row.get(0),
                )
                .optional()
                .context("failed to read schema version")?;
            Ok((total_hymns, total_categories, total_favorites, version))
        })?;

        let database_size_bytes = fs::metadata(self.paths().database_path())
            .context("failed to stat database file")?
            .len();

        let (total_hymns, total_categories, total_favorites, version) = counts;
        Ok(DatabaseStats {
            total_hymns,
            total_categories,
            total_favorites,
            database_size_bytes,
            database_version: version.unwrap_or_else(|| "unknown".to_string()),
        })
    }

    /// Copy the database file into the backups directory with a
    /// `YYYYMMDD_HHMMSS` suffix and return the new path.
    pub fn backup_database(&self) -> Result<PathBuf> {
        let backup_dir = self.paths().backup_dir();
        fs::create_dir_all(&backup_dir).context("failed to create backup directory")?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let destination = backup_dir.join(format!("christ_in_song_{stamp}.db"));

        fs::copy(self.paths().database_path(), &destination)
            .context("failed to copy database file")?;

        log::info!("backed up database to {}", destination.display());
        Ok(destination)
    }
}
