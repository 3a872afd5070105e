//! Database handle and connection lifecycle. The handle stores paths, never a
//! live connection: every public operation opens its own connection, runs in
//! one transaction, commits on success, and rolls back when dropped on an
//! error path. SQLite's own file locking is the only coordination required
//! with a single process and no background writers.

use std::fs;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::config::AppPaths;

use super::schema::{DEFAULT_CATEGORIES, DEFAULT_SETTINGS, SAMPLE_HYMNS, SCHEMA};

/// Handle to the hymnal database. Cheap to clone around; all state lives in
/// the database file the [`AppPaths`] point at.
#[derive(Debug, Clone)]
pub struct Database {
    paths: AppPaths,
}

impl Database {
    /// Wrap the given paths without touching the filesystem. Call
    /// [`Database::initialize`] before issuing queries.
    pub fn new(paths: AppPaths) -> Self {
        Self { paths }
    }

    /// Filesystem layout this database lives in.
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Create the data directory and schema, and seed default categories,
    /// sample hymns, and settings when the database file did not exist yet.
    /// Safe to call on every startup: the schema statements are all
    /// `IF NOT EXISTS` and re-runs never re-seed.
    pub fn initialize(&self) -> Result<()> {
        let db_path = self.paths.database_path();
        let fresh = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        let mut conn = self.connect()?;
        let tx = conn
            .transaction()
            .context("failed to begin schema transaction")?;

        tx.execute_batch(SCHEMA)
            .context("failed to create database schema")?;

        if fresh {
            seed(&tx)?;
        }

        tx.commit().context("failed to commit schema transaction")?;
        log::info!("database ready at {} (fresh: {fresh})", db_path.display());
        Ok(())
    }

    /// Open a raw connection with foreign keys enabled. Public so one-shot
    /// tooling (the bulk importer) can run multi-statement work the operation
    /// methods do not cover.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(self.paths.database_path())
            .context("failed to open SQLite database")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("failed to enable foreign keys")?;
        Ok(conn)
    }

    /// Run one operation in its own connection and transaction. Commit only
    /// happens after the closure succeeds; an `Err` return drops the
    /// transaction, which rolls it back, and the connection closes on every
    /// exit path.
    pub(crate) fn with_tx<T>(&self, op: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().context("failed to begin transaction")?;
        let value = op(&tx)?;
        tx.commit().context("failed to commit transaction")?;
        Ok(value)
    }
}

/// Populate a brand-new database with the default categories, the three
/// sample hymns, and the default settings.
fn seed(tx: &Transaction) -> Result<()> {
    for (name, description) in DEFAULT_CATEGORIES {
        tx.execute(
            "INSERT OR IGNORE INTO categories (name, description) VALUES (?1, ?2)",
            params![name, description],
        )
        .context("failed to seed category")?;
    }

    for hymn in SAMPLE_HYMNS {
        let category_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM categories WHERE name = ?1",
                [hymn.category],
                |row| row.get(0),
            )
            .optional()
            .context("failed to look up seed category")?;

        tx.execute(
            "INSERT OR IGNORE INTO hymns
                 (number, title, verses, chorus, category_id, author, composer, year,
                  scripture_reference)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                hymn.number,
                hymn.title,
                hymn.verses,
                hymn.chorus,
                category_id,
                hymn.author,
                hymn.composer,
                hymn.year,
                hymn.scripture_reference,
            ],
        )
        .context("failed to seed sample hymn")?;
    }

    for (key, value, description) in DEFAULT_SETTINGS {
        tx.execute(
            "INSERT OR IGNORE INTO settings (key, value, description) VALUES (?1, ?2, ?3)",
            params![key, value, description],
        )
        .context("failed to seed setting")?;
    }

    log::info!(
        "seeded {} categories, {} sample hymns, {} settings",
        DEFAULT_CATEGORIES.len(),
        SAMPLE_HYMNS.len(),
        DEFAULT_SETTINGS.len()
    );
    Ok(())
}
