//! Key-value application settings. Keys are conventions shared with the UI
//! (`theme`, `font_size`, `show_hymn_numbers`, `auto_backup`,
//! `backup_frequency`, `presentation_font_size`, `recent_hymns_limit`);
//! nothing here enforces the set.

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::Database;

impl Database {
    /// Read one setting; `Ok(None)` when the key has never been set.
    pub fn fetch_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_tx(|tx| {
            tx.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .context("failed to fetch setting")
        })
    }

    /// Insert or update a setting, refreshing its modification timestamp. The
    /// seeded description survives updates because the conflict clause only
    /// touches value and timestamp.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_tx(|tx| {
            tx.execute(
                "INSERT INTO settings (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )
            .context("failed to store setting")?;
            Ok(())
        })
    }
}
