//! Bulk hymnal import. Reads an already-downloaded hymnal JSON document
//! (fetching it is someone else's job), sanitizes the legacy content, assigns
//! a category per hymn by keyword, and replaces the hymn table through the
//! database's raw connection in a single transaction. Individual bad records
//! are logged and skipped; the batch itself is all-or-nothing.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

use crate::db::Database;
use crate::sanitize;

/// Category assigned when no keyword matches.
pub const DEFAULT_CATEGORY: &str = "Christian Life";

/// Keyword-to-category table, checked in order; the first hit wins. Keys are
/// matched against the lowercased title plus the leading slice of the
/// content.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("worship", "Worship and Praise"),
    ("praise", "Worship and Praise"),
    ("adore", "Worship and Praise"),
    ("glory", "Worship and Praise"),
    ("prayer", "Prayer"),
    ("pray", "Prayer"),
    ("faith", "Faith and Trust"),
    ("trust", "Faith and Trust"),
    ("believe", "Faith and Trust"),
    ("love", "Love of God"),
    ("salvation", "Salvation"),
    ("saved", "Salvation"),
    ("grace", "Salvation"),
    ("redeemed", "Salvation"),
    ("coming", "Second Coming"),
    ("return", "Second Coming"),
    ("service", "Service"),
    ("serve", "Service"),
    ("comfort", "Comfort and Peace"),
    ("peace", "Comfort and Peace"),
    ("rest", "Comfort and Peace"),
    ("heaven", "Heaven"),
    ("home", "Heaven"),
    ("eternal", "Heaven"),
    ("christmas", "Christmas"),
    ("bethlehem", "Christmas"),
    ("easter", "Easter"),
    ("cross", "Salvation"),
    ("calvary", "Salvation"),
    ("testimony", "Testimony"),
    ("witness", "Testimony"),
];

/// Only this many leading characters of the content take part in keyword
/// matching; openings carry the theme, and full texts mention everything.
const KEYWORD_SCAN_CHARS: usize = 500;

/// Problems reading or parsing the hymnal document, distinguishable so the
/// CLI can tell a missing file from garbage JSON.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read hymnal file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("hymnal file is not valid JSON")]
    Parse(#[from] serde_json::Error),
}

/// One hymn record as it appears in the source document. Every field is
/// optional in the wild, so validation happens during import, not parsing.
#[derive(Debug, Deserialize)]
pub struct RawHymn {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// The two shapes hymnal files come in: a bare array of hymns, or an object
/// wrapping the array with title/language metadata.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HymnalFile {
    Wrapped {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        language: Option<String>,
        hymns: Vec<RawHymn>,
    },
    Bare(Vec<RawHymn>),
}

/// Parsed hymnal document with metadata defaults filled in.
#[derive(Debug)]
pub struct HymnalDocument {
    pub title: String,
    pub language: String,
    pub hymns: Vec<RawHymn>,
}

/// Read and parse a hymnal JSON file from disk.
pub fn load_document(path: &Path) -> Result<HymnalDocument, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file: HymnalFile = serde_json::from_str(&text)?;
    Ok(match file {
        HymnalFile::Wrapped {
            title,
            language,
            hymns,
        } => HymnalDocument {
            title: title.unwrap_or_else(|| "Christ in Song".to_string()),
            language: language.unwrap_or_else(|| "English".to_string()),
            hymns,
        },
        HymnalFile::Bare(hymns) => HymnalDocument {
            title: "Christ in Song".to_string(),
            language: "English".to_string(),
            hymns,
        },
    })
}

/// Outcome counts for one import run.
#[derive(Debug)]
pub struct ImportReport {
    pub title: String,
    pub language: String,
    pub imported: usize,
    pub skipped: usize,
}

/// Replace the hymn table with the contents of the given hymnal file. Clears
/// existing hymns first (the FTS triggers scrub the search index row by row),
/// then inserts each usable record; incomplete or conflicting records are
/// logged and counted as skipped. The whole batch commits or rolls back as
/// one transaction.
pub fn import_hymns(db: &Database, path: &Path) -> Result<ImportReport> {
    let doc = load_document(path)?;
    log::info!(
        "importing hymnal {:?} ({}) with {} records",
        doc.title,
        doc.language,
        doc.hymns.len()
    );

    let mut conn = db.connect()?;
    let tx = conn
        .transaction()
        .context("failed to begin import transaction")?;

    let categories = {
        let mut stmt = tx
            .prepare("SELECT name, id FROM categories")
            .context("failed to prepare category lookup")?;
        let mut rows = stmt.query([]).context("failed to list categories")?;
        let mut map = HashMap::new();
        while let Some(row) = rows.next().context("failed to read category row")? {
            let name: String = row.get(0).context("failed to read category name")?;
            let id: i64 = row.get(1).context("failed to read category id")?;
            map.insert(name, id);
        }
        map
    };
    let fallback = categories.get(DEFAULT_CATEGORY).copied();

    tx.execute("DELETE FROM hymns", [])
        .context("failed to clear existing hymns")?;

    let mut imported = 0usize;
    let mut skipped = 0usize;

    for raw in &doc.hymns {
        let number = match raw.number {
            Some(n) if n > 0 => n,
            _ => {
                log::warn!("skipping record without a hymn number ({:?})", raw.title);
                skipped += 1;
                continue;
            }
        };

        let title = raw.title.trim();
        let verses = sanitize::html_to_text(&raw.content);
        if title.is_empty() || verses.is_empty() {
            log::warn!("skipping hymn {number} with incomplete data");
            skipped += 1;
            continue;
        }

        let category_id = assign_category(title, &verses, &categories).or(fallback);

        match tx.execute(
            "INSERT INTO hymns (number, title, verses, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![number, title, verses, category_id],
        ) {
            Ok(_) => {
                imported += 1;
                if imported % 50 == 0 {
                    log::info!("imported {imported} hymns...");
                }
            }
            Err(err) => {
                log::warn!("skipping hymn {number}: {err}");
                skipped += 1;
            }
        }
    }

    tx.commit().context("failed to commit import transaction")?;
    log::info!("import finished: {imported} imported, {skipped} skipped");

    Ok(ImportReport {
        title: doc.title,
        language: doc.language,
        imported,
        skipped,
    })
}

/// Pick a category id by scanning title and the leading content for the first
/// matching keyword. `None` when nothing matches (callers fall back to the
/// default category).
fn assign_category(title: &str, content: &str, categories: &HashMap<String, i64>) -> Option<i64> {
    let lead: String = content.chars().take(KEYWORD_SCAN_CHARS).collect();
    let haystack = format!("{} {}", title.to_lowercase(), lead.to_lowercase());

    for (keyword, category) in CATEGORY_KEYWORDS {
        if haystack.contains(keyword) {
            if let Some(id) = categories.get(*category) {
                return Some(*id);
            }
        }
    }
    None
}
