//! Hymn and category queries. Each method runs in its own scoped transaction
//! via [`Database::with_tx`]; ordering clauses here are the single source of
//! truth for how lists appear in the UI.

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::models::{Category, Hymn};

use super::connection::Database;

/// Fixed column list shared by every query that hydrates a [`Hymn`]. Keeping
/// one list (and one mapper) means a schema change breaks loudly in a single
/// place instead of skewing some queries.
pub(crate) const HYMN_COLUMNS: &str = "h.id, h.number, h.title, h.verses, h.chorus, \
     h.category_id, c.name AS category_name, h.author, h.composer, h.year, h.copyright, \
     h.scripture_reference, h.notes, h.created_at, h.updated_at";

/// Hydrate a [`Hymn`] from a row selected with [`HYMN_COLUMNS`].
pub(crate) fn hymn_from_row(row: &Row<'_>) -> rusqlite::Result<Hymn> {
    Ok(Hymn {
        id: row.get(0)?,
        number: row.get(1)?,
        title: row.get(2)?,
        verses: row.get(3)?,
        chorus: row.get(4)?,
        category_id: row.get(5)?,
        category_name: row.get(6)?,
        author: row.get(7)?,
        composer: row.get(8)?,
        year: row.get(9)?,
        copyright: row.get(10)?,
        scripture_reference: row.get(11)?,
        notes: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

impl Database {
    /// Exact lookup by hymnal number. `Ok(None)` means the number is simply
    /// not in the database.
    pub fn fetch_hymn_by_number(&self, number: i64) -> Result<Option<Hymn>> {
        self.with_tx(|tx| {
            tx.query_row(
                &format!(
                    "SELECT {HYMN_COLUMNS}
                     FROM hymns h
                     LEFT JOIN categories c ON c.id = h.category_id
                     WHERE h.number = ?1"
                ),
                [number],
                hymn_from_row,
            )
            .optional()
            .context("failed to fetch hymn by number")
        })
    }

    /// Every hymn ordered by number, optionally capped.
    pub fn fetch_all_hymns(&self, limit: Option<usize>) -> Result<Vec<Hymn>> {
        // SQLite treats a negative LIMIT as "no limit".
        let cap = limit.map_or(-1, |n| n as i64);
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HYMN_COLUMNS}
                     FROM hymns h
                     LEFT JOIN categories c ON c.id = h.category_id
                     ORDER BY h.number
                     LIMIT ?1"
                ))
                .context("failed to prepare hymn listing query")?;

            let hymns = stmt
                .query_map([cap], hymn_from_row)
                .context("failed to iterate hymns")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect hymns")?;

            Ok(hymns)
        })
    }

    /// Full-text search over title, verses, author, and composer, ordered by
    /// hymn number. User input is normalized into quoted terms first, so
    /// punctuation can never be parsed as FTS5 syntax; a blank query returns
    /// an empty list without touching the database.
    pub fn search_hymns(&self, query: &str) -> Result<Vec<Hymn>> {
        let match_expr = fts_match_expr(query);
        if match_expr.is_empty() {
            return Ok(Vec::new());
        }

        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HYMN_COLUMNS}
                     FROM hymns_fts
                     JOIN hymns h ON h.id = hymns_fts.rowid
                     LEFT JOIN categories c ON c.id = h.category_id
                     WHERE hymns_fts MATCH ?1
                     ORDER BY h.number"
                ))
                .context("failed to prepare search query")?;

            let hymns = stmt
                .query_map([&match_expr], hymn_from_row)
                .context("failed to run search")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect search results")?;

            log::debug!("search {query:?} matched {} hymns", hymns.len());
            Ok(hymns)
        })
    }

    /// Hymns assigned to one category, ordered by number.
    pub fn fetch_hymns_by_category(&self, category_id: i64) -> Result<Vec<Hymn>> {
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {HYMN_COLUMNS}
                     FROM hymns h
                     LEFT JOIN categories c ON c.id = h.category_id
                     WHERE h.category_id = ?1
                     ORDER BY h.number"
                ))
                .context("failed to prepare category hymns query")?;

            let hymns = stmt
                .query_map([category_id], hymn_from_row)
                .context("failed to iterate category hymns")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect category hymns")?;

            Ok(hymns)
        })
    }

    /// All categories ordered by name, each with its aggregated hymn count.
    pub fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.with_tx(|tx| {
            let mut stmt = tx
                .prepare(
                    "SELECT c.id, c.name, c.description, COUNT(h.id) AS hymn_count, c.created_at
                     FROM categories c
                     LEFT JOIN hymns h ON h.category_id = c.id
                     GROUP BY c.id, c.name, c.description, c.created_at
                     ORDER BY c.name",
                )
                .context("failed to prepare category query")?;

            let categories = stmt
                .query_map(params![], |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        hymn_count: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })
                .context("failed to iterate categories")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect categories")?;

            Ok(categories)
        })
    }
}

/// Turn raw user input into an FTS5 MATCH expression: the input is split on
/// anything that is not a word character, and each surviving term is
/// double-quoted, leaving the terms implicitly ANDed. Punctuation-only input
/// collapses to an empty string, which callers treat as "no query".
fn fts_match_expr(query: &str) -> String {
    query
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|term| !term.is_empty())
        .map(|term| format!("\"{term}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::fts_match_expr;

    #[test]
    fn terms_are_quoted_and_joined() {
        assert_eq!(fts_match_expr("amazing grace"), "\"amazing\" \"grace\"");
    }

    #[test]
    fn fts_syntax_is_neutralized() {
        assert_eq!(fts_match_expr("grace\" OR \"x"), "\"grace\" \"OR\" \"x\"");
        assert_eq!(fts_match_expr("NEAR("), "\"NEAR\"");
        assert_eq!(fts_match_expr("  \"\"()*  "), "");
    }

    #[test]
    fn apostrophes_stay_inside_terms() {
        assert_eq!(fts_match_expr("'Tis grace"), "\"'Tis\" \"grace\"");
    }

    #[test]
    fn blank_input_yields_empty_expression() {
        assert_eq!(fts_match_expr("   "), "");
    }
}
