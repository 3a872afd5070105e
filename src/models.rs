//! Domain models that mirror the SQLite schema and get passed throughout the
//! application. These types stay light-weight data holders constructed from a
//! fixed column list, so other layers can focus on presentation and
//! persistence logic.

use std::fmt;

/// A single hymn as stored in the `hymns` table, joined with its category
/// name. The `number` is the user-facing identity (hymn 123 stays hymn 123
/// across reimports); `id` is the database key the favorites and view-log
/// tables reference.
#[derive(Debug, Clone)]
pub struct Hymn {
    /// Primary key from the database. Favorite and view flows bubble this id
    /// back to the persistence layer.
    pub id: i64,
    /// Hymnal number. Unique, and kept as an integer so ordering is numeric
    /// instead of lexicographic (hymn 2 comes before hymn 10).
    pub number: i64,
    pub title: String,
    /// Full verse text, paragraph-separated with blank lines.
    pub verses: String,
    pub chorus: Option<String>,
    pub category_id: Option<i64>,
    /// Category name resolved by the query join; spares the UI a second
    /// lookup per hymn.
    pub category_name: Option<String>,
    pub author: Option<String>,
    pub composer: Option<String>,
    pub year: Option<i64>,
    pub copyright: Option<String>,
    pub scripture_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Hymn {
    /// Split the verse text into individual verses on blank lines.
    pub fn verse_list(&self) -> Vec<&str> {
        self.verses
            .split("\n\n")
            .map(str::trim)
            .filter(|verse| !verse.is_empty())
            .collect()
    }

    /// Full display text: every verse, then the chorus when one exists.
    pub fn full_text(&self) -> String {
        match &self.chorus {
            Some(chorus) => format!("{}\n\nChorus:\n{}", self.verses, chorus),
            None => self.verses.clone(),
        }
    }
}

impl fmt::Display for Hymn {
    /// Render as `#number Title` so lists and log lines read naturally.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number, self.title)
    }
}

/// A hymn category together with its aggregated hymn count. The count is
/// computed by the query, never stored.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub hymn_count: i64,
    pub created_at: Option<String>,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} hymns)", self.name, self.hymn_count)
    }
}

/// Per-hymn view counter row from `usage_stats`.
#[derive(Debug, Clone)]
pub struct UsageStat {
    pub hymn_id: i64,
    pub view_count: i64,
    pub last_viewed: Option<String>,
}

/// Snapshot of database-wide totals for the stats screen.
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub total_hymns: i64,
    pub total_categories: i64,
    pub total_favorites: i64,
    pub database_size_bytes: u64,
    pub database_version: String,
}
