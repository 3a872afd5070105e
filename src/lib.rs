//! Core library surface for the Christ In Song hymnal application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as one-off tooling can reuse the same pieces: path
//! resolution, the SQLite persistence layer, the domain models, content
//! sanitization, and the bulk importer.

pub mod config;
pub mod db;
pub mod import;
pub mod models;
pub mod sanitize;

/// Filesystem layout and the database handle, the two pieces every caller
/// touches first.
pub use config::AppPaths;
pub use db::Database;

/// The domain types other layers manipulate.
pub use models::{Category, DatabaseStats, Hymn, UsageStat};
