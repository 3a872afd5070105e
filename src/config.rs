//! Filesystem locations for the application. All path decisions live here so
//! the persistence layer never reaches for process-wide state: callers build
//! an [`AppPaths`] once (platform lookup or an explicit directory) and hand it
//! to [`crate::db::Database`]. Tests point it at a throwaway directory.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::ProjectDirs;

/// Application name used for the per-user data directory.
const APP_NAME: &str = "ChristInSong";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "christ_in_song.db";
/// Subdirectory of the data directory that holds timestamped backups.
const BACKUP_DIR_NAME: &str = "backups";

/// Resolved filesystem layout for one application instance.
#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Locate the per-user data directory for this platform: roaming AppData
    /// on Windows, Application Support on macOS, XDG data home elsewhere.
    pub fn discover() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", APP_NAME)
            .ok_or_else(|| anyhow!("could not locate a home directory for application data"))?;
        Ok(Self {
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Use an explicit data directory instead of the platform default. This is
    /// the seam tests (and the `--data-dir` flag) use to keep databases out of
    /// the real user profile.
    pub fn for_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    /// Directory holding the database and backups.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Absolute path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Directory that receives timestamped database copies.
    pub fn backup_dir(&self) -> PathBuf {
        self.data_dir.join(BACKUP_DIR_NAME)
    }
}
