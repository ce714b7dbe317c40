//! Snapshot of the last synced default-locale document.
//!
//! One cache file lives in each locale folder. Its content is the default
//! locale file verbatim, as it was at the end of the last run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const CACHE_FILE_NAME: &str = "__cached__.json";

#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(folder: &Path) -> Self {
        Self {
            path: folder.join(CACHE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. Missing or unreadable files yield `None`.
    pub fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    /// Overwrite the snapshot.
    pub fn save(&self, content: &str) -> Result<()> {
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))
    }
}

pub fn is_cache_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(CACHE_FILE_NAME)
}
