//! Build-tool lifecycle entry points.
//!
//! A host calls [`SyncHooks::on_build_start`] once per build and
//! [`SyncHooks::on_file_changed`] for every file-watch event. Both are plain
//! futures driven on the host's own runtime; they run a full sync to completion
//! and never return an error. The outcome is only informational.

use std::path::{Path, PathBuf};

use crate::cache::is_cache_file;
use crate::locale_file::extract_locale;
use crate::report::Reporter;
use crate::sync::{SyncOutcome, Synchronizer};
use crate::translate::Translator;

pub struct SyncHooks<T> {
    synchronizer: Synchronizer<T>,
    reporter: Box<dyn Reporter>,
}

impl<T: Translator> SyncHooks<T> {
    pub fn new(synchronizer: Synchronizer<T>, reporter: Box<dyn Reporter>) -> Self {
        Self {
            synchronizer,
            reporter,
        }
    }

    pub fn synchronizer(&self) -> &Synchronizer<T> {
        &self.synchronizer
    }

    pub async fn on_build_start(&self) -> SyncOutcome {
        self.synchronizer.run(self.reporter.as_ref()).await
    }

    /// Re-sync when `path` is a locale file. Returns `None` for unrelated paths.
    pub async fn on_file_changed(&self, path: &Path) -> Option<SyncOutcome> {
        if !self.is_locale_file(path) {
            return None;
        }
        Some(self.on_build_start().await)
    }

    /// True for JSON files inside the locale folder, except the cache snapshot.
    pub fn is_locale_file(&self, path: &Path) -> bool {
        if is_cache_file(path) || extract_locale(path).is_none() {
            return false;
        }
        let folder = self.synchronizer.folder();
        canonical(path).starts_with(canonical(&folder))
    }
}

fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    // Deleted files cannot be canonicalized; resolve the parent instead.
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
