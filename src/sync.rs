//! The sync run: diff the default locale against its cached snapshot and
//! translate only what changed into every other locale.
//!
//! A run never fails the caller. Every problem is reported through the
//! [`Reporter`] and the run either skips the affected piece or stops cleanly.
//! The cache is written last, so a crash mid-run retranslates the same keys
//! on the next run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::core::{ChangeSet, KeyPath, LocalePair, MergeStats, Tree, diff, merge};
use crate::locale_file;
use crate::report::{Reporter, SyncEvent};
use crate::translate::{PlaceholderTranslator, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleStatus {
    Written,
    Unchanged,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResult {
    pub locale: String,
    pub status: LocaleStatus,
    pub stats: MergeStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub changes: ChangeSet,
    pub locales: Vec<LocaleResult>,
    pub cache_saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No project id: nothing was attempted.
    NotConfigured,
    FolderUnavailable,
    SourceUnreadable,
    NoChanges,
    /// Changes were computed but nothing was translated or written.
    DryRun(ChangeSet),
    Completed(SyncSummary),
}

pub struct Synchronizer<T> {
    root: PathBuf,
    config: Config,
    translator: PlaceholderTranslator<T>,
    dry_run: bool,
}

impl<T: Translator> Synchronizer<T> {
    pub fn new(root: impl Into<PathBuf>, config: Config, translator: T) -> Self {
        let translator = PlaceholderTranslator::new(translator, config.timeout());
        Self {
            root: root.into(),
            config,
            translator,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &T {
        self.translator.inner()
    }

    pub fn folder(&self) -> PathBuf {
        self.config.folder_path(&self.root)
    }

    pub async fn run(&self, reporter: &dyn Reporter) -> SyncOutcome {
        if self.config.project_id().is_none() {
            reporter.report(&SyncEvent::NotConfigured);
            return SyncOutcome::NotConfigured;
        }

        let folder = self.folder();
        if let Err(err) = fs::create_dir_all(&folder) {
            reporter.report(&SyncEvent::FolderUnavailable {
                path: folder,
                error: err.to_string(),
            });
            return SyncOutcome::FolderUnavailable;
        }

        let source_path = locale_file::locale_path(&folder, &self.config.default_locale);
        let (source_text, source) = match read_source(&source_path) {
            Ok(loaded) => loaded,
            Err(err) => {
                reporter.report(&SyncEvent::SourceUnreadable {
                    path: source_path,
                    error: format!("{:#}", err),
                });
                return SyncOutcome::SourceUnreadable;
            }
        };

        let cache = CacheStore::new(&folder);
        let (changes, cold_start) = self.detect_changes(&cache, &source_text, &source, reporter);

        if changes.is_empty() {
            reporter.report(&SyncEvent::NoChanges);
            return SyncOutcome::NoChanges;
        }

        reporter.report(&SyncEvent::ChangesDetected {
            changes: changes.clone(),
            cold_start,
        });

        if self.dry_run {
            return SyncOutcome::DryRun(changes);
        }

        let mut locales = Vec::new();
        for locale in self.config.target_locales() {
            let result = self
                .sync_locale(&folder, locale, &source, &changes, reporter)
                .await;
            locales.push(result);
        }

        let cache_saved = self.save_cache(&cache, &source_text, reporter);

        SyncOutcome::Completed(SyncSummary {
            changes,
            locales,
            cache_saved,
        })
    }

    /// Diff against the cached snapshot. Without a usable snapshot every key
    /// counts as changed and the cache is seeded right away.
    fn detect_changes(
        &self,
        cache: &CacheStore,
        source_text: &str,
        source: &Tree,
        reporter: &dyn Reporter,
    ) -> (ChangeSet, bool) {
        let previous = cache
            .load()
            .and_then(|text| match Tree::parse_document(&text) {
                Ok(tree) => Some(tree),
                Err(err) => {
                    reporter.report(&SyncEvent::CacheCorrupt {
                        path: cache.path().to_path_buf(),
                        error: format!("{:#}", err),
                    });
                    None
                }
            });

        match previous {
            Some(previous) => (diff(&previous, source), false),
            None => {
                if !self.dry_run {
                    self.save_cache(cache, source_text, reporter);
                }
                (diff(&Tree::default(), source), true)
            }
        }
    }

    async fn sync_locale(
        &self,
        folder: &Path,
        locale: &str,
        source: &Tree,
        changes: &[KeyPath],
        reporter: &dyn Reporter,
    ) -> LocaleResult {
        let path = locale_file::locale_path(folder, locale);
        let skipped = |error: anyhow::Error| {
            reporter.report(&SyncEvent::LocaleSkipped {
                locale: locale.to_string(),
                error: format!("{:#}", error),
            });
            LocaleResult {
                locale: locale.to_string(),
                status: LocaleStatus::Skipped,
                stats: MergeStats::default(),
            }
        };

        let existing = match locale_file::load_or_empty(&path) {
            Ok(existing) => existing,
            Err(err) => return skipped(err),
        };

        reporter.report(&SyncEvent::LocaleStarted {
            locale: locale.to_string(),
            keys: changes.len(),
        });

        let pair = LocalePair {
            source: &self.config.default_locale,
            target: locale,
        };
        let outcome = merge(
            existing.clone(),
            source,
            changes,
            pair,
            &self.translator,
            reporter,
        )
        .await;

        if outcome.document == existing {
            reporter.report(&SyncEvent::LocaleUnchanged {
                locale: locale.to_string(),
            });
            return LocaleResult {
                locale: locale.to_string(),
                status: LocaleStatus::Unchanged,
                stats: outcome.stats,
            };
        }

        if let Err(err) = locale_file::save(&path, &outcome.document) {
            return LocaleResult {
                stats: outcome.stats,
                ..skipped(err)
            };
        }

        reporter.report(&SyncEvent::LocaleWritten {
            locale: locale.to_string(),
            path,
            stats: outcome.stats,
        });
        LocaleResult {
            locale: locale.to_string(),
            status: LocaleStatus::Written,
            stats: outcome.stats,
        }
    }

    fn save_cache(&self, cache: &CacheStore, content: &str, reporter: &dyn Reporter) -> bool {
        match cache.save(content) {
            Ok(()) => {
                reporter.report(&SyncEvent::CacheSaved {
                    path: cache.path().to_path_buf(),
                });
                true
            }
            Err(err) => {
                reporter.report(&SyncEvent::CacheSaveFailed {
                    path: cache.path().to_path_buf(),
                    error: format!("{:#}", err),
                });
                false
            }
        }
    }
}

fn read_source(path: &Path) -> Result<(String, Tree)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let tree = Tree::parse_document(&text)?;
    Ok((text, tree))
}
