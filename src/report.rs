//! Progress reporting.
//!
//! The sync pipeline never prints. It emits [`SyncEvent`]s to an injected
//! [`Reporter`]; the CLI plugs in [`TerminalReporter`], library callers can use
//! [`NullReporter`] or their own sink.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use colored::Colorize;

use crate::core::{KeyPath, MergeStats};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    NotConfigured,
    FolderUnavailable {
        path: PathBuf,
        error: String,
    },
    SourceUnreadable {
        path: PathBuf,
        error: String,
    },
    CacheCorrupt {
        path: PathBuf,
        error: String,
    },
    ChangesDetected {
        changes: Vec<KeyPath>,
        cold_start: bool,
    },
    NoChanges,
    LocaleStarted {
        locale: String,
        keys: usize,
    },
    KeyTranslated {
        locale: String,
        path: KeyPath,
    },
    KeyFailed {
        locale: String,
        path: KeyPath,
        reason: String,
    },
    PlaceholderMismatch {
        locale: String,
        path: KeyPath,
        expected: usize,
        found: usize,
    },
    LocaleSkipped {
        locale: String,
        error: String,
    },
    LocaleWritten {
        locale: String,
        path: PathBuf,
        stats: MergeStats,
    },
    LocaleUnchanged {
        locale: String,
    },
    CacheSaved {
        path: PathBuf,
    },
    CacheSaveFailed {
        path: PathBuf,
        error: String,
    },
}

impl SyncEvent {
    pub fn level(&self) -> Level {
        match self {
            SyncEvent::NotConfigured
            | SyncEvent::ChangesDetected { .. }
            | SyncEvent::NoChanges
            | SyncEvent::LocaleStarted { .. }
            | SyncEvent::KeyTranslated { .. }
            | SyncEvent::LocaleUnchanged { .. }
            | SyncEvent::CacheSaved { .. } => Level::Info,
            SyncEvent::LocaleWritten { .. } => Level::Success,
            SyncEvent::CacheCorrupt { .. }
            | SyncEvent::KeyFailed { .. }
            | SyncEvent::PlaceholderMismatch { .. } => Level::Warning,
            SyncEvent::FolderUnavailable { .. }
            | SyncEvent::SourceUnreadable { .. }
            | SyncEvent::LocaleSkipped { .. }
            | SyncEvent::CacheSaveFailed { .. } => Level::Error,
        }
    }

    /// Per-key progress, only shown in verbose mode.
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            SyncEvent::LocaleStarted { .. }
                | SyncEvent::KeyTranslated { .. }
                | SyncEvent::CacheSaved { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            SyncEvent::NotConfigured => {
                "No projectId configured, skipping translation".to_string()
            }
            SyncEvent::FolderUnavailable { path, error } => {
                format!("Cannot create locale folder {}: {}", path.display(), error)
            }
            SyncEvent::SourceUnreadable { path, error } => {
                format!("Cannot read default locale file {}: {}", path.display(), error)
            }
            SyncEvent::CacheCorrupt { path, error } => format!(
                "Ignoring unreadable cache {} ({}), translating everything",
                path.display(),
                error
            ),
            SyncEvent::ChangesDetected {
                changes,
                cold_start: true,
            } => format!("No cache found, translating all {} key(s)", changes.len()),
            SyncEvent::ChangesDetected { changes, .. } => {
                format!("{} changed key(s) since last sync", changes.len())
            }
            SyncEvent::NoChanges => "No changes since last sync".to_string(),
            SyncEvent::LocaleStarted { locale, keys } => {
                format!("Translating {} key(s) into {}", keys, locale)
            }
            SyncEvent::KeyTranslated { locale, path } => format!("[{}] {}", locale, path),
            SyncEvent::KeyFailed {
                locale,
                path,
                reason,
            } => format!("[{}] {} kept previous value: {}", locale, path, reason),
            SyncEvent::PlaceholderMismatch {
                locale,
                path,
                expected,
                found,
            } => format!(
                "[{}] {} has {} placeholder(s) after translation, expected {}; left as translated",
                locale, path, found, expected
            ),
            SyncEvent::LocaleSkipped { locale, error } => {
                format!("Skipped {}: {}", locale, error)
            }
            SyncEvent::LocaleWritten {
                locale,
                path,
                stats,
            } => {
                let mut msg = format!(
                    "Wrote {} ({}): {} translated",
                    locale,
                    path.display(),
                    stats.translated
                );
                if stats.added > 0 {
                    msg.push_str(&format!(", {} new", stats.added));
                }
                if stats.failed > 0 {
                    msg.push_str(&format!(", {} failed", stats.failed));
                }
                msg
            }
            SyncEvent::LocaleUnchanged { locale } => format!("{} is up to date", locale),
            SyncEvent::CacheSaved { path } => format!("Updated cache {}", path.display()),
            SyncEvent::CacheSaveFailed { path, error } => {
                format!("Cannot write cache {}: {}", path.display(), error)
            }
        }
    }
}

/// Sink for progress events.
pub trait Reporter {
    fn report(&self, event: &SyncEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &SyncEvent) {}
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<SyncEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &SyncEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Prints events to the terminal. Warnings and errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter {
    pub verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, event: &SyncEvent) {
        match event.level() {
            Level::Info | Level::Success => {
                report_to(event, self.verbose, &mut io::stdout().lock())
            }
            Level::Warning | Level::Error => {
                report_to(event, self.verbose, &mut io::stderr().lock())
            }
        }
    }
}

/// Print one event to a custom writer.
pub fn report_to<W: Write>(event: &SyncEvent, verbose: bool, writer: &mut W) {
    if event.is_detail() && !verbose {
        return;
    }

    let message = event.message();
    let _ = match event.level() {
        Level::Info => writeln!(writer, "{}", message),
        Level::Success => writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green()),
        Level::Warning => writeln!(writer, "{} {}", "warning:".bold().yellow(), message),
        Level::Error => writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red()),
    };
}
