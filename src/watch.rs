//! File watching for the locale folder.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Default quiet period before a batch of changes is handed out.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct LocaleWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<PathBuf>,
    debounce: Duration,
}

impl LocaleWatcher {
    pub fn new(folder: &Path, debounce: Duration) -> Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = Self::create_watcher(tx)?;
        watcher
            .watch(folder, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", folder.display()))?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            debounce,
        })
    }

    fn create_watcher(tx: Sender<PathBuf>) -> Result<RecommendedWatcher> {
        RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    for path in changed_json_files(event) {
                        let _ = tx.send(path);
                    }
                }
            },
            notify::Config::default(),
        )
        .context("Failed to create file watcher")
    }

    /// Block until something changes, then collect everything that changes
    /// within the debounce window. Returns `None` once the watcher is gone.
    pub fn next_batch(&self) -> Option<Vec<PathBuf>> {
        let first = self.receiver.recv().ok()?;
        let mut batch = vec![first];
        while let Ok(path) = self.receiver.recv_timeout(self.debounce) {
            if !batch.contains(&path) {
                batch.push(path);
            }
        }
        Some(batch)
    }
}

fn changed_json_files(event: Event) -> Vec<PathBuf> {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return Vec::new();
    }
    event
        .paths
        .into_iter()
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    #[test]
    fn test_only_json_changes_pass() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("locales/pt.json"))
            .add_path(PathBuf::from("locales/notes.md"));
        assert_eq!(
            changed_json_files(event),
            vec![PathBuf::from("locales/pt.json")]
        );
    }

    #[test]
    fn test_access_events_are_ignored() {
        let event = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(PathBuf::from("locales/pt.json"));
        assert!(changed_json_files(event).is_empty());

        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("locales/de.json"));
        assert_eq!(changed_json_files(event).len(), 1);
    }
}
