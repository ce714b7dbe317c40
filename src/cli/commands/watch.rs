use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};

use super::super::{args::WatchArgs, exit_status::ExitStatus};
use super::helper::{build_hooks, runtime};
use crate::watch::LocaleWatcher;

pub fn watch(args: WatchArgs) -> Result<ExitStatus> {
    let hooks = build_hooks(&args.common, false)?;
    let folder = hooks.synchronizer().folder();
    fs::create_dir_all(&folder)
        .with_context(|| format!("Failed to create directory: {}", folder.display()))?;

    let watcher = LocaleWatcher::new(&folder, Duration::from_millis(args.debounce_ms))?;

    let runtime = runtime()?;
    runtime.block_on(hooks.on_build_start());
    println!("Watching {} for changes...", folder.display());

    while let Some(batch) = watcher.next_batch() {
        if let Some(path) = batch.iter().find(|path| hooks.is_locale_file(path)) {
            runtime.block_on(hooks.on_file_changed(path));
        }
    }

    Ok(ExitStatus::Success)
}
