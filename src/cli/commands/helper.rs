use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use super::super::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::hooks::SyncHooks;
use crate::report::TerminalReporter;
use crate::sync::Synchronizer;
use crate::translate::GoogleTranslator;

/// Load the config file found from `--root` and apply command-line overrides.
pub fn resolve_config(common: &CommonArgs) -> Result<(PathBuf, Config)> {
    let root = common
        .root
        .canonicalize()
        .with_context(|| format!("Project root not found: {}", common.root.display()))?;

    let mut config = load_config(&root)?.config;

    if let Some(folder) = &common.folder {
        config.folder = folder.clone();
    }
    if let Some(default_locale) = &common.default_locale {
        config.default_locale = default_locale.clone();
    }
    if !common.locales.is_empty() {
        config.locales = common.locales.clone();
    }
    if common.project_id.is_some() {
        config.project_id = common.project_id.clone();
    }
    if common.access_token.is_some() {
        config.access_token = common.access_token.clone();
    }

    config.validate()?;
    Ok((root, config))
}

pub fn build_hooks(common: &CommonArgs, dry_run: bool) -> Result<SyncHooks<GoogleTranslator>> {
    let (root, config) = resolve_config(common)?;

    let translator = GoogleTranslator::new(
        config.project_id().unwrap_or_default(),
        config.timeout(),
    )?
    .with_endpoint(config.endpoint.clone())
    .with_location(config.location.clone())
    .with_access_token(config.access_token.clone());

    let synchronizer = Synchronizer::new(root, config, translator).dry_run(dry_run);
    Ok(SyncHooks::new(
        synchronizer,
        Box::new(TerminalReporter::new(common.verbose)),
    ))
}

/// Single-threaded runtime driving the hooks for one CLI invocation.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
