//! Reading and writing `<folder>/<locale>.json` documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::Tree;

pub fn locale_path(folder: &Path, locale: &str) -> PathBuf {
    folder.join(format!("{}.json", locale))
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "/path/to/locales/pt-BR.json" -> Some("pt-BR")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load a target locale document. A missing file is an empty document.
pub fn load_or_empty(path: &Path) -> Result<Tree> {
    if !path.exists() {
        return Ok(Tree::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Tree::parse_document(&content).with_context(|| format!("Invalid JSON: {}", path.display()))
}

/// Save with 2-space indentation and a trailing newline.
pub fn save(path: &Path, document: &Tree) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, document.to_pretty_json()?)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
