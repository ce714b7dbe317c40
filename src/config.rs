use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::translate::{DEFAULT_ENDPOINT, DEFAULT_LOCATION};

pub const CONFIG_FILE_NAME: &str = ".glotsyncrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_default_locale")]
    pub default_locale: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Translation API project. Without it a run does nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

fn default_locales() -> Vec<String> {
    ["pt", "en", "es"].map(String::from).to_vec()
}

fn default_default_locale() -> String {
    "pt".to_string()
}

fn default_folder() -> String {
    "src/locales".to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            default_locale: default_default_locale(),
            folder: default_folder(),
            project_id: None,
            location: default_location(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            access_token: None,
        }
    }
}

fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Locale codes become file names, so they must be plain identifiers.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_locale(&self.default_locale) {
            bail!("Invalid 'defaultLocale': \"{}\"", self.default_locale);
        }

        for locale in &self.locales {
            if !is_valid_locale(locale) {
                bail!("Invalid locale in 'locales': \"{}\"", locale);
            }
        }

        if self.timeout_secs == 0 {
            bail!("'timeoutSecs' must be greater than 0");
        }

        Ok(())
    }

    /// Locales to translate into: configured order, default locale and duplicates removed.
    pub fn target_locales(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        for locale in &self.locales {
            if *locale != self.default_locale && !targets.contains(&locale.as_str()) {
                targets.push(locale);
            }
        }
        targets
    }

    /// The project id, if set to something non-blank.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn folder_path(&self, root: &Path) -> PathBuf {
        root.join(&self.folder)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
