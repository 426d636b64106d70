// Process configuration, loaded once at startup and passed by reference

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARCHIVE_DIR, DEFAULT_ARCHIVE_FOLDER, DEFAULT_BROKEN_DIR, DEFAULT_CLONE_DIR,
    DEFAULT_INBOX_DIR, DEFAULT_POLL_INTERVAL_SECS,
};
use crate::error::{ClipVaultError, Result};

/// Remote catalog connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub user: String,
    pub pass: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            user: String::new(),
            pass: String::new(),
        }
    }
}

/// Remote object store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    /// Display name of the remote folder archived files are uploaded into.
    pub archive_folder: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            base_url: "http://127.0.0.1:8000/drive".to_string(),
            archive_folder: DEFAULT_ARCHIVE_FOLDER.to_string(),
        }
    }
}

/// Top-level configuration: directory layout, poll interval, and the two
/// remote collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inbox_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub clone_dir: PathBuf,
    pub broken_dir: PathBuf,
    pub poll_interval_secs: u64,
    pub catalog: CatalogConfig,
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            inbox_dir: PathBuf::from(DEFAULT_INBOX_DIR),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            clone_dir: PathBuf::from(DEFAULT_CLONE_DIR),
            broken_dir: PathBuf::from(DEFAULT_BROKEN_DIR),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            catalog: CatalogConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| ClipVaultError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.inbox_dir, PathBuf::from("inbox"));
        assert_eq!(config.poll_interval_secs, 1);
        assert_eq!(config.store.archive_folder, "VideoArchive");
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
inbox_dir = "/mnt/camera/incoming"
poll_interval_secs = 5

[catalog]
base_url = "https://catalog.example/api"
user = "archiver"
pass = "secret"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.inbox_dir, PathBuf::from("/mnt/camera/incoming"));
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.catalog.user, "archiver");
        // Unspecified sections keep their defaults
        assert_eq!(config.archive_dir, PathBuf::from("archive"));
        assert_eq!(config.store.archive_folder, "VideoArchive");
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "inbox_dir = [not toml").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
