// Configuration for taskboard

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::Backend;
use crate::store::{DEFAULT_STORAGE_KEY, StoreOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted tasks
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Persistence backend
    #[serde(default)]
    pub backend: Backend,

    /// Key the task collection is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Seed example tasks on first run
    #[serde(default = "default_seed_examples")]
    pub seed_examples: bool,

    /// Delay between the last search keystroke and query evaluation
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_seed_examples() -> bool {
    true
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            backend: Backend::default(),
            storage_key: default_storage_key(),
            seed_examples: default_seed_examples(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_file(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("taskboard").join("config.yml")),
            Some(PathBuf::from("taskboard.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_file(path);
            }
        }

        Ok(Config::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            key: self.storage_key.clone(),
            seed_examples: self.seed_examples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::File);
        assert_eq!(config.storage_key, "tasks");
        assert!(config.seed_examples);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert!(config.store_path.ends_with("taskboard"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "backend: sqlite\nseed_examples: false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert!(!config.seed_examples);
        assert_eq!(config.storage_key, "tasks");
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");

        let config = Config {
            store_path: temp.path().join("data"),
            backend: Backend::Memory,
            storage_key: "work".to_string(),
            seed_examples: false,
            search_debounce_ms: 150,
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_store_options() {
        let config = Config {
            storage_key: "personal".to_string(),
            seed_examples: false,
            ..Default::default()
        };
        let options = config.store_options();
        assert_eq!(options.key, "personal");
        assert!(!options.seed_examples);
    }
}
