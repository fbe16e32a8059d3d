use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BrainDumpError, Result};

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_STORE_FILE: &str = "data.json";
const DEFAULT_USER: &str = "default";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# braindump configuration file
# Location: ~/.braindump/config.toml

[store]
# Data file holding entries and custom categories,
# relative to the base directory (absolute paths work too)
# Default: "data.json"
file = "data.json"

[user]
# Identity used when --user is not given.
# With a chat transport in front, each chat id is its own user;
# on a single machine one shared identity is usually enough.
# Default: "default"
name = "default"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub user: UserConfig,
}

/// Store-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data file, relative to the base directory
    #[serde(default = "default_store_file")]
    pub file: String,
}

/// Identity-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Default user identity
    #[serde(default = "default_user")]
    pub name: String,
}

fn default_store_file() -> String {
    DEFAULT_STORE_FILE.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file: default_store_file(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: default_user(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| BrainDumpError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self).map_err(|e| BrainDumpError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Resolve the data file path against the base directory
    pub fn store_path(&self, base_dir: &Path) -> PathBuf {
        let file = Path::new(&self.store.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            base_dir.join(file)
        }
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store.file" => Some(self.store.file.clone()),
            "user.name" => Some(self.user.name.clone()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "store.file" => {
                self.store.file = value.trim().to_string();
                Ok(())
            }
            "user.name" => {
                self.user.name = value.trim().to_string();
                Ok(())
            }
            _ => Err(BrainDumpError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("store.file".to_string(), self.store.file.clone()),
            ("user.name".to_string(), self.user.name.clone()),
        ]
    }
}
