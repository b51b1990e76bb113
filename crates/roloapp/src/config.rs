use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoloError};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for rolo, stored as JSON in the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RoloConfig {
    /// Address book opened when no location is given (URI or bare path).
    #[serde(default)]
    pub default_book: Option<String>,

    /// Whether search and sort ignore case unless told otherwise.
    #[serde(default)]
    pub ignore_case: bool,
}

impl RoloConfig {
    /// Load config from `config_dir`, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let location = config_path.display().to_string();
        let content = fs::read_to_string(&config_path).map_err(|e| RoloError::io(&location, e))?;
        let config: RoloConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to `config_dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .map_err(|e| RoloError::io(config_dir.display().to_string(), e))?;
        }
        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)
            .map_err(|e| RoloError::io(config_path.display().to_string(), e))?;
        Ok(())
    }
}

/// The platform config directory for rolo, if the platform exposes one.
pub fn default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rolo").map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoloConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, RoloConfig::default());
        assert!(config.default_book.is_none());
        assert!(!config.ignore_case);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoloConfig {
            default_book: Some("csv:///home/me/book.csv".to_string()),
            ignore_case: true,
        };
        config.save(dir.path()).unwrap();

        let loaded = RoloConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"ignore_case": true}"#).unwrap();

        let loaded = RoloConfig::load(dir.path()).unwrap();
        assert!(loaded.ignore_case);
        assert!(loaded.default_book.is_none());
    }
}
