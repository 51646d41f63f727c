use crate::error::{PageError, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Which front-end the request loop speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Rest,
    Ops,
}

/// Configuration for the request loop, stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Front-end used when `--surface` is not given
    #[serde(default)]
    pub surface: Surface,

    /// Pretty-print each response (multi-line output)
    #[serde(default)]
    pub pretty: bool,

    /// Reject POST/PUT bodies that are not sent as application/json
    #[serde(default = "default_require_json")]
    pub require_json_content_type: bool,
}

fn default_require_json() -> bool {
    true
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            surface: Surface::default(),
            pretty: false,
            require_json_content_type: default_require_json(),
        }
    }
}

impl ServeConfig {
    /// Directory holding the per-user config file, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "pagestore", "pagestore").map(|d| d.config_dir().to_path_buf())
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        Self::load_file(config_dir.as_ref().join(CONFIG_FILENAME))
    }

    /// Load an explicit config file. A missing file yields the defaults.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(PageError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| PageError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PageError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PageError::Serialization)?;
        fs::write(config_path, content).map_err(PageError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServeConfig::default();
        assert_eq!(config.surface, Surface::Rest);
        assert!(!config.pretty);
        assert!(config.require_json_content_type);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServeConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, ServeConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("nested");

        let config = ServeConfig {
            surface: Surface::Ops,
            pretty: true,
            require_json_content_type: false,
        };
        config.save(&dir).unwrap();

        let loaded = ServeConfig::load(&dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{"surface": "ops"}"#).unwrap();

        let loaded = ServeConfig::load_file(&path).unwrap();
        assert_eq!(loaded.surface, Surface::Ops);
        assert!(loaded.require_json_content_type);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, r#"{"surfce": "ops"}"#).unwrap();

        assert!(matches!(
            ServeConfig::load_file(&path),
            Err(PageError::Config(_))
        ));
    }
}
