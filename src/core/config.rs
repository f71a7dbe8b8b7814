//! Resolution of the templates root directory.
//!
//! The root is looked up, in order, from:
//! 1. The `--templates-dir` command-line flag
//! 2. The `TEMPLATE_MANAGER_DIR` environment variable
//! 3. `templates_dir` in a TOML config file passed with `--config`
//! 4. `./templates` in the current working directory

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::error::{Error, Result};

/// Environment variable naming the templates root
pub const TEMPLATES_DIR_ENV: &str = "TEMPLATE_MANAGER_DIR";

/// Fallback templates root, relative to the working directory
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Trait for reading configuration from the environment, allowing dependency injection for testing
pub trait ConfigReader {
    fn templates_dir(&self) -> Option<String>;
}

/// Production implementation that reads from environment variables
pub struct EnvConfigReader;

impl ConfigReader for EnvConfigReader {
    fn templates_dir(&self) -> Option<String> {
        std::env::var(TEMPLATES_DIR_ENV).ok()
    }
}

/// Fixed-value implementation for testing
#[cfg(test)]
pub struct MockConfigReader(Option<String>);

#[cfg(test)]
impl MockConfigReader {
    pub fn new(templates_dir: Option<String>) -> Self {
        Self(templates_dir)
    }
}

#[cfg(test)]
impl ConfigReader for MockConfigReader {
    fn templates_dir(&self) -> Option<String> {
        self.0.clone()
    }
}

/// On-disk shape of the optional TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    templates_dir: Option<PathBuf>,
}

/// Runtime configuration for the template manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Root directory holding one subdirectory per template
    pub templates_dir: PathBuf,
}

impl ManagerConfig {
    /// Configuration rooted at an explicit directory
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Resolve the configuration from CLI values and the process environment
    pub fn resolve(cli_dir: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        Self::resolve_with_reader(cli_dir, config_file, &EnvConfigReader)
    }

    /// Resolve the configuration with a custom environment reader
    pub fn resolve_with_reader(
        cli_dir: Option<&Path>,
        config_file: Option<&Path>,
        reader: &dyn ConfigReader,
    ) -> Result<Self> {
        if let Some(dir) = cli_dir {
            debug!(templates_dir = %dir.display(), "Using templates dir from command line");
            return Ok(Self::new(dir));
        }

        if let Some(dir) = reader.templates_dir().filter(|d| !d.trim().is_empty()) {
            debug!(templates_dir = %dir, "Using templates dir from {}", TEMPLATES_DIR_ENV);
            return Ok(Self::new(dir));
        }

        if let Some(path) = config_file {
            let file = Self::load_file(path)?;
            if let Some(dir) = file.templates_dir {
                debug!(
                    templates_dir = %dir.display(),
                    config = %path.display(),
                    "Using templates dir from config file"
                );
                return Ok(Self::new(dir));
            }
        }

        debug!("Using default templates dir '{}'", DEFAULT_TEMPLATES_DIR);
        Ok(Self::new(DEFAULT_TEMPLATES_DIR))
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_dir_takes_precedence() {
        let reader = MockConfigReader::new(Some("/from/env".to_string()));
        let config =
            ManagerConfig::resolve_with_reader(Some(Path::new("/from/cli")), None, &reader)
                .unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_env_used_when_no_cli_dir() {
        let reader = MockConfigReader::new(Some("/from/env".to_string()));
        let config = ManagerConfig::resolve_with_reader(None, None, &reader).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let reader = MockConfigReader::new(Some("  ".to_string()));
        let config = ManagerConfig::resolve_with_reader(None, None, &reader).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from(DEFAULT_TEMPLATES_DIR));
    }

    #[test]
    fn test_config_file_used_after_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manager.toml");
        std::fs::write(&path, "templates_dir = \"/from/file\"\n").unwrap();

        let reader = MockConfigReader::new(None);
        let config = ManagerConfig::resolve_with_reader(None, Some(&path), &reader).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_config_file_without_dir_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manager.toml");
        std::fs::write(&path, "").unwrap();

        let reader = MockConfigReader::new(None);
        let config = ManagerConfig::resolve_with_reader(None, Some(&path), &reader).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from(DEFAULT_TEMPLATES_DIR));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let reader = MockConfigReader::new(None);
        let err = ManagerConfig::resolve_with_reader(None, Some(&path), &reader).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_config_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manager.toml");
        std::fs::write(&path, "templates_dir = [").unwrap();

        let reader = MockConfigReader::new(None);
        let err = ManagerConfig::resolve_with_reader(None, Some(&path), &reader).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
