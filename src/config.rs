// Application configuration.
// Loaded from config.json in the platform config directory; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::paths;
use crate::error::{PlanetError, Result};
use crate::state::load_more::DEFAULT_BOUNDARY;
use crate::swapi::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root; the first page is `{base_url}/planets`.
    pub base_url: String,
    /// Trailing items that trigger loading the next page.
    pub load_more_threshold: usize,
    /// Per-request timeout. Unset keeps the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
    /// Overrides the platform cache directory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            load_more_threshold: DEFAULT_BOUNDARY,
            request_timeout_secs: None,
            cache_dir: None,
        }
    }
}

impl Config {
    /// Load from the default config path, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        match paths::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Directory for the planets cache and log file.
    pub fn resolved_cache_dir(&self) -> Result<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(paths::cache_dir)
            .ok_or_else(|| PlanetError::Other("could not determine a cache directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "https://swapi.dev/api/");
        assert_eq!(config.load_more_threshold, 5);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"base_url": "http://localhost:9000/api", "request_timeout_secs": 10}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.load_more_threshold, 5);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{").unwrap();

        assert!(matches!(Config::load_from(&path), Err(PlanetError::Json(_))));
    }

    #[test]
    fn test_explicit_cache_dir_wins() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/tmp/planets")),
            ..Config::default()
        };
        assert_eq!(
            config.resolved_cache_dir().unwrap(),
            PathBuf::from("/tmp/planets")
        );
    }
}
