// Cache and config path utilities.
// Resolves the platform directories the application reads from and writes to.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "planets")
}

/// Get the base cache directory (~/.cache/planets on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory (~/.config/planets on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Path to the cached planets table inside `dir`.
pub fn planets_path(dir: &Path) -> PathBuf {
    dir.join("planets.json")
}

/// Path to the log file inside `dir`.
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("planets.log")
}
