//! Discovery and management of the `.rodney/` directory.
//!
//! The `.rodney/` directory holds the project's `config.yaml`. This module
//! finds it by walking up the directory tree and creates it on `config init`.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the rodney metadata directory.
pub const CONFIG_DIR_NAME: &str = ".rodney";

/// The name of the environment variable that can override the directory.
pub const CONFIG_DIR_ENV: &str = "RODNEY_DIR";

/// Walk up the directory tree from `start` looking for a `.rodney/` directory.
///
/// The `RODNEY_DIR` environment variable is checked first (highest
/// priority). Returns `None` if the filesystem root is reached without
/// finding one.
///
/// # Examples
///
/// ```no_run
/// use rodney_config::config_dir::find_config_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_config_dir(Path::new(".")) {
///     println!("Found config dir at {}", dir.display());
/// }
/// ```
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    let mut current = start.as_path();
    loop {
        let candidate = current.join(CONFIG_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

/// Ensure a `.rodney/` directory exists at the given path.
///
/// If `path` itself is not called `.rodney`, a `.rodney/` subdirectory is
/// created under it. Returns the path to the `.rodney/` directory.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_config_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(CONFIG_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(CONFIG_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
