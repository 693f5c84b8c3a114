//! Settings file discovery, reading and writing.
//!
//! The read and write functions are generic over the document type so the
//! same code paths serve [`Settings`](crate::Settings) and ad-hoc documents
//! in tests.
//!
//! # File Formats
//!
//! - JSON5 (`.json5`): preferred, allows comments and trailing commas
//! - JSON (`.json`): plain JSON
//!
//! # File Locations
//!
//! Candidates are checked in this order and the first existing file wins:
//!
//! 1. Working directory: `./snapboard.json5`, `./snapboard.json`
//! 2. User config directory: `~/.config/snapboard/config.json5`,
//!    `~/.config/snapboard/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local settings file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["snapboard.json5", "snapboard.json"];

/// Directory created under the platform config directory.
const USER_CONFIG_DIR: &str = "snapboard";

/// File names inside [`USER_CONFIG_DIR`], in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Lists every candidate settings path in priority order.
///
/// `local_dir` is usually the working directory; `user_dir` is the platform
/// config directory (`dirs::config_dir()`), if any.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use snapboard_config::persistence::candidate_paths;
///
/// let paths = candidate_paths(Path::new("."), Some(Path::new("/home/me/.config")));
/// assert_eq!(paths.len(), 4);
/// assert!(paths[0].ends_with("snapboard.json5"));
/// assert!(paths[3].ends_with("snapboard/config.json"));
/// ```
#[must_use]
pub fn candidate_paths(local_dir: &Path, user_dir: Option<&Path>) -> Vec<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir.into_iter().flat_map(|dir| {
        USER_FILE_NAMES
            .iter()
            .map(move |name| dir.join(USER_CONFIG_DIR).join(name))
    });
    local.chain(user).collect()
}

/// Returns the first existing settings file among [`candidate_paths`].
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    candidate_paths(local_dir, user_dir)
        .into_iter()
        .find(|path| path.exists())
}

/// Finds the settings file in the default locations.
///
/// # Examples
///
/// ```no_run
/// use snapboard_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found settings at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Returns the user settings directory, typically `~/.config/snapboard/`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the path new user settings are saved to.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(USER_FILE_NAMES[0]))
}

/// Reads and parses a settings file (JSON5 or JSON).
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read and
/// [`ConfigError::ParseJson5`] if its content does not parse.
///
/// # Examples
///
/// ```no_run
/// use snapboard_config::persistence::read_config_file;
/// use snapboard_config::Settings;
///
/// # fn main() -> snapboard_config::Result<()> {
/// let settings: Settings = read_config_file("snapboard.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // serde_json5 also accepts plain JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a document as pretty-printed JSON, creating parent directories.
///
/// JSON is written rather than JSON5 because `serde_json5` only parses.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized, or if the
/// directory or file cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, document: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(document)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
