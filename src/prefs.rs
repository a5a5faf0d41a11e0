//! Persisted operator preferences.
//!
//! The display unit is the only client state that survives restarts. It is
//! read once at startup (falling back to defaults when the file is missing
//! or unreadable) and written through synchronously on every change — never
//! written on read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::currency::DisplayUnit;

/// File name under the platform config directory.
const PREFS_FILE: &str = "prefs.json";

/// Preferences persisted across console sessions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub display_unit: DisplayUnit,
}

/// Returns the default preference file location
/// (`<config dir>/routstr-console/prefs.json`), or `None` when the platform
/// has no config directory.
pub fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("routstr-console").join(PREFS_FILE))
}

/// Loads preferences from `path`.
///
/// A missing or unreadable file falls back to defaults — a preference must
/// never block startup.
pub fn load(path: &Path) -> Preferences {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Preferences::default();
    };
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "malformed preference file, using defaults");
        Preferences::default()
    })
}

/// Writes preferences to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConsoleError::Io`](crate::ConsoleError::Io) if the directory or
/// file cannot be written.
pub fn save(path: &Path, prefs: &Preferences) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            crate::ConsoleError::Io(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    let contents = serde_json::to_string_pretty(prefs)?;
    std::fs::write(path, contents)
        .map_err(|e| crate::ConsoleError::Io(format!("failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_defaults_to_sat() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load(&dir.path().join("nonexistent.json"));
        assert_eq!(prefs.display_unit, DisplayUnit::Sat);
    }

    #[test]
    fn malformed_file_defaults_to_sat() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load(&path).display_unit, DisplayUnit::Sat);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFS_FILE);
        let prefs = Preferences {
            display_unit: DisplayUnit::Usd,
        };
        save(&path, &prefs).unwrap();
        assert_eq!(load(&path), prefs);
    }

    #[test]
    fn unknown_unit_value_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILE);
        std::fs::write(&path, r#"{"display_unit": "doubloons"}"#).unwrap();
        assert_eq!(load(&path).display_unit, DisplayUnit::Sat);
    }
}
