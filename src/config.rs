//! Application configuration and storage location.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pass::CharacterClass;

pub const CONFIG_DIR_ENV: &str = "PWGEN_CONFIG_DIR";
const CONFIG_FILE: &str = "config.toml";

/// Initial class selection used when no trusted settings are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultSelection {
    #[default]
    All,
    None,
}

impl DefaultSelection {
    pub fn classes(self) -> BTreeSet<CharacterClass> {
        match self {
            DefaultSelection::All => CharacterClass::ALL.into_iter().collect(),
            DefaultSelection::None => BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_classes: DefaultSelection,
    /// Interactive mode writes its log to `pwgen.log` in the storage directory.
    pub log_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_classes: DefaultSelection::All,
            log_file: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Read `config.toml` from `dir`. A missing file gives the defaults.
    pub fn read(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Directory holding settings, geometry, configuration and the log file.
pub fn storage_dir() -> PathBuf {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .map(|d| d.join("pwgen"))
        .unwrap_or_else(|| PathBuf::from(".pwgen"))
}

/// Create `dir` if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::read(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn reads_selection_policy() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "default_classes = \"none\"\nlog_file = false\n",
        )
        .unwrap();

        let config = Config::read(dir.path()).unwrap();
        assert_eq!(config.default_classes, DefaultSelection::None);
        assert!(!config.log_file);
        assert!(config.default_classes.classes().is_empty());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "log_file = false\n").unwrap();

        let config = Config::read(dir.path()).unwrap();
        assert_eq!(config.default_classes, DefaultSelection::All);
        assert_eq!(config.default_classes.classes().len(), 5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "default_classes = \"some\"\n").unwrap();

        assert!(matches!(
            Config::read(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
