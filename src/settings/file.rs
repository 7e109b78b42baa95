//! Settings file persistence.
//!
//! `settings.toml` is a flat key/value record guarded by a version marker;
//! a record written under another version is ignored in favour of the
//! defaults.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Settings, SettingsRecord};
use crate::config::{DefaultSelection, ensure_dir};
use crate::pass::CharacterClass;
use crate::pass::charset::UnknownClass;

pub const SETTINGS_VERSION: u64 = 1;
const FILE_NAME: &str = "settings.toml";
const CLASS_DELIMITER: &str = ";";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSettings {
    version: u64,
    min_length: usize,
    max_length: usize,
    classes: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("settings version {found} does not match {expected}")]
    Version { found: u64, expected: u64 },
    #[error(transparent)]
    UnknownClass(#[from] UnknownClass),
}

pub fn path(dir: &Path) -> PathBuf {
    dir.join(FILE_NAME)
}

/// Read the stored record. `Ok(None)` means nothing has been saved yet.
pub fn read(dir: &Path) -> Result<Option<SettingsRecord>, StoreError> {
    let path = path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Io { path, source }),
    };

    let stored: StoredSettings = toml::from_str(&contents)?;
    if stored.version != SETTINGS_VERSION {
        return Err(StoreError::Version {
            found: stored.version,
            expected: SETTINGS_VERSION,
        });
    }

    Ok(Some(SettingsRecord {
        min_length: stored.min_length,
        max_length: stored.max_length,
        classes: parse_classes(&stored.classes)?,
    }))
}

pub fn write(dir: &Path, record: &SettingsRecord) -> Result<(), StoreError> {
    ensure_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let stored = StoredSettings {
        version: SETTINGS_VERSION,
        min_length: record.min_length,
        max_length: record.max_length,
        classes: join_classes(&record.classes),
    };
    let data = toml::to_string(&stored)?;

    let path = path(dir);
    fs::write(&path, data).map_err(|source| StoreError::Io { path, source })
}

fn parse_classes(list: &str) -> Result<BTreeSet<CharacterClass>, UnknownClass> {
    list.split(CLASS_DELIMITER)
        .filter(|name| !name.trim().is_empty())
        .map(str::parse)
        .collect()
}

fn join_classes(classes: &BTreeSet<CharacterClass>) -> String {
    classes
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(CLASS_DELIMITER)
}

impl Settings {
    /// Load stored settings from `dir`, falling back to the defaults for
    /// `selection` when nothing trusted is stored.
    pub fn load_from_dir(dir: &Path, selection: DefaultSelection) -> Self {
        let record = match read(dir) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(dir = %dir.display(), "no stored settings");
                SettingsRecord::with_classes(selection.classes())
            }
            Err(e) => {
                warn!("ignoring stored settings: {e}");
                SettingsRecord::with_classes(selection.classes())
            }
        };
        Settings::from_record(record)
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<(), StoreError> {
        write(dir, &self.record())
    }
}
