//! Panel geometry persistence.
//!
//! `window.bin` is 16 little-endian bytes: a `u64` version marker followed
//! by `u16` width, height, x and y.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::ensure_dir;

pub const GEOMETRY_VERSION: u64 = 1;
const FILE_NAME: &str = "window.bin";
const RECORD_LEN: usize = 16;

/// Size and position of the interactive panel, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub x: u16,
    pub y: u16,
}

impl Geometry {
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[..8].copy_from_slice(&GEOMETRY_VERSION.to_le_bytes());
        out[8..10].copy_from_slice(&self.width.to_le_bytes());
        out[10..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.x.to_le_bytes());
        out[14..16].copy_from_slice(&self.y.to_le_bytes());
        out
    }

    /// `None` unless `bytes` is exactly one record of the current version.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; RECORD_LEN] = bytes.try_into().ok()?;
        let version = u64::from_le_bytes(bytes[..8].try_into().ok()?);
        if version != GEOMETRY_VERSION {
            return None;
        }
        let field = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        Some(Self {
            width: field(8),
            height: field(10),
            x: field(12),
            y: field(14),
        })
    }

    /// Load the stored geometry, or `None` if absent or untrusted.
    pub fn load(dir: &Path) -> Option<Self> {
        let path = path(dir);
        match fs::read(&path) {
            Ok(bytes) => {
                let geometry = Self::decode(&bytes);
                if geometry.is_none() {
                    warn!(path = %path.display(), "ignoring stored panel geometry");
                }
                geometry
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), "failed to read panel geometry: {e}");
                None
            }
        }
    }

    pub fn save(&self, dir: &Path) -> io::Result<()> {
        ensure_dir(dir)?;
        fs::write(path(dir), self.encode())
    }

    /// Shrink and move the panel so it fits a `cols` x `rows` terminal.
    pub fn fit(self, cols: u16, rows: u16, min_width: u16) -> Self {
        let width = self.width.clamp(min_width.min(cols), cols.max(1));
        let height = self.height.min(rows);
        Self {
            width,
            height,
            x: self.x.min(cols.saturating_sub(width)),
            y: self.y.min(rows.saturating_sub(height)),
        }
    }
}

pub fn path(dir: &Path) -> PathBuf {
    dir.join(FILE_NAME)
}
