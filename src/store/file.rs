//! Implements the `Backend` trait with one JSON file per key inside a directory.

use crate::store::Backend;
use crate::{utils, Result};
use anyhow::bail;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Stores each key as `<dir>/<key>.json`. Writes go to a temporary file first and are then renamed
/// over the old file, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a `FileBackend` rooted at `dir`, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(|c: char| c == '/' || c == '\\' || c.is_control())
        {
            bail!("'{key}' cannot be used as a storage key");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        if !path.is_file() {
            trace!("Nothing stored at {}", path.display());
            return Ok(None);
        }
        utils::read(&path).map(Some)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("Writing {} bytes to {}", value.len(), path.display());
        utils::write_atomic(&path, value)
    }
}
