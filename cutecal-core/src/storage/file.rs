//! Directory-backed key-value store: one JSON file per key.

use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{CalError, CalResult};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// `@CuteCalendar:events` is stored as `CuteCalendar-events.json`.
    pub fn path_for(&self, key: &str) -> CalResult<PathBuf> {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
            .collect();
        let name = name.trim_matches('-');

        if name.is_empty() {
            return Err(CalError::Storage(format!("Invalid storage key '{}'", key)));
        }

        Ok(self.dir.join(format!("{}.json", name)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CalResult<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        log::debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> CalResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CalError::Storage(format!(
                "Could not create data directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key)?;
        std::fs::write(&path, value)?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CalResult<()> {
        let path = self.path_for(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
