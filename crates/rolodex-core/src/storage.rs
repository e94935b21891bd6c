//! Persistence backends for the contact blob.
//!
//! The store persists a single serialized snapshot under a single key. A
//! backend only needs to hand back the last blob it was given.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::{Error, Result};

/// File name of the contact blob inside the data directory.
pub const CONTACTS_FILE: &str = "contacts.json";

/// A key-value blob store holding exactly one value.
pub trait Storage {
    /// Reads the persisted blob, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the persisted blob.
    ///
    /// Must be durable before returning: a `load` right after a successful
    /// `save` returns the same blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob could not be written.
    fn save(&mut self, blob: &str) -> Result<()>;

    /// Moves an unreadable blob out of the way.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot move the blob.
    fn quarantine(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Blob stored in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates a storage backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_dir>/rolodex/contacts.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rolodex")
            .join(CONTACTS_FILE)
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never leaves a half-written blob.
        let tmp = self.sibling(".tmp");
        std::fs::write(&tmp, blob)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = blob.len(), "Contacts saved");
        Ok(())
    }

    fn quarantine(&mut self) -> Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3fZ");
        let mut target = self.sibling(&format!(".corrupt-{stamp}"));
        let mut attempt = 1;
        while target.exists() {
            target = self.sibling(&format!(".corrupt-{stamp}-{attempt}"));
            attempt += 1;
        }

        std::fs::rename(&self.path, &target)?;
        warn!(
            from = %self.path.display(),
            to = %target.display(),
            "Quarantined unreadable contacts file"
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryCell {
    blob: Option<String>,
    fail_saves: bool,
    quarantined: Vec<String>,
}

/// In-process blob storage.
///
/// Clones share the same cell, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    cell: Rc<RefCell<MemoryCell>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with `blob`.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.cell.borrow_mut().blob = Some(blob.into());
        storage
    }

    /// Returns the current blob.
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.cell.borrow().blob.clone()
    }

    /// Makes every subsequent `save` fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.cell.borrow_mut().fail_saves = fail;
    }

    /// Blobs moved aside by `quarantine`, oldest first.
    #[must_use]
    pub fn quarantined(&self) -> Vec<String> {
        self.cell.borrow().quarantined.clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.cell.borrow().blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<()> {
        let mut cell = self.cell.borrow_mut();
        if cell.fail_saves {
            return Err(Error::Storage("memory storage is read-only".to_string()));
        }
        cell.blob = Some(blob.to_string());
        Ok(())
    }

    fn quarantine(&mut self) -> Result<()> {
        let mut cell = self.cell.borrow_mut();
        if let Some(blob) = cell.blob.take() {
            cell.quarantined.push(blob);
        }
        Ok(())
    }
}
