use super::backend::StorageBackend;
use crate::error::{GrocerError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed slot: `<root>/grocery_list.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First unused `grocery_list.json.corrupt[.N]` name in the root.
    fn preserve_path(&self) -> PathBuf {
        let base = format!("{}.{}", super::SLOT_FILENAME, super::CORRUPT_SUFFIX);
        let mut candidate = self.root.join(&base);
        let mut n = 1;
        while candidate.exists() {
            candidate = self.root.join(format!("{}.{}", base, n));
            n += 1;
        }
        candidate
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(GrocerError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_slot(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path()) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GrocerError::Io(e)),
        }
    }

    fn write_slot(&self, content: &str) -> Result<()> {
        let persist = |e: std::io::Error| {
            GrocerError::Persistence(format!("{}: {}", self.slot_path().display(), e))
        };
        self.ensure_dir().map_err(|e| match e {
            GrocerError::Io(io) => persist(io),
            other => other,
        })?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".grocer-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(persist)?;
        if let Err(e) = fs::rename(&tmp_path, self.slot_path()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(persist(e));
        }
        Ok(())
    }

    fn slot_path(&self) -> PathBuf {
        self.root.join(super::SLOT_FILENAME)
    }

    fn preserve_slot(&self) -> Result<PathBuf> {
        let slot = self.slot_path();
        let target = self.preserve_path();
        // Copy when we can read it, so a partly recovered slot stays in place
        // until the next write. Unreadable files are moved instead.
        if fs::copy(&slot, &target).is_err() {
            fs::rename(&slot, &target).map_err(|e| {
                GrocerError::Persistence(format!("{}: {}", slot.display(), e))
            })?;
        }
        Ok(target)
    }
}
