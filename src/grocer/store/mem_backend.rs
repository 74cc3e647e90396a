use super::backend::StorageBackend;
use crate::error::{GrocerError, Result};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since grocer is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    slot: RefCell<Option<String>>,
    preserved: RefCell<Vec<String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `content` already in the slot, as if written by an earlier session.
    pub fn with_slot(content: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.slot.borrow_mut() = Some(content.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Current slot text, for assertions.
    pub fn slot(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Slot contents set aside by `preserve_slot`, oldest first.
    pub fn preserved(&self) -> Vec<String> {
        self.preserved.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn read_slot(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write_slot(&self, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(GrocerError::Persistence(
                "Simulated write error".to_string(),
            ));
        }
        *self.slot.borrow_mut() = Some(content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn slot_path(&self) -> PathBuf {
        PathBuf::from(format!("memory://{}", super::SLOT_FILENAME))
    }

    fn preserve_slot(&self) -> Result<PathBuf> {
        let content = self
            .slot
            .borrow()
            .clone()
            .ok_or_else(|| GrocerError::Persistence("Nothing stored to preserve".to_string()))?;
        let mut preserved = self.preserved.borrow_mut();
        preserved.push(content);
        Ok(PathBuf::from(format!(
            "memory://{}.{}.{}",
            super::SLOT_FILENAME,
            super::CORRUPT_SUFFIX,
            preserved.len()
        )))
    }
}
