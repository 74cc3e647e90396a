use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for the raw slot I/O.
///
/// Implementations use `&self` for writes; the single-threaded in-memory
/// backend relies on interior mutability for that.
pub trait StorageBackend {
    /// Read the raw slot text.
    /// Returns Ok(None) if nothing has been stored yet.
    fn read_slot(&self) -> Result<Option<String>>;

    /// Replace the slot contents.
    /// MUST be atomic: a reader sees either the old text or the new text.
    fn write_slot(&self, content: &str) -> Result<()>;

    /// Where the slot lives. For MemBackend, a virtual path.
    fn slot_path(&self) -> PathBuf;

    /// Keep the current slot contents somewhere the next write cannot reach.
    /// Called when loading had to give up on some or all of the slot.
    /// Returns where the contents went.
    fn preserve_slot(&self) -> Result<PathBuf>;
}
