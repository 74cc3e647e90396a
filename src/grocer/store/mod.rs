//! # Storage Layer
//!
//! grocer keeps the whole list in a single durable **slot**: one named key
//! holding the collection as a JSON array of items. There is no versioning
//! header and no per-item files; every mutation rewrites the slot.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`] handles the "how": reading and writing the raw
//!   slot text. It knows nothing about items.
//! - [`persistence`] handles the "what": turning the raw text into items on
//!   startup (recovering from anything malformed) and serializing the list on
//!   every write-through.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production backend. The slot is a file,
//!   replaced atomically on every write.
//! - [`mem_backend::MemBackend`]: In-memory backend for tests, able to simulate
//!   write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── grocery_list.json           # The slot
//! ├── grocery_list.json.corrupt   # Set aside when the slot could not be read
//! └── config.toml                 # Optional configuration
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod persistence;

pub use backend::StorageBackend;

/// File name of the durable slot inside the data directory.
pub const SLOT_FILENAME: &str = "grocery_list.json";

/// Appended to the slot file name when an unreadable slot is set aside.
pub const CORRUPT_SUFFIX: &str = "corrupt";
