//! # Grocer Architecture
//!
//! Grocer is a **UI-agnostic grocery list library** with a command-line client.
//! One user, one list, kept in memory and mirrored to a single durable slot
//! after every change.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders listings, handles terminal I/O │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, index.rs)                               │
//! │  - One method per user intent                               │
//! │  - Normalizes inputs (display indexes → ItemIds)            │
//! │  - Returns structured Result<CmdResult> types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Item Store (list.rs) + pure helpers                        │
//! │  - view.rs: presentation order                              │
//! │  - reorder.rs: moves within the unchecked partition         │
//! │  - codec.rs: export/import JSON                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait, one slot                           │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It
//! never writes to stdout/stderr and never exits the process. Diagnostics go
//! through the `log` facade; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Item store and helpers**: thorough unit tests against `MemBackend`.
//! 2. **API**: index resolution, batching, and messages.
//! 3. **Backends and binary**: integration tests under `tests/` with real
//!    temp directories.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`list`]: The canonical item collection and its mutations
//! - [`view`]: Filter/grouping projection
//! - [`reorder`]: Move resolution within unchecked items
//! - [`codec`]: Export/import format
//! - [`index`]: Display indexing (1, c1 notation)
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Item`, `ItemId`, `FilterMode`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod index;
pub mod list;
pub mod model;
pub mod reorder;
pub mod store;
pub mod view;
