//! # CLI Behavior
//!
//! This is **one possible UI client** for grocer, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the
//! `grocer` library.
//!
//! ## Naked Execution (`grocer`)
//!
//! Running `grocer` with no arguments defaults to `grocer list`.
//!
//! ## Pointing at Items
//!
//! Commands that act on items take selectors: the number shown by `list`
//! (`2`, `c1` for checked items), an id prefix as shown by `list --ids`, or
//! an explicit id with `@` (`@7`, for ids that look like numbers).
//!
//! Numbers depend on the grouping. The global `--by` flag sets it for listing
//! and for resolving numbers alike, so `grocer list --by store` followed by
//! `grocer check 1 --by store` checks the item that was shown as `1.`.
//! Without `--by`, both use `default_mode` from the config. Ids always work.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `print`: Output formatting (listings, colors, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod print;
mod setup;

pub use commands::run;
