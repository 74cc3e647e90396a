//! # API Facade
//!
//! The API layer is a **thin facade** over the item store. It is the single
//! entry point for every user intent, whatever UI is driving it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Normalizes inputs**: display indexes and id prefixes become [`ItemId`]s,
//!   resolved against the projection the user is looking at.
//! - **Dispatches** to [`GroceryList`] operations.
//! - **Returns structured types** (`Result<CmdResult>`) carrying the affected
//!   or listed items plus leveled messages.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `list.rs`, `view.rs`, `reorder.rs`.
//! - **I/O to the terminal**: no stdout, stderr, or exit codes.
//! - **File dialogs**: export hands back text, import takes text.
//!
//! ## Batches Resolve Up Front
//!
//! Commands that accept several selectors (`delete 1 3`) resolve all of them
//! before touching anything. Deleting item 1 would otherwise shift what "3"
//! means halfway through, and a typo in the last selector would leave the
//! batch half-applied.
//!
//! ## Write Failures
//!
//! A failed write-through never fails the intent: the change is applied in
//! memory. The result carries a warning instead, so the UI can tell the user
//! their list is not saved yet.

use crate::error::{GrocerError, Result};
use crate::index::{self, DisplayItem, ItemSelector};
use crate::list::GroceryList;
use crate::model::{Field, FilterMode, Item, ItemDraft, ItemId};
use crate::store::StorageBackend;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_items: Vec<Item>,
    pub listed_items: Vec<DisplayItem>,
    /// Grouping used for `listed_items`.
    pub mode: FilterMode,
    /// Export payload, for the UI to save wherever the user chose.
    pub export: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

/// The main API facade for grocer operations.
///
/// Generic over `StorageBackend`:
/// - Production: `GrocerApi<FsBackend>`
/// - Testing: `GrocerApi<MemBackend>`
pub struct GrocerApi<B: StorageBackend> {
    list: GroceryList<B>,
    mode: FilterMode,
}

impl<B: StorageBackend> GrocerApi<B> {
    pub fn new(list: GroceryList<B>, mode: FilterMode) -> Self {
        Self { list, mode }
    }

    pub fn open(backend: B, mode: FilterMode) -> Self {
        Self::new(GroceryList::open(backend), mode)
    }

    pub fn list(&self) -> &GroceryList<B> {
        &self.list
    }

    pub fn slot_path(&self) -> PathBuf {
        self.list.backend().slot_path()
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.mode
    }

    /// Change the grouping used for listings and index resolution.
    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    pub fn list_items(&self) -> CmdResult {
        let projection = self.list.project(self.mode);
        CmdResult {
            listed_items: index::index_items(&projection),
            mode: self.mode,
            ..CmdResult::default()
        }
    }

    pub fn add_item(&mut self, draft: ItemDraft) -> Result<CmdResult> {
        let item = self.list.add(draft)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Added {} ({}, {})",
            item.name, item.store, item.category
        )));
        result.affected_items.push(item);
        Ok(self.finish(result))
    }

    pub fn edit_field(&mut self, selector: &str, field: Field, value: &str) -> Result<CmdResult> {
        let id = self.resolve_one(selector)?;
        let changed = self.list.edit(&id, field, value)?;
        let item = self.list.get(&id)?.clone();

        let mut result = CmdResult::default();
        if changed {
            result.add_message(CmdMessage::success(format!(
                "Updated {} of {}",
                field, item.name
            )));
        } else if field.is_required() && value.trim().is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "{} cannot be empty; kept \"{}\"",
                field,
                item.field(field)
            )));
        } else {
            result.add_message(CmdMessage::info(format!("{} unchanged", item.name)));
        }
        result.affected_items.push(item);
        Ok(self.finish(result))
    }

    pub fn toggle_checked<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let ids = self.resolve_many(selectors)?;
        let mut result = CmdResult::default();
        for id in ids {
            let checked = self.list.toggle_checked(&id)?;
            let item = self.list.get(&id)?.clone();
            result.add_message(CmdMessage::success(format!(
                "{} {}",
                if checked { "Checked" } else { "Unchecked" },
                item.name
            )));
            result.affected_items.push(item);
        }
        Ok(self.finish(result))
    }

    pub fn set_checked<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        checked: bool,
    ) -> Result<CmdResult> {
        let ids = self.resolve_many(selectors)?;
        let mut result = CmdResult::default();
        for id in ids {
            self.list.set_checked(&id, checked)?;
            let item = self.list.get(&id)?.clone();
            result.add_message(CmdMessage::success(format!(
                "{} {}",
                if checked { "Checked" } else { "Unchecked" },
                item.name
            )));
            result.affected_items.push(item);
        }
        Ok(self.finish(result))
    }

    pub fn delete_items<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let ids = self.resolve_many(selectors)?;
        let mut result = CmdResult::default();
        for id in ids {
            let removed = self.list.remove(&id)?;
            result.add_message(CmdMessage::success(format!("Deleted {}", removed.name)));
            result.affected_items.push(removed);
        }
        Ok(self.finish(result))
    }

    /// Move an unchecked item. Positions are 1-based and count unchecked
    /// items in manual order (what `list --by none` shows), whatever the
    /// current grouping mode.
    ///
    /// Positions come straight from the user here, so an out-of-range one is
    /// reported as an [`GrocerError::Api`] error instead of being ignored.
    /// The no-op rule for out-of-range or equal positions lives in
    /// [`crate::reorder::resolve`]; `from == to` still reaches it and comes
    /// back as "Nothing to move".
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<CmdResult> {
        let open = self.list.project(FilterMode::None).unchecked.len();
        for position in [from, to] {
            if position == 0 || position > open {
                return Err(GrocerError::Api(format!(
                    "Position {} is out of range (1-{} unchecked items)",
                    position, open
                )));
            }
        }

        let moved = self.list.project(FilterMode::None).unchecked[from - 1].clone();
        let mut result = CmdResult::default();
        if self.list.reorder(from - 1, to - 1) {
            result.add_message(CmdMessage::success(format!(
                "Moved {} to position {}",
                moved.name, to
            )));
            if self.mode != FilterMode::None {
                result.add_message(CmdMessage::info(format!(
                    "Listing is grouped by {}; manual order shows with --by none",
                    self.mode
                )));
            }
            result.affected_items.push(moved);
        } else {
            result.add_message(CmdMessage::info("Nothing to move"));
        }
        Ok(self.finish(result))
    }

    pub fn clear_checked(&mut self) -> Result<CmdResult> {
        let cleared = self.list.clear_checked();
        let mut result = CmdResult::default();
        if cleared == 0 {
            result.add_message(CmdMessage::info("No checked items"));
        } else {
            result.add_message(CmdMessage::success(format!(
                "Unchecked {} item{}",
                cleared,
                if cleared == 1 { "" } else { "s" }
            )));
        }
        Ok(self.finish(result))
    }

    pub fn export_text(&self) -> Result<CmdResult> {
        let text = self.list.export_text()?;
        Ok(CmdResult {
            export: Some(text),
            ..CmdResult::default()
        })
    }

    /// Replace the list with the contents of an exported file.
    /// On any error the current list is kept as it was.
    pub fn import_text(&mut self, text: &str) -> Result<CmdResult> {
        let count = self.list.import_text(text)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Imported {} item{}",
            count,
            if count == 1 { "" } else { "s" }
        )));
        Ok(self.finish(result))
    }

    fn resolve_one(&self, selector: &str) -> Result<ItemId> {
        let projection = self.list.project(self.mode);
        index::resolve(&projection, &ItemSelector::parse(selector))
    }

    fn resolve_many<I: AsRef<str>>(&self, selectors: &[I]) -> Result<Vec<ItemId>> {
        let projection = self.list.project(self.mode);
        let mut ids: Vec<ItemId> = Vec::with_capacity(selectors.len());
        for selector in selectors {
            let id = index::resolve(&projection, &ItemSelector::parse(selector.as_ref()))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn finish(&self, mut result: CmdResult) -> CmdResult {
        if let Some(e) = self.list.last_write_error() {
            result.add_message(CmdMessage::warning(format!(
                "{} (changes are kept in memory only)",
                e
            )));
        }
        result
    }
}
