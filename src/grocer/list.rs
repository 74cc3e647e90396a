//! # The Item Store
//!
//! [`GroceryList`] owns the canonical collection: an ordered `Vec<Item>` whose
//! order is the only state beyond the field values. Every public mutation is
//! applied in full before it returns (or rejected before anything changes),
//! and every change is written through to the storage backend before the
//! call returns.
//!
//! ## Write-Through and Failures
//!
//! Writes happen synchronously, in mutation order, so the slot can never hold
//! an older state than the last completed mutation. When a write fails the
//! in-memory change is **kept**: the list stays usable and the next successful
//! write brings the slot up to date. The failure is logged and remains
//! available from [`GroceryList::last_write_error`] until a write succeeds.
//!
//! Calls that turn out not to change anything (an edit to the same value, a
//! no-op move, clearing when nothing is checked) do not write.
//!
//! ## Identity
//!
//! Items are addressed by [`ItemId`] only. Positions are a presentation
//! concern; the API layer resolves them to ids before calling in here.

use crate::codec;
use crate::error::{GrocerError, Result};
use crate::model::{Field, FilterMode, Item, ItemDraft, ItemId, RawItem};
use crate::reorder;
use crate::store::{persistence, StorageBackend};
use crate::view::{self, Projection};
use std::collections::HashSet;

pub struct GroceryList<B: StorageBackend> {
    items: Vec<Item>,
    backend: B,
    last_write_error: Option<GrocerError>,
}

impl<B: StorageBackend> GroceryList<B> {
    /// Load the list from `backend`. Never fails: a damaged slot yields an
    /// empty or partial list (see [`persistence::load`]).
    pub fn open(backend: B) -> Self {
        let items = persistence::load(&backend);
        log::debug!(
            "loaded {} items from {}",
            items.len(),
            backend.slot_path().display()
        );
        Self {
            items,
            backend,
            last_write_error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Items in canonical order.
    pub fn snapshot(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Result<&Item> {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .ok_or_else(|| GrocerError::NotFound(id.clone()))
    }

    pub fn project(&self, mode: FilterMode) -> Projection<'_> {
        view::project(&self.items, mode)
    }

    /// The most recent write failure, if no write has succeeded since.
    pub fn last_write_error(&self) -> Option<&GrocerError> {
        self.last_write_error.as_ref()
    }

    pub fn add(&mut self, draft: ItemDraft) -> Result<Item> {
        let item = draft.into_item()?;
        self.items.push(item.clone());
        self.write_through();
        Ok(item)
    }

    /// Set one text field. Returns whether the item changed.
    ///
    /// The value is trimmed. Blanking a required field keeps the previous
    /// value, the way an inline editor reverts when left empty.
    pub fn edit(&mut self, id: &ItemId, field: Field, value: &str) -> Result<bool> {
        let index = self.position(id)?;
        let trimmed = value.trim();
        if field.is_required() && trimmed.is_empty() {
            log::debug!("ignoring blank {} for {}", field, id);
            return Ok(false);
        }

        let slot = self.items[index].field_mut(field);
        if slot.as_str() == trimmed {
            return Ok(false);
        }
        *slot = trimmed.to_string();
        self.write_through();
        Ok(true)
    }

    pub fn set_checked(&mut self, id: &ItemId, checked: bool) -> Result<()> {
        let index = self.position(id)?;
        if self.items[index].checked != checked {
            self.items[index].checked = checked;
            self.write_through();
        }
        Ok(())
    }

    /// Flip the checked flag. Returns the new value.
    pub fn toggle_checked(&mut self, id: &ItemId) -> Result<bool> {
        let index = self.position(id)?;
        let checked = !self.items[index].checked;
        self.items[index].checked = checked;
        self.write_through();
        Ok(checked)
    }

    pub fn remove(&mut self, id: &ItemId) -> Result<Item> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.write_through();
        Ok(removed)
    }

    /// Uncheck every checked item in place. Nothing is deleted or reordered.
    /// Returns how many items were unchecked.
    pub fn clear_checked(&mut self) -> usize {
        let mut cleared = 0;
        for item in self.items.iter_mut().filter(|item| item.checked) {
            item.checked = false;
            cleared += 1;
        }
        if cleared > 0 {
            self.write_through();
        }
        cleared
    }

    /// Replace the whole collection, all or nothing.
    ///
    /// Every candidate is validated and defaulted first; if any is rejected
    /// the current list is left exactly as it was.
    pub fn replace_all(&mut self, candidates: Vec<RawItem>) -> Result<()> {
        let mut taken = HashSet::new();
        let items = candidates
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_item(i + 1, &mut taken))
            .collect::<Result<Vec<_>>>()?;

        self.items = items;
        self.write_through();
        Ok(())
    }

    /// Import an exported file. Returns the number of items now in the list.
    pub fn import_text(&mut self, text: &str) -> Result<usize> {
        let candidates = codec::parse_import(text).inspect_err(|e| {
            log::warn!("import rejected: {}", e);
        })?;
        self.replace_all(candidates).inspect_err(|e| {
            log::warn!("import rejected: {}", e);
        })?;
        Ok(self.items.len())
    }

    pub fn export_text(&self) -> Result<String> {
        codec::export(&self.items)
    }

    /// Move an unchecked item between two 0-based positions of the unchecked
    /// partition in canonical order. Returns false for a no-op move.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        match reorder::resolve(&self.items, from, to) {
            Some(items) => {
                self.items = items;
                self.write_through();
                true
            }
            None => false,
        }
    }

    fn position(&self, id: &ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| GrocerError::NotFound(id.clone()))
    }

    fn write_through(&mut self) {
        match persistence::save(&self.backend, &self.items) {
            Ok(()) => {
                if self.last_write_error.take().is_some() {
                    log::info!("list saved again after an earlier write failure");
                }
            }
            Err(e) => {
                log::error!("{}", e);
                self.last_write_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn list() -> GroceryList<MemBackend> {
        GroceryList::open(MemBackend::new())
    }

    fn add(list: &mut GroceryList<MemBackend>, name: &str, store: &str, category: &str) -> ItemId {
        list.add(ItemDraft::new(name, store, category)).unwrap().id
    }

    fn names(list: &GroceryList<MemBackend>) -> Vec<&str> {
        list.snapshot().iter().map(|i| i.name.as_str()).collect()
    }

    fn stored_len(list: &GroceryList<MemBackend>) -> usize {
        let slot = list.backend().slot().unwrap();
        let value: serde_json::Value = serde_json::from_str(&slot).unwrap();
        value.as_array().unwrap().len()
    }

    #[test]
    fn test_add_to_empty_list_persists_one_item() {
        let mut list = list();
        let item = list.add(ItemDraft::new("Milk", "Costco", "Dairy")).unwrap();

        assert_eq!(list.len(), 1);
        assert!(!item.checked);
        assert_eq!(stored_len(&list), 1);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut list = list();
        add(&mut list, "Milk", "Costco", "Dairy");
        add(&mut list, "Bread", "Aldi", "Bakery");
        assert_eq!(names(&list), vec!["Milk", "Bread"]);
    }

    #[test]
    fn test_add_rejects_blank_fields_without_writing() {
        let mut list = list();
        let err = list.add(ItemDraft::new("Milk", "Costco", " ")).unwrap_err();
        assert!(matches!(err, GrocerError::Validation(_)));
        assert!(list.is_empty());
        assert_eq!(list.backend().write_count(), 0);
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut list = list();
        for i in 0..20 {
            add(&mut list, &format!("Item {}", i), "S", "C");
        }
        let first = list.snapshot()[3].id.clone();
        list.remove(&first).unwrap();
        add(&mut list, "Late", "S", "C");

        let ids: HashSet<&ItemId> = list.snapshot().iter().map(|i| &i.id).collect();
        assert_eq!(ids.len(), list.len());
    }

    #[test]
    fn test_edit_trims_and_persists() {
        let mut list = list();
        let id = add(&mut list, "Milk", "Costco", "Dairy");
        assert!(list.edit(&id, Field::Name, "  Oat milk ").unwrap());
        assert_eq!(list.get(&id).unwrap().name, "Oat milk");
        assert!(list.backend().slot().unwrap().contains("Oat milk"));
    }

    #[test]
    fn test_edit_blank_required_field_keeps_old_value() {
        let mut list = list();
        let id = add(&mut list, "Milk", "Costco", "Dairy");
        let writes = list.backend().write_count();

        assert!(!list.edit(&id, Field::Store, "   ").unwrap());
        assert_eq!(list.get(&id).unwrap().store, "Costco");
        assert_eq!(list.backend().write_count(), writes);
    }

    #[test]
    fn test_edit_can_blank_quantity() {
        let mut list = list();
        let id = list
            .add(ItemDraft::new("Milk", "Costco", "Dairy").with_quantity("2"))
            .unwrap()
            .id;
        assert!(list.edit(&id, Field::Quantity, "").unwrap());
        assert_eq!(list.get(&id).unwrap().quantity, "");
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut list = list();
        let err = list
            .edit(&ItemId::from("nope"), Field::Name, "x")
            .unwrap_err();
        assert!(matches!(err, GrocerError::NotFound(_)));
    }

    #[test]
    fn test_check_and_toggle() {
        let mut list = list();
        let id = add(&mut list, "Milk", "Costco", "Dairy");
        list.set_checked(&id, true).unwrap();
        assert!(list.get(&id).unwrap().checked);
        assert!(!list.toggle_checked(&id).unwrap());
        assert!(!list.get(&id).unwrap().checked);
        assert!(matches!(
            list.set_checked(&ItemId::from("nope"), true),
            Err(GrocerError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut list = list();
        add(&mut list, "A", "S", "C");
        let b = add(&mut list, "B", "S", "C");
        add(&mut list, "C", "S", "C");

        let removed = list.remove(&b).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(names(&list), vec!["A", "C"]);
        assert_eq!(stored_len(&list), 2);
        assert!(matches!(list.remove(&b), Err(GrocerError::NotFound(_))));
    }

    #[test]
    fn test_clear_checked_unchecks_without_removing() {
        let mut list = list();
        let a = add(&mut list, "A", "S", "C");
        add(&mut list, "B", "S", "C");
        list.set_checked(&a, true).unwrap();

        assert_eq!(list.clear_checked(), 1);
        assert_eq!(list.len(), 2);
        assert!(!list.get(&a).unwrap().checked);
        assert_eq!(names(&list), vec!["A", "B"]);
        assert_eq!(list.clear_checked(), 0);
    }

    #[test]
    fn test_reorder_uses_canonical_unchecked_order() {
        let mut list = list();
        add(&mut list, "Zucchini", "Z", "C");
        let done = add(&mut list, "Done", "A", "C");
        add(&mut list, "Apples", "A", "C");
        add(&mut list, "Milk", "M", "C");
        list.set_checked(&done, true).unwrap();

        assert!(list.reorder(2, 0));
        assert_eq!(names(&list), vec!["Milk", "Zucchini", "Apples", "Done"]);

        assert!(list.reorder(0, 2));
        assert_eq!(names(&list), vec!["Zucchini", "Apples", "Milk", "Done"]);
    }

    #[test]
    fn test_reorder_noop_does_not_write() {
        let mut list = list();
        add(&mut list, "A", "S", "C");
        let writes = list.backend().write_count();
        assert!(!list.reorder(0, 0));
        assert!(!list.reorder(0, 4));
        assert_eq!(list.backend().write_count(), writes);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut source = list();
        let a = add(&mut source, "Milk", "Costco", "Dairy");
        add(&mut source, "Bread", "Aldi", "Bakery");
        source.set_checked(&a, true).unwrap();
        let text = source.export_text().unwrap();

        let mut target = list();
        assert_eq!(target.import_text(&text).unwrap(), 2);
        assert_eq!(target.snapshot(), source.snapshot());
    }

    #[test]
    fn test_import_not_json_leaves_list_unchanged() {
        let mut list = list();
        add(&mut list, "Milk", "Costco", "Dairy");
        let before = list.snapshot().to_vec();
        let writes = list.backend().write_count();

        let err = list.import_text("not json").unwrap_err();
        assert!(matches!(err, GrocerError::Format(_)));
        assert_eq!(list.snapshot(), before.as_slice());
        assert_eq!(list.backend().write_count(), writes);
    }

    #[test]
    fn test_import_with_one_invalid_item_is_rejected_whole() {
        let mut list = list();
        add(&mut list, "Milk", "Costco", "Dairy");
        let before = list.snapshot().to_vec();

        let text = r#"[
            {"name": "Eggs", "store": "Aldi", "category": "Dairy"},
            {"name": "Ghost", "store": "", "category": "Dairy"}
        ]"#;
        let err = list.import_text(text).unwrap_err();
        assert!(matches!(err, GrocerError::Validation(_)));
        assert_eq!(list.snapshot(), before.as_slice());
    }

    #[test]
    fn test_import_generates_missing_ids_only() {
        let mut list = list();
        let text = r#"[
            {"id": "keep-me", "name": "Eggs", "store": "Aldi", "category": "Dairy"},
            {"name": "Bread", "store": "Aldi", "category": "Bakery", "quantity": "1"}
        ]"#;
        list.import_text(text).unwrap();
        assert_eq!(list.snapshot()[0].id.as_str(), "keep-me");
        assert!(!list.snapshot()[1].id.as_str().is_empty());
        assert_eq!(list.snapshot()[1].quantity, "1");
    }

    #[test]
    fn test_write_failure_keeps_mutation_and_recovers() {
        let mut list = list();
        list.backend().set_simulate_write_error(true);

        let id = add(&mut list, "Milk", "Costco", "Dairy");
        assert_eq!(list.len(), 1);
        assert!(matches!(
            list.last_write_error(),
            Some(GrocerError::Persistence(_))
        ));
        assert_eq!(list.backend().slot(), None);

        list.backend().set_simulate_write_error(false);
        list.set_checked(&id, true).unwrap();
        assert!(list.last_write_error().is_none());
        assert_eq!(stored_len(&list), 1);
    }

    #[test]
    fn test_open_reads_existing_slot() {
        let backend = MemBackend::with_slot(
            r#"[{"id": "1", "name": "Milk", "store": "Costco", "category": "Dairy", "quantity": "", "checked": true}]"#,
        );
        let list = GroceryList::open(backend);
        assert_eq!(list.len(), 1);
        assert!(list.get(&ItemId::from("1")).unwrap().checked);
    }
}
