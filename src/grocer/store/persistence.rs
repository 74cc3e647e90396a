//! Persistence adapter: the durable slot <-> the item collection.
//!
//! Loading fails open. Startup must never be blocked by a damaged slot, so
//! anything unreadable degrades to "fewer items" and a log line instead of an
//! error. Whatever could not be loaded is first handed to
//! [`StorageBackend::preserve_slot`], so the next write-through does not
//! destroy it. Saving is the opposite: a failed write is reported to the
//! caller.

use super::backend::StorageBackend;
use crate::error::{GrocerError, Result};
use crate::model::{Item, RawItem};
use std::collections::HashSet;

/// Load the collection from the slot, recovering what it can.
pub fn load<B: StorageBackend>(backend: &B) -> Vec<Item> {
    match backend.read_slot() {
        Ok(Some(text)) => {
            let decoded = decode(&text);
            if decoded.damaged {
                preserve(backend);
            }
            decoded.items
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            log::error!(
                "could not read {}: {}; starting with an empty list",
                backend.slot_path().display(),
                e
            );
            preserve(backend);
            Vec::new()
        }
    }
}

fn preserve<B: StorageBackend>(backend: &B) {
    match backend.preserve_slot() {
        Ok(path) => log::warn!("kept the unreadable list at {}", path.display()),
        Err(e) => log::error!(
            "could not set aside {}: {}",
            backend.slot_path().display(),
            e
        ),
    }
}

/// Serialize the full collection and write it to the slot.
pub fn save<B: StorageBackend>(backend: &B, items: &[Item]) -> Result<()> {
    let text = encode(items)?;
    backend.write_slot(&text).map_err(|e| match e {
        e @ GrocerError::Persistence(_) => e,
        other => GrocerError::Persistence(other.to_string()),
    })
}

pub(crate) fn encode(items: &[Item]) -> Result<String> {
    serde_json::to_string(items).map_err(GrocerError::Serialization)
}

struct Decoded {
    items: Vec<Item>,
    /// Some or all of the slot could not be turned into items.
    damaged: bool,
}

/// Decode slot text. Entries that fail validation are dropped one by one.
fn decode(text: &str) -> Decoded {
    let unreadable = Decoded {
        items: Vec::new(),
        damaged: true,
    };
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("stored list is not valid JSON ({}); ignoring it", e);
            return unreadable;
        }
    };
    let serde_json::Value::Array(entries) = value else {
        log::warn!("stored list is not a JSON array; ignoring it");
        return unreadable;
    };

    let mut taken = HashSet::new();
    let mut items = Vec::with_capacity(entries.len());
    let mut damaged = false;
    for (i, entry) in entries.into_iter().enumerate() {
        let position = i + 1;
        let item =
            RawItem::from_value(entry, position).and_then(|raw| raw.into_item(position, &mut taken));
        match item {
            Ok(item) => items.push(item),
            Err(e) => {
                log::warn!("dropping stored entry: {}", e);
                damaged = true;
            }
        }
    }
    Decoded { items, damaged }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemDraft;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_load_absent_slot_is_empty() {
        let backend = MemBackend::new();
        assert!(load(&backend).is_empty());
    }

    #[test]
    fn test_load_unparseable_slot_is_empty() {
        let backend = MemBackend::with_slot("{not json");
        assert!(load(&backend).is_empty());
    }

    #[test]
    fn test_load_sets_aside_unparseable_slot() {
        let backend = MemBackend::with_slot("{not json");
        load(&backend);
        assert_eq!(backend.preserved(), vec!["{not json".to_string()]);
    }

    #[test]
    fn test_load_sets_aside_slot_with_dropped_entries() {
        let text = r#"[{"name": "Milk", "store": "Costco", "category": "Dairy"}, 42]"#;
        let backend = MemBackend::with_slot(text);
        assert_eq!(load(&backend).len(), 1);
        assert_eq!(backend.preserved(), vec![text.to_string()]);
    }

    #[test]
    fn test_load_clean_slot_preserves_nothing() {
        let backend = MemBackend::with_slot(
            r#"[{"name": "Milk", "store": "Costco", "category": "Dairy"}]"#,
        );
        load(&backend);
        assert!(backend.preserved().is_empty());
    }

    #[test]
    fn test_load_non_array_slot_is_empty() {
        let backend = MemBackend::with_slot(r#"{"name": "Milk"}"#);
        assert!(load(&backend).is_empty());
    }

    #[test]
    fn test_load_defaults_legacy_entries() {
        let backend = MemBackend::with_slot(
            r#"[{"name": "Milk", "store": "Costco", "category": "Dairy", "checked": false}]"#,
        );
        let items = load(&backend);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, "");
        assert!(!items[0].id.as_str().is_empty());
    }

    #[test]
    fn test_load_drops_only_invalid_entries() {
        let backend = MemBackend::with_slot(
            r#"[
                {"id": "a", "name": "Milk", "store": "Costco", "category": "Dairy"},
                {"id": "b", "name": "", "store": "Costco", "category": "Dairy"},
                42,
                {"id": "c", "name": "Bread", "store": "Aldi", "category": "Bakery"}
            ]"#,
        );
        let items = load(&backend);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_save_then_load_preserves_order_and_fields() {
        let backend = MemBackend::new();
        let mut milk = ItemDraft::new("Milk", "Costco", "Dairy")
            .with_quantity("2")
            .into_item()
            .unwrap();
        milk.checked = true;
        let bread = ItemDraft::new("Bread", "Aldi", "Bakery").into_item().unwrap();
        let items = vec![milk, bread];

        save(&backend, &items).unwrap();
        assert_eq!(load(&backend), items);
    }

    #[test]
    fn test_save_reports_write_failure() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let err = save(&backend, &[]).unwrap_err();
        assert!(matches!(err, GrocerError::Persistence(_)));
        assert_eq!(backend.slot(), None);
    }
}
