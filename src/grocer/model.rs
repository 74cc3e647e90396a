//! # Domain Model: Items and Their Stored Shape
//!
//! This module defines [`Item`], the only entity grocer persists, together with
//! the small vocabulary types the rest of the crate speaks in: [`ItemId`],
//! [`Field`], [`FilterMode`] and [`ItemDraft`].
//!
//! ## Required vs Optional Fields
//!
//! | Field      | Required | Default |
//! |------------|----------|---------|
//! | `name`     | yes      | -       |
//! | `store`    | yes      | -       |
//! | `category` | yes      | -       |
//! | `quantity` | no       | `""`    |
//! | `checked`  | no       | `false` |
//!
//! Required fields are trimmed and must be non-empty. This holds for every item
//! in the list at all times, whatever path it came in through (add, edit,
//! import, or loading the durable slot).
//!
//! ## Stored Data Is Untrusted
//!
//! Lists written by older versions may lack `id` or `quantity`, and files
//! edited by hand may carry numbers where strings belong. Stored and imported
//! entries are therefore read into a lenient [`RawItem`] first and only become
//! [`Item`]s through [`RawItem::into_item`], which applies the defaults above
//! and assigns a fresh id when the stored one is missing or already taken.

use crate::error::{GrocerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, stable identifier of an item.
///
/// New ids are UUID v4 strings, but ids read back from storage or an import
/// file are kept verbatim, so nothing may assume the UUID format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, enough to tell items apart in a listing.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: String,
    pub store: String,
    pub category: String,
    pub checked: bool,
}

impl Item {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Store => &self.store,
            Field::Category => &self.category,
            Field::Quantity => &self.quantity,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Store => &mut self.store,
            Field::Category => &mut self.category,
            Field::Quantity => &mut self.quantity,
        }
    }
}

/// The user-editable text fields of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Store,
    Category,
    Quantity,
}

impl Field {
    pub fn is_required(self) -> bool {
        !matches!(self, Field::Quantity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Store => "store",
            Field::Category => "category",
            Field::Quantity => "quantity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = GrocerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "store" => Ok(Field::Store),
            "category" | "cat" => Ok(Field::Category),
            "quantity" | "qty" => Ok(Field::Quantity),
            other => Err(GrocerError::Api(format!(
                "Unknown field '{}' (expected name, store, category or quantity)",
                other
            ))),
        }
    }
}

/// How the unchecked part of the list is grouped for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Manual order, the only mode in which dragging makes sense.
    #[default]
    None,
    ByStore,
    ByCategory,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::ByStore => "store",
            FilterMode::ByCategory => "category",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = GrocerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "manual" => Ok(FilterMode::None),
            "store" | "by-store" => Ok(FilterMode::ByStore),
            "category" | "by-category" => Ok(FilterMode::ByCategory),
            other => Err(GrocerError::Api(format!(
                "Unknown mode '{}' (expected none, store or category)",
                other
            ))),
        }
    }
}

// Config files and environment variables spell modes the same way the CLI
// does, so (de)serialization goes through `as_str` / `FromStr`.
impl Serialize for FilterMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Field values collected by a form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub store: String,
    pub category: String,
    pub quantity: Option<String>,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        store: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            store: store.into(),
            category: category.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Validates the draft into a new unchecked item with a fresh id.
    pub fn into_item(self) -> Result<Item> {
        Ok(Item {
            id: ItemId::generate(),
            name: required(Field::Name, &self.name)?,
            quantity: self.quantity.as_deref().map(str::trim).unwrap_or("").to_string(),
            store: required(Field::Store, &self.store)?,
            category: required(Field::Category, &self.category)?,
            checked: false,
        })
    }
}

/// Trims `value` and rejects it if the result is empty.
pub fn required(field: Field, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GrocerError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Scalar that older lists store either as text or as a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Lenient {
    fn into_string(self) -> String {
        match self {
            Lenient::Text(s) => s,
            Lenient::Number(n) => n.to_string(),
            Lenient::Flag(b) => b.to_string(),
        }
    }
}

/// An item as found in the durable slot or an import file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    id: Option<Lenient>,
    #[serde(default)]
    name: Option<Lenient>,
    #[serde(default)]
    quantity: Option<Lenient>,
    #[serde(default)]
    store: Option<Lenient>,
    #[serde(default)]
    category: Option<Lenient>,
    #[serde(default)]
    checked: Option<bool>,
}

impl RawItem {
    /// Reads one array element. `position` is 1-based and only used for messages.
    pub fn from_value(value: serde_json::Value, position: usize) -> Result<Self> {
        if !value.is_object() {
            return Err(GrocerError::Validation(format!(
                "entry {} is not an object",
                position
            )));
        }
        serde_json::from_value(value).map_err(|e| {
            GrocerError::Validation(format!("entry {} is malformed: {}", position, e))
        })
    }

    /// Validates the entry and fills in defaults.
    ///
    /// The stored id is kept unless it is missing, blank, or already present
    /// in `taken`; in those cases a fresh one is generated. The chosen id is
    /// added to `taken`.
    pub fn into_item(self, position: usize, taken: &mut HashSet<ItemId>) -> Result<Item> {
        let text = |v: Option<Lenient>| v.map(Lenient::into_string).unwrap_or_default();
        let at = |e: GrocerError| match e {
            GrocerError::Validation(msg) => {
                GrocerError::Validation(format!("entry {}: {}", position, msg))
            }
            other => other,
        };

        let name = required(Field::Name, &text(self.name)).map_err(at)?;
        let store = required(Field::Store, &text(self.store)).map_err(at)?;
        let category = required(Field::Category, &text(self.category)).map_err(at)?;

        let stored_id = text(self.id).trim().to_string();
        let id = if stored_id.is_empty() {
            ItemId::generate()
        } else {
            let candidate = ItemId(stored_id);
            if taken.contains(&candidate) {
                log::warn!(
                    "entry {} reuses id {}; assigning a new one",
                    position,
                    candidate
                );
                ItemId::generate()
            } else {
                candidate
            }
        };
        taken.insert(id.clone());

        Ok(Item {
            id,
            name,
            quantity: text(self.quantity).trim().to_string(),
            store,
            category,
            checked: self.checked.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawItem {
        RawItem::from_value(value, 1).unwrap()
    }

    #[test]
    fn test_draft_trims_and_defaults() {
        let item = ItemDraft::new("  Milk ", "Costco", " Dairy")
            .into_item()
            .unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.category, "Dairy");
        assert_eq!(item.quantity, "");
        assert!(!item.checked);
    }

    #[test]
    fn test_draft_rejects_blank_required_field() {
        let err = ItemDraft::new("Milk", "   ", "Dairy").into_item().unwrap_err();
        assert!(matches!(err, GrocerError::Validation(_)));
        assert!(err.to_string().contains("store"));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ItemDraft::new("A", "S", "C").into_item().unwrap();
        let b = ItemDraft::new("A", "S", "C").into_item().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_raw_item_keeps_stored_id() {
        let mut taken = HashSet::new();
        let item = raw(json!({"id": "abc", "name": "Eggs", "store": "Aldi", "category": "Dairy"}))
            .into_item(1, &mut taken)
            .unwrap();
        assert_eq!(item.id.as_str(), "abc");
        assert!(taken.contains(&item.id));
    }

    #[test]
    fn test_raw_item_generates_missing_id_and_quantity() {
        let mut taken = HashSet::new();
        let item = raw(json!({"name": "Eggs", "store": "Aldi", "category": "Dairy", "checked": true}))
            .into_item(1, &mut taken)
            .unwrap();
        assert!(!item.id.as_str().is_empty());
        assert_eq!(item.quantity, "");
        assert!(item.checked);
    }

    #[test]
    fn test_raw_item_replaces_duplicate_id() {
        let mut taken = HashSet::new();
        let first = raw(json!({"id": "x", "name": "A", "store": "S", "category": "C"}))
            .into_item(1, &mut taken)
            .unwrap();
        let second = raw(json!({"id": "x", "name": "B", "store": "S", "category": "C"}))
            .into_item(2, &mut taken)
            .unwrap();
        assert_eq!(first.id.as_str(), "x");
        assert_ne!(second.id, first.id);
    }

    #[test]
    fn test_raw_item_accepts_numeric_quantity_and_id() {
        let mut taken = HashSet::new();
        let item = raw(json!({"id": 7, "name": "Apples", "quantity": 6, "store": "S", "category": "Fruit"}))
            .into_item(1, &mut taken)
            .unwrap();
        assert_eq!(item.id.as_str(), "7");
        assert_eq!(item.quantity, "6");
    }

    #[test]
    fn test_raw_item_rejects_missing_name() {
        let mut taken = HashSet::new();
        let err = raw(json!({"store": "S", "category": "C"}))
            .into_item(3, &mut taken)
            .unwrap_err();
        assert!(err.to_string().contains("entry 3"));
        assert!(taken.is_empty());
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = RawItem::from_value(json!("milk"), 2).unwrap_err();
        assert!(matches!(err, GrocerError::Validation(_)));
    }

    #[test]
    fn test_item_serializes_with_stable_field_names() {
        let item = Item {
            id: ItemId::from("1"),
            name: "Milk".into(),
            quantity: "2".into(),
            store: "Costco".into(),
            category: "Dairy".into(),
            checked: false,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({"id": "1", "name": "Milk", "quantity": "2", "store": "Costco", "category": "Dairy", "checked": false})
        );
    }

    #[test]
    fn test_filter_mode_parsing() {
        assert_eq!("by-store".parse::<FilterMode>().unwrap(), FilterMode::ByStore);
        assert_eq!("Category".parse::<FilterMode>().unwrap(), FilterMode::ByCategory);
        assert_eq!("none".parse::<FilterMode>().unwrap(), FilterMode::None);
        assert!("aisle".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_filter_mode_serde_uses_cli_spelling() {
        assert_eq!(serde_json::to_value(FilterMode::ByStore).unwrap(), json!("store"));
        let mode: FilterMode = serde_json::from_value(json!("by-category")).unwrap();
        assert_eq!(mode, FilterMode::ByCategory);
        assert!(serde_json::from_value::<FilterMode>(json!("aisle")).is_err());
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("qty".parse::<Field>().unwrap(), Field::Quantity);
        assert!(Field::Name.is_required());
        assert!(!Field::Quantity.is_required());
        assert!("price".parse::<Field>().is_err());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(ItemId::from("0123456789").short(), "01234567");
        assert_eq!(ItemId::from("abc").short(), "abc");
    }
}
