//! # Import / Export
//!
//! The exchange format is the storage format: a top-level JSON array of item
//! objects. Exports are pretty-printed and follow canonical order so a file
//! can be read, diffed, and imported back as-is.
//!
//! Import validation happens in two tiers:
//!
//! | Problem                         | Error                        |
//! |---------------------------------|------------------------------|
//! | text is not JSON                | [`GrocerError::Format`]      |
//! | top level is not an array       | [`GrocerError::Format`]      |
//! | an element is not a valid item  | [`GrocerError::Validation`]  |
//!
//! Either way the import is all-or-nothing; see
//! [`crate::list::GroceryList::replace_all`].

use crate::error::{GrocerError, Result};
use crate::model::{Item, RawItem};

/// Default export file stem.
pub const EXPORT_STEM: &str = "grocery_list";

/// File name used for an export: `grocery_list.json` or `grocery_list_backup.json`.
pub fn export_file_name(stem: &str, backup: bool) -> String {
    if backup {
        format!("{}_backup.json", stem)
    } else {
        format!("{}.json", stem)
    }
}

pub fn export(items: &[Item]) -> Result<String> {
    serde_json::to_string_pretty(items).map_err(GrocerError::Serialization)
}

/// Parse import text into candidates. No defaults are applied yet.
pub fn parse_import(text: &str) -> Result<Vec<RawItem>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| GrocerError::Format(format!("file is not valid JSON ({})", e)))?;

    let serde_json::Value::Array(entries) = value else {
        return Err(GrocerError::Format(
            "expected a JSON array of items at the top level".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RawItem::from_value(entry, i + 1))
        .collect()
}
