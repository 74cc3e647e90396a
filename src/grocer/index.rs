//! # Display Indexing
//!
//! Users point at items by the number they see in a listing, but the core only
//! ever acts on stable [`ItemId`]s. This module is the bridge: it numbers a
//! projection and turns user selectors back into ids.
//!
//! ## Numbering
//!
//! A projection is numbered in presentation order:
//!
//! ```text
//!  1. Eggs          <- unchecked items: 1, 2, 3, ...
//!  2. Milk
//!  c1. Apples       <- checked items: c1, c2, ...
//!  c2. Bread
//! ```
//!
//! Numbers depend on the grouping mode in use, so a selector must be resolved
//! against the same mode the user was looking at. Ids never change, so
//! selecting by id (or a unique id prefix, as shown by `list --ids`) is always
//! safe. An id that looks like an index (`7`, `c1`) is selected as `@7`.

use crate::error::{GrocerError, Result};
use crate::model::{Item, ItemId};
use crate::view::Projection;
use std::fmt;
use std::str::FromStr;

/// A user-facing position in a listing. 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Open(usize),
    Checked(usize),
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayIndex::Open(i) => write!(f, "{}", i),
            DisplayIndex::Checked(i) => write!(f, "c{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = GrocerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (digits, checked) = match s.strip_prefix('c').or_else(|| s.strip_prefix('C')) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let n: usize = digits
            .parse()
            .map_err(|_| GrocerError::Api(format!("Invalid index: {}", s)))?;
        if n == 0 {
            return Err(GrocerError::Api(format!(
                "Invalid index: {} (numbering starts at 1)",
                s
            )));
        }
        Ok(if checked {
            DisplayIndex::Checked(n)
        } else {
            DisplayIndex::Open(n)
        })
    }
}

/// A user input selecting one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Index(DisplayIndex),
    /// Full id or unique prefix.
    Id(String),
}

/// Marks a selector as an id, for ids that would otherwise read as an index.
pub const ID_MARKER: char = '@';

impl ItemSelector {
    /// `@<id>` is always an id. Otherwise index syntax wins and anything
    /// else is treated as an id.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Some(id) = input.strip_prefix(ID_MARKER) {
            return ItemSelector::Id(id.trim().to_string());
        }
        match input.parse::<DisplayIndex>() {
            Ok(index) => ItemSelector::Index(index),
            Err(_) => ItemSelector::Id(input.to_string()),
        }
    }
}

impl fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSelector::Index(idx) => write!(f, "{}", idx),
            ItemSelector::Id(id) => write!(f, "{}{}", ID_MARKER, id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub item: Item,
    pub index: DisplayIndex,
}

/// Number a projection in presentation order.
pub fn index_items(projection: &Projection<'_>) -> Vec<DisplayItem> {
    let open = projection
        .unchecked
        .iter()
        .enumerate()
        .map(|(i, item)| DisplayItem {
            item: (*item).clone(),
            index: DisplayIndex::Open(i + 1),
        });
    let checked = projection
        .checked
        .iter()
        .enumerate()
        .map(|(i, item)| DisplayItem {
            item: (*item).clone(),
            index: DisplayIndex::Checked(i + 1),
        });
    open.chain(checked).collect()
}

/// Resolve a selector against a projection.
pub fn resolve(projection: &Projection<'_>, selector: &ItemSelector) -> Result<ItemId> {
    match selector {
        ItemSelector::Index(index) => {
            let (partition, n) = match *index {
                DisplayIndex::Open(n) => (&projection.unchecked, n),
                DisplayIndex::Checked(n) => (&projection.checked, n),
            };
            partition
                .get(n - 1)
                .map(|item| item.id.clone())
                .ok_or_else(|| GrocerError::Api(format!("No item at index {}", index)))
        }
        ItemSelector::Id(prefix) => {
            if prefix.is_empty() {
                return Err(GrocerError::Api("Empty item id".to_string()));
            }
            if let Some(exact) = projection
                .iter()
                .find(|item| item.id.as_str() == prefix.as_str())
            {
                return Ok(exact.id.clone());
            }
            let mut matches = projection
                .iter()
                .filter(|item| item.id.as_str().starts_with(prefix.as_str()));
            match (matches.next(), matches.next()) {
                (Some(item), None) => Ok(item.id.clone()),
                (None, _) => Err(GrocerError::NotFound(ItemId::from(prefix.as_str()))),
                (Some(_), Some(_)) => Err(GrocerError::Api(format!(
                    "Id prefix '{}' matches more than one item",
                    prefix
                ))),
            }
        }
    }
}
