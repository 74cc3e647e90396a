//! # View Projection
//!
//! The list is shown in **presentation order**, which is derived from the
//! canonical order and never written back:
//!
//! 1. Split into unchecked and checked items, each keeping canonical order.
//! 2. Unchecked items are grouped by the current [`FilterMode`]: untouched for
//!    `None` (the manual, drag-reorderable order), stable-sorted by store or by
//!    category otherwise.
//! 3. Checked items are always stable-sorted by `(store, category, name)` so a
//!    finished trip reads like a receipt, whatever the mode.
//! 4. Unchecked first, then checked.
//!
//! Projection is a pure function of the items and the mode. It borrows the
//! items; nothing here can mutate the list.

use crate::model::{FilterMode, Item};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Presentation order, kept as its two partitions.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub unchecked: Vec<&'a Item>,
    pub checked: Vec<&'a Item>,
}

impl<'a> Projection<'a> {
    /// Items in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.unchecked.iter().chain(self.checked.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.unchecked.len() + self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn project(items: &[Item], mode: FilterMode) -> Projection<'_> {
    let (mut unchecked, mut checked): (Vec<&Item>, Vec<&Item>) =
        items.iter().partition(|item| !item.checked);

    match mode {
        FilterMode::None => {}
        FilterMode::ByStore => unchecked.sort_by(|a, b| locale_cmp(&a.store, &b.store)),
        FilterMode::ByCategory => unchecked.sort_by(|a, b| locale_cmp(&a.category, &b.category)),
    }

    checked.sort_by(|a, b| {
        locale_cmp(&a.store, &b.store)
            .then_with(|| locale_cmp(&a.category, &b.category))
            .then_with(|| locale_cmp(&a.name, &b.name))
    });

    Projection { unchecked, checked }
}

/// Projection flattened into a single sequence.
pub fn project_flat(items: &[Item], mode: FilterMode) -> Vec<&Item> {
    project(items, mode).iter().collect()
}

/// Human-friendly string ordering, in the spirit of a collator:
///
/// 1. base letters, ignoring accents and case ("Épicerie" < "Fromagerie");
/// 2. then accents, unaccented first ("cote" < "côte");
/// 3. then case, lower case first ("aldi" < "Aldi").
///
/// Strings that are identical compare equal, which keeps the sorts above
/// stable.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

// Combining marks stay in place after decomposition, so a bare letter sorts
// before the same letter carrying a mark.
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.nfd()
        .zip(b.nfd())
        .find_map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            _ => None,
        })
        .unwrap_or(Ordering::Equal)
}
