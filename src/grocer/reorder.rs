//! Maps a drag move inside the unchecked partition onto the canonical list.
//!
//! Positions are 0-based and address the unchecked items **in canonical
//! order**, not in whatever order a grouping mode currently displays them.
//! Reordering against a sorted view would bake that sort into the stored
//! order and lose the manual arrangement as soon as the mode changes back.
//!
//! The rebuilt list is `unchecked (moved) ++ checked (canonical order)`.

use crate::model::Item;

/// Returns the new canonical order, or `None` when the move is a no-op:
/// `from == to`, or either position falls outside the unchecked partition.
///
/// This is the only place out-of-range positions are a silent no-op. The
/// API rejects them earlier with an error because they come from user input.
pub fn resolve(items: &[Item], from: usize, to: usize) -> Option<Vec<Item>> {
    let (mut unchecked, checked): (Vec<Item>, Vec<Item>) =
        items.iter().cloned().partition(|item| !item.checked);

    if from == to || from >= unchecked.len() || to >= unchecked.len() {
        return None;
    }

    let moved = unchecked.remove(from);
    unchecked.insert(to, moved);
    unchecked.extend(checked);
    Some(unchecked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn item(id: &str, checked: bool) -> Item {
        Item {
            id: ItemId::from(id),
            name: id.to_uppercase(),
            quantity: String::new(),
            store: "S".into(),
            category: "C".into(),
            checked,
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_move_down() {
        let items = vec![item("a", false), item("b", false), item("c", false)];
        let moved = resolve(&items, 0, 2).unwrap();
        assert_eq!(ids(&moved), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_up() {
        let items = vec![item("a", false), item("b", false), item("c", false)];
        let moved = resolve(&items, 2, 0).unwrap();
        assert_eq!(ids(&moved), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_checked_items_are_collected_at_the_end() {
        let items = vec![
            item("x", true),
            item("a", false),
            item("y", true),
            item("b", false),
        ];
        let moved = resolve(&items, 1, 0).unwrap();
        assert_eq!(ids(&moved), vec!["b", "a", "x", "y"]);
    }

    #[test]
    fn test_same_position_is_noop() {
        let items = vec![item("a", false), item("b", false)];
        assert!(resolve(&items, 1, 1).is_none());
    }

    #[test]
    fn test_out_of_unchecked_bounds_is_noop() {
        let items = vec![item("a", false), item("b", false), item("c", true)];
        assert!(resolve(&items, 0, 2).is_none());
        assert!(resolve(&items, 5, 0).is_none());
    }

    #[test]
    fn test_move_and_back_restores_order() {
        let items = vec![
            item("a", false),
            item("b", false),
            item("c", false),
            item("d", false),
        ];
        for from in 0..4 {
            for to in 0..4 {
                if from == to {
                    continue;
                }
                let there = resolve(&items, from, to).unwrap();
                let back = resolve(&there, to, from).unwrap();
                assert_eq!(back, items, "move {} -> {} and back", from, to);
            }
        }
    }
}
