use colored::Colorize;
use grocer::api::{CmdMessage, MessageLevel};
use grocer::index::{DisplayIndex, DisplayItem};
use grocer::model::{FilterMode, Item};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 32;
const QTY_WIDTH: usize = 12;
const CHECKED_HEADING: &str = "Checked";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_items(items: &[DisplayItem], mode: FilterMode, show_ids: bool) {
    print!("{}", render_items(items, mode, show_ids));
}

pub(super) fn print_config(entries: &[(&str, String)], data_dir: &Path, slot: &Path) {
    let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    for (key, value) in entries {
        println!("{} = {}", pad_to_width(key, key_width).bold(), value);
    }
    println!();
    println!("{} {}", "data dir:".dimmed(), data_dir.display());
    println!("{} {}", "list file:".dimmed(), slot.display());
}

/// Unchecked items first, under a heading per group when grouped, then a
/// "Checked" section.
fn render_items(items: &[DisplayItem], mode: FilterMode, show_ids: bool) -> String {
    if items.is_empty() {
        return "Your list is empty.\n".to_string();
    }

    let idx_width = items
        .iter()
        .map(|d| format!("{}.", d.index).width())
        .max()
        .unwrap_or(0);
    let name_width = items
        .iter()
        .map(|d| d.item.name.width().min(NAME_WIDTH))
        .max()
        .unwrap_or(0);
    let qty_width = items
        .iter()
        .map(|d| d.item.quantity.width().min(QTY_WIDTH))
        .max()
        .unwrap_or(0);
    let widths = Widths {
        idx: idx_width,
        name: name_width,
        qty: qty_width,
    };

    let mut out = String::new();
    let mut current_group: Option<&str> = None;
    let mut in_checked = false;

    for dp in items {
        let checked = matches!(dp.index, DisplayIndex::Checked(_));
        if checked && !in_checked {
            in_checked = true;
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", CHECKED_HEADING.bold().dimmed()));
        }

        if !checked {
            if let Some(group) = group_key(&dp.item, mode) {
                if current_group != Some(group) {
                    if current_group.is_some() {
                        out.push('\n');
                    }
                    out.push_str(&format!("{}\n", group.bold()));
                    current_group = Some(group);
                }
            }
        }

        out.push_str(&render_row(dp, mode, &widths, show_ids));
        out.push('\n');
    }
    out
}

struct Widths {
    idx: usize,
    name: usize,
    qty: usize,
}

fn render_row(dp: &DisplayItem, mode: FilterMode, widths: &Widths, show_ids: bool) -> String {
    let item = &dp.item;
    let checked = matches!(dp.index, DisplayIndex::Checked(_));

    let idx = pad_to_width(&format!("{}.", dp.index), widths.idx);
    let name = pad_to_width(&truncate_to_width(&item.name, NAME_WIDTH), widths.name);
    let qty = pad_to_width(&truncate_to_width(&item.quantity, QTY_WIDTH), widths.qty);

    // The heading already names the group, so rows only show the other field.
    let context = match (mode, checked) {
        (FilterMode::ByStore, false) => item.category.clone(),
        (FilterMode::ByCategory, false) => item.store.clone(),
        _ => format!("{} · {}", item.store, item.category),
    };

    let id = if show_ids {
        format!("{} ", item.id.short().dimmed())
    } else {
        String::new()
    };

    let row = if checked {
        format!(
            "  {}{} {}  {}  {}",
            id,
            idx.dimmed(),
            name.dimmed().strikethrough(),
            qty.dimmed(),
            context.dimmed()
        )
    } else {
        format!(
            "  {}{} {}  {}  {}",
            id,
            idx.yellow(),
            name,
            qty.cyan(),
            context.dimmed()
        )
    };
    row.trim_end().to_string()
}

fn group_key(item: &Item, mode: FilterMode) -> Option<&str> {
    match mode {
        FilterMode::None => None,
        FilterMode::ByStore => Some(&item.store),
        FilterMode::ByCategory => Some(&item.category),
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
