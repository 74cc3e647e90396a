//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Reads and writes export files chosen by the user
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_logging()`: Starts `flexi_logger` on stderr
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::print::{print_config, print_items, print_messages};
use super::setup::{Cli, Commands};
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use grocer::api::{CmdMessage, GrocerApi};
use grocer::codec;
use grocer::config::{self, GrocerConfig};
use grocer::error::{GrocerError, Result};
use grocer::model::{Field, ItemDraft};
use grocer::store::fs_backend::FsBackend;
use std::io::Read;
use std::path::PathBuf;

const LOG_ENV: &str = "GROCER_LOG";
const DEFAULT_LOG_SPEC: &str = "warn";

struct AppContext {
    api: GrocerApi<FsBackend>,
    config: GrocerConfig,
    data_dir: PathBuf,
    _logger: Option<LoggerHandle>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let logger = init_logging(cli.verbose);
    let mut ctx = init_context(&cli, logger)?;

    match cli.command {
        Some(Commands::Add {
            name,
            store,
            category,
            qty,
        }) => handle_add(&mut ctx, name.join(" "), store, category, qty),
        Some(Commands::List { ids }) => handle_list(&ctx, ids),
        Some(Commands::Edit {
            selector,
            field,
            value,
        }) => handle_edit(&mut ctx, &selector, field, &value),
        Some(Commands::Check { selectors }) => handle_set_checked(&mut ctx, &selectors, true),
        Some(Commands::Uncheck { selectors }) => handle_set_checked(&mut ctx, &selectors, false),
        Some(Commands::Toggle { selectors }) => handle_toggle(&mut ctx, &selectors),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, &selectors),
        Some(Commands::Move { from, to }) => handle_move(&mut ctx, from, to),
        Some(Commands::ClearChecked) => handle_clear_checked(&mut ctx),
        Some(Commands::Export {
            path,
            backup,
            stdout,
        }) => handle_export(&ctx, path, backup, stdout),
        Some(Commands::Import { source }) => handle_import(&mut ctx, &source),
        Some(Commands::Config) => handle_config(&ctx),
        None => handle_list(&ctx, false),
    }
}

/// Diagnostics go to stderr. A logger that fails to start only costs us the
/// diagnostics, so it is not an error.
fn init_logging(verbose: bool) -> Option<LoggerHandle> {
    let spec = if verbose {
        "debug".to_string()
    } else {
        std::env::var(LOG_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_SPEC.to_string())
    };

    match Logger::try_with_str(&spec).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: could not start logging ({}): {}", spec, e);
            None
        }
    }
}

fn init_context(cli: &Cli, logger: Option<LoggerHandle>) -> Result<AppContext> {
    let data_dir = config::data_dir(cli.data_dir.as_deref())?;
    let config = GrocerConfig::load(&data_dir).unwrap_or_else(|e| {
        log::warn!("{}; using default configuration", e);
        GrocerConfig::default()
    });

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    log::debug!("data dir: {}", data_dir.display());
    // Listing and selector resolution must agree on the grouping, or a
    // number read off `list --by store` would name another item.
    let mode = cli.by.unwrap_or(config.default_mode);
    let api = GrocerApi::open(FsBackend::new(data_dir.clone()), mode);

    Ok(AppContext {
        api,
        config,
        data_dir,
        _logger: logger,
    })
}

fn handle_add(
    ctx: &mut AppContext,
    name: String,
    store: String,
    category: String,
    qty: Option<String>,
) -> Result<()> {
    let mut draft = ItemDraft::new(name, store, category);
    if let Some(qty) = qty {
        draft = draft.with_quantity(qty);
    }
    let result = ctx.api.add_item(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, ids: bool) -> Result<()> {
    let mut result = ctx.api.list_items();
    if result.mode != ctx.config.default_mode && !result.listed_items.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Numbers follow --by {}; pass it to check, edit or delete by number",
            result.mode
        )));
    }
    print_items(&result.listed_items, result.mode, ids);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: &str, field: Field, value: &str) -> Result<()> {
    let result = ctx.api.edit_field(selector, field, value)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_set_checked(ctx: &mut AppContext, selectors: &[String], checked: bool) -> Result<()> {
    let result = ctx.api.set_checked(selectors, checked)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let result = ctx.api.toggle_checked(selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let result = ctx.api.delete_items(selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, from: usize, to: usize) -> Result<()> {
    let result = ctx.api.reorder(from, to)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear_checked(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_checked()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    path: Option<PathBuf>,
    backup: bool,
    stdout: bool,
) -> Result<()> {
    let result = ctx.api.export_text()?;
    let text = result
        .export
        .ok_or_else(|| GrocerError::Api("Nothing to export".to_string()))?;

    if stdout {
        println!("{}", text);
        return Ok(());
    }

    let file_name = codec::export_file_name(&ctx.config.export_name, backup);
    let target = match path {
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(file) => file,
        None => std::env::current_dir()?.join(file_name),
    };
    std::fs::write(&target, format!("{}\n", text)).map_err(|e| {
        GrocerError::Api(format!("Could not write {}: {}", target.display(), e))
    })?;

    let count = ctx.api.list().len();
    print_messages(&[CmdMessage::success(format!(
        "Exported {} item{} to {}",
        count,
        if count == 1 { "" } else { "s" },
        target.display()
    ))]);
    Ok(())
}

/// The whole file is read before the import starts, so a read error never
/// reaches the list.
fn handle_import(ctx: &mut AppContext, source: &str) -> Result<()> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| GrocerError::Api(format!("Could not read {}: {}", source, e)))?
    };

    let result = ctx.api.import_text(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    print_config(&ctx.config.entries(), &ctx.data_dir, &ctx.api.slot_path());
    Ok(())
}
