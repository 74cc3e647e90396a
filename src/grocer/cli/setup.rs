use clap::{Parser, Subcommand};
use grocer::model::{Field, FilterMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "grocer", bin_name = "grocer", version)]
#[command(about = "A grocery list organized by store and category", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the list and config.toml (overrides GROCER_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Grouping used for listing AND for resolving item numbers:
    /// none, store or category (defaults to `default_mode`)
    #[arg(long, global = true, value_name = "MODE", help_heading = "Options")]
    pub by: Option<FilterMode>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item to the list
    #[command(alias = "a")]
    Add {
        /// Item name (multiple words are joined)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Store to buy it at
        #[arg(short, long)]
        store: String,

        /// Category, e.g. Produce or Dairy
        #[arg(short, long)]
        category: String,

        /// Optional quantity, free text
        #[arg(short, long, value_name = "QTY")]
        qty: Option<String>,
    },

    /// List items
    #[command(alias = "ls")]
    List {
        /// Show item ids
        #[arg(long)]
        ids: bool,
    },

    /// Change one field of an item
    #[command(alias = "e")]
    Edit {
        /// Index or id of the item
        selector: String,

        /// name, store, category or quantity
        field: Field,

        /// New value (an empty string clears the quantity)
        value: String,
    },

    /// Mark items as bought
    Check {
        /// Indexes or ids of the items
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Mark items as still needed
    Uncheck {
        /// Indexes or ids of the items
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Flip the checked state of items
    Toggle {
        /// Indexes or ids of the items
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete items
    #[command(alias = "rm")]
    Delete {
        /// Indexes or ids of the items
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move an unchecked item to another position (manual order)
    #[command(alias = "mv")]
    Move {
        /// Current position, as shown by `list --by none`
        from: usize,

        /// Target position
        to: usize,
    },

    /// Uncheck every checked item
    ClearChecked,

    /// Export the list as JSON
    Export {
        /// Output file or directory (defaults to the current directory)
        path: Option<PathBuf>,

        /// Use the backup file name
        #[arg(long)]
        backup: bool,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "path")]
        stdout: bool,
    },

    /// Replace the list with an exported file ("-" reads stdin)
    Import {
        /// File to import
        source: String,
    },

    /// Show effective configuration
    Config,
}
