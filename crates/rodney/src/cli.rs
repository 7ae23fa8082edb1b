//! Clap CLI definitions for the `rodney` command.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rodney_core::ActionKind;

/// rodney -- formula-driven item actions.
///
/// Evaluates formulas like `{Status} - {Name}` against an item's fields and
/// renames the item, updates a column, duplicates it, or creates subitems.
#[derive(Parser, Debug)]
#[command(
    name = "rodney",
    about = "Formula-driven item actions",
    long_about = "Evaluates formulas like `{Status} - {Name}` against an item's fields and renames the item, updates a column, duplicates it, or creates subitems.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config directory (default: auto-discover .rodney/, or $RODNEY_DIR).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a formula and print the result.
    Preview(PreviewArgs),

    /// List an item's fields and its board's columns.
    Fields(FieldsArgs),

    /// Evaluate a formula and run an action with the result.
    Run(RunArgs),

    /// List the available actions.
    Actions,

    /// Show or initialize configuration.
    Config(ConfigArgs),

    /// Print version information.
    Version,

    /// Generate shell completions.
    Completion(CompletionArgs),
}

/// Which record to work on and which day `{Date|...}` renders.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Read the item from a JSON or YAML snapshot file instead of the API.
    #[arg(long, conflicts_with_all = ["item", "board"])]
    pub snapshot: Option<PathBuf>,

    /// Item id to fetch from the API.
    #[arg(long, requires = "board")]
    pub item: Option<String>,

    /// Board id the item belongs to.
    #[arg(long, requires = "item")]
    pub board: Option<String>,

    /// Date used for `{Date|format:...}` placeholders (YYYY-MM-DD, default: today).
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,
}

/// Arguments for `rodney preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Formula to evaluate (default: defaults.formula from config).
    pub formula: Option<String>,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Arguments for `rodney fields`.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub record: RecordArgs,
}

/// Arguments for `rodney run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Formula to evaluate (default: defaults.formula from config).
    pub formula: Option<String>,

    /// Action to run: rename, update_column, duplicate, create_subitems.
    #[arg(short = 'a', long)]
    pub action: Option<ActionKind>,

    /// Column id written by update_column.
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// Record the requests instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Arguments for `rodney config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Write a default config.yaml.
    Init(ConfigInitArgs),
}

/// Arguments for `rodney config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config.yaml.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `rodney completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
