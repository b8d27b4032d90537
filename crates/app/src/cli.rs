//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use splitdeck_domain::CollectionKind;
use splitdeck_infrastructure::ExportFormat;

/// Environment variable holding the Admin API key.
pub const API_KEY_ENV: &str = "SPLITDECK_API_KEY";

/// Top-level arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "splitdeck",
    author,
    version,
    about = "Browse and export Split workspaces, environments and splits"
)]
pub struct Cli {
    #[arg(
        long,
        env = API_KEY_ENV,
        hide_env_values = true,
        global = true,
        help = "Admin API key"
    )]
    pub api_key: Option<String>,
    #[arg(long, global = true, help = "Admin API base URL")]
    pub base_url: Option<String>,
    #[arg(long, global = true, help = "Items requested per page (1-50)")]
    pub page_size: Option<u32>,
    #[arg(
        long,
        global = true,
        help = "Keep items read before a failed page instead of discarding them"
    )]
    pub keep_partial: bool,
    #[arg(long, global = true, value_name = "FILE", help = "Settings file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,
    #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase logging (-vv reaches trace)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every workspace.
    Workspaces,
    /// List the environments of a workspace.
    Environments(WorkspaceArgs),
    /// List the splits of a workspace.
    Splits(WorkspaceArgs),
    /// Find workspaces, environments or splits by exact name.
    Search(SearchArgs),
    /// Fetch all collections and write them as JSON or CSV files.
    Export(ExportArgs),
}

/// Arguments of workspace-scoped listings.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceArgs {
    /// Workspace id.
    #[arg(long, short = 'w', help = "Workspace id")]
    pub workspace: String,
}

/// What `search` looks for.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// A workspace.
    Workspace,
    /// An environment of the given workspace.
    Environment,
    /// A split of the given workspace.
    Split,
}

impl SearchKind {
    /// Collection the search reads.
    #[must_use]
    pub const fn collection(self) -> CollectionKind {
        match self {
            Self::Workspace => CollectionKind::Workspaces,
            Self::Environment => CollectionKind::Environments,
            Self::Split => CollectionKind::Splits,
        }
    }
}

/// Arguments of `search`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    /// Entity kind.
    #[arg(value_enum, help = "Kind of entity to look for")]
    pub kind: SearchKind,
    /// Name to match.
    #[arg(help = "Exact name")]
    pub name: String,
    /// Required for environments and splits.
    #[arg(long, short = 'w', help = "Workspace id (environments and splits)")]
    pub workspace: Option<String>,
}

/// File format of `export`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// JSON arrays.
    #[default]
    Json,
    /// CSV tables.
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
        }
    }
}

/// Arguments of `export`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    /// Workspace id.
    #[arg(long, short = 'w', help = "Workspace id")]
    pub workspace: String,
    /// Output directory.
    #[arg(long, value_name = "DIR", default_value = ".", help = "Output directory")]
    pub out: PathBuf,
    /// File format.
    #[arg(long, value_enum, default_value = "json", help = "File format")]
    pub format: FormatArg,
}
