//! Workspace command definitions, including the per-workspace subresources

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config::defaults;

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommand {
    /// List workspaces
    #[command(visible_alias = "ls")]
    List(WorkspaceListArgs),

    /// Show workspace details, team access and remote state consumers
    Show(WorkspaceShowArgs),

    /// Lock one workspace, or every matching workspace with --all
    Lock(LockArgs),

    /// Force-unlock one workspace, or every matching workspace with --all
    Unlock(LockArgs),

    /// Workspace variables
    #[command(visible_alias = "var")]
    Variable {
        #[command(subcommand)]
        command: VariableCommand,
    },

    /// Configuration versions
    #[command(visible_alias = "cv")]
    ConfigurationVersion {
        #[command(subcommand)]
        command: ConfigurationVersionCommand,
    },

    /// State versions
    #[command(visible_alias = "sv")]
    StateVersion {
        #[command(subcommand)]
        command: StateVersionCommand,
    },

    /// Runs
    Run {
        #[command(subcommand)]
        command: RunCommand,
    },

    /// Team access
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },
}

/// Workspace a subresource command operates on
#[derive(Args, Debug, Clone)]
pub struct WorkspaceTarget {
    /// Workspace name
    #[arg(short = 'w', long = "workspace-name")]
    pub workspace: String,
}

#[derive(Parser, Debug)]
pub struct WorkspaceListArgs {
    /// Name substring
    #[arg(short, long)]
    pub search: Option<String>,

    /// Name pattern with leading or trailing `*`
    #[arg(long)]
    pub wildcard_name: Option<String>,

    /// Project ID (prj-xxx)
    #[arg(short, long)]
    pub project_id: Option<String>,

    /// Status of the current run (e.g. applied, errored, planning)
    #[arg(short, long)]
    pub run_status: Option<String>,

    /// Comma separated tag names the workspace must carry
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Comma separated tag names the workspace must not carry
    #[arg(long)]
    pub exclude_tags: Option<String>,

    /// VCS repository identifier (org/repo)
    #[arg(long)]
    pub repository: Option<String>,

    /// List across all organizations
    #[arg(short, long, default_value_t = false)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct WorkspaceShowArgs {
    /// Workspace name
    #[arg(short, long)]
    pub name: String,
}

/// Either a single workspace or a filtered batch
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["name", "all"])))]
pub struct LockArgs {
    /// Workspace name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Apply to every workspace of the organization
    #[arg(short, long)]
    pub all: bool,

    /// With --all, only workspaces whose name contains this text
    #[arg(short, long, requires = "all", conflicts_with = "name")]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum VariableCommand {
    /// List variables
    #[command(visible_alias = "ls")]
    List(WorkspaceTarget),

    /// Show one variable
    Show(VariableKeyArgs),

    /// Create a variable
    Create(VariableWriteArgs),

    /// Update a variable by key
    Update(VariableWriteArgs),

    /// Delete a variable by key
    Delete(VariableKeyArgs),
}

#[derive(Parser, Debug)]
pub struct VariableKeyArgs {
    #[command(flatten)]
    pub target: WorkspaceTarget,

    /// Variable key
    #[arg(short, long)]
    pub key: String,
}

#[derive(Parser, Debug)]
pub struct VariableWriteArgs {
    #[command(flatten)]
    pub target: WorkspaceTarget,

    /// Variable key
    #[arg(short, long)]
    pub key: String,

    /// Variable value
    #[arg(short, long, conflicts_with = "value_file")]
    pub value: Option<String>,

    /// Read the value from a file
    #[arg(short = 'f', long)]
    pub value_file: Option<PathBuf>,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Environment variable instead of a Terraform variable
    #[arg(short, long, default_value_t = false)]
    pub env: bool,

    /// Parse the value as HCL
    #[arg(long, default_value_t = false)]
    pub hcl: bool,

    /// Write-only value
    #[arg(long, default_value_t = false)]
    pub sensitive: bool,
}

/// Cap on how many of the newest items a listing returns
#[derive(Args, Debug, Clone)]
pub struct MaxItemsArg {
    /// Maximum number of items
    #[arg(short, long, default_value_t = defaults::MAX_ITEMS)]
    pub max_items: usize,
}

#[derive(Parser, Debug)]
pub struct WorkspaceListingArgs {
    #[command(flatten)]
    pub target: WorkspaceTarget,

    #[command(flatten)]
    pub limit: MaxItemsArg,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Resource ID
    #[arg(short, long)]
    pub id: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigurationVersionCommand {
    /// List the newest configuration versions
    #[command(visible_alias = "ls")]
    List(WorkspaceListingArgs),

    /// Upload a directory as a new configuration version
    Create(ConfigurationVersionCreateArgs),

    /// Show one configuration version
    Show(IdArgs),

    /// Download and unpack a configuration version
    Download(ConfigurationVersionDownloadArgs),
}

#[derive(Parser, Debug)]
pub struct ConfigurationVersionCreateArgs {
    #[command(flatten)]
    pub target: WorkspaceTarget,

    /// Directory with the Terraform configuration
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Only usable for plan-only runs
    #[arg(short, long, default_value_t = false)]
    pub speculative: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigurationVersionDownloadArgs {
    /// Configuration version ID (cv-xxx)
    #[arg(short, long)]
    pub id: String,

    /// Target directory (default: a new temporary directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum StateVersionCommand {
    /// List the newest state versions
    #[command(visible_alias = "ls")]
    List(WorkspaceListingArgs),

    /// Show one state version
    Show(IdArgs),

    /// Upload a local state file as the next state version
    Create(StateVersionCreateArgs),

    /// Download a state version
    Download(StateVersionDownloadArgs),
}

#[derive(Parser, Debug)]
pub struct StateVersionCreateArgs {
    #[command(flatten)]
    pub target: WorkspaceTarget,

    /// Path to the state file
    #[arg(short, long)]
    pub filename: PathBuf,
}

#[derive(Parser, Debug)]
pub struct StateVersionDownloadArgs {
    /// State version ID (sv-xxx)
    #[arg(short, long)]
    pub id: String,

    /// Output file (default: <id>.tfstate in the current directory)
    #[arg(short, long)]
    pub filename: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// List the newest runs
    #[command(visible_alias = "ls")]
    List(WorkspaceListingArgs),

    /// Queue a run
    Create(RunCreateArgs),

    /// Show one run
    Show(IdArgs),

    /// Discard a run waiting for confirmation
    Discard(RunDiscardArgs),
}

#[derive(Parser, Debug)]
pub struct RunCreateArgs {
    #[command(flatten)]
    pub target: WorkspaceTarget,

    /// Run message
    #[arg(short, long, default_value = "Queued by tfx")]
    pub message: String,

    /// Configuration version ID (default: the workspace's latest)
    #[arg(short, long)]
    pub configuration_version_id: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RunDiscardArgs {
    /// Run ID (run-xxx)
    #[arg(short, long)]
    pub id: String,

    /// Comment recorded with the discard
    #[arg(short, long, default_value = "Discarded by tfx")]
    pub comment: String,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// List teams with access to the workspace
    #[command(visible_alias = "ls")]
    List(WorkspaceListingArgs),
}
