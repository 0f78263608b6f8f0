//! CLI argument parsing

mod organization;
mod project;
mod registry;
mod workspace;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{defaults, settings};
use crate::settings::Overrides;

pub use organization::OrganizationCommand;
pub use project::ProjectCommand;
pub use registry::{
    ModuleCommand, ProviderCommand, ProviderPlatformCommand, ProviderVersionCommand,
    RegistryCommand,
};
pub use workspace::{
    ConfigurationVersionCommand, LockArgs, RunCommand, StateVersionCommand, TeamCommand,
    VariableCommand, VariableWriteArgs, WorkspaceCommand, WorkspaceListArgs, WorkspaceTarget,
};

/// Administer Terraform Cloud and Terraform Enterprise from the command line
#[derive(Parser, Debug)]
#[command(name = "tfx")]
#[command(version)]
#[command(about = "Administer Terraform Cloud / Enterprise organizations, workspaces and registries", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command
#[derive(Parser, Debug, Clone)]
pub struct GlobalArgs {
    /// Emit a single JSON document instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Hostname of the service (no scheme)
    #[arg(long, global = true, env = settings::HOSTNAME_ENV)]
    pub tfe_hostname: Option<String>,

    /// API token
    #[arg(long, global = true, env = settings::TOKEN_ENV, hide_env_values = true)]
    pub tfe_token: Option<String>,

    /// Organization name
    #[arg(long, global = true, env = settings::ORGANIZATION_ENV)]
    pub tfe_org: Option<String>,

    /// Config file (default: ./.tfx.yaml, then ~/.tfx.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append redacted HTTP request/response dumps to this file
    #[arg(long, global = true, env = settings::HTTP_LOG_ENV)]
    pub http_log: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, env = settings::LOG_LEVEL_ENV, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Log directory
    #[arg(long, global = true, env = settings::LOG_DIR_ENV)]
    pub log_dir: Option<PathBuf>,

    /// Abort the whole command after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true, default_value_t = false)]
    pub yes: bool,
}

impl GlobalArgs {
    /// Values handed to configuration resolution
    pub fn overrides(&self) -> Overrides {
        Overrides {
            hostname: self.tfe_hostname.clone(),
            token: self.tfe_token.clone(),
            organization: self.tfe_org.clone(),
            http_log: self.http_log.clone(),
            config_path: self.config.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Destructive commands ask first unless `--yes` or JSON output
    pub fn needs_confirmation(&self) -> bool {
        !self.yes && !self.json
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Organizations
    #[command(visible_alias = "org")]
    Organization {
        #[command(subcommand)]
        command: OrganizationCommand,
    },

    /// Projects
    #[command(visible_alias = "prj")]
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Workspaces and everything scoped to one
    #[command(visible_alias = "ws")]
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommand,
    },

    /// Private module and provider registry
    #[command(visible_alias = "reg")]
    Registry {
        #[command(subcommand)]
        command: RegistryCommand,
    },

    /// Print the CLI reference as Markdown
    #[command(hide = true)]
    MarkdownHelp,
}

impl Command {
    /// Commands that never talk to the service
    pub fn is_offline(&self) -> bool {
        matches!(self, Command::MarkdownHelp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_workspace_args_reachable_from_cli_root() {
        let cli = Cli::parse_from(["tfx", "ws", "lock", "--all", "-s", "prod"]);
        let Command::Workspace {
            command: WorkspaceCommand::Lock(LockArgs { name, all, search }),
        } = cli.command
        else {
            panic!("expected workspace lock");
        };
        assert!(name.is_none());
        assert!(all);
        assert_eq!(search.as_deref(), Some("prod"));

        let cli = Cli::parse_from(["tfx", "ws", "ls", "--wildcard-name", "app-*"]);
        let Command::Workspace {
            command: WorkspaceCommand::List(WorkspaceListArgs { wildcard_name, .. }),
        } = cli.command
        else {
            panic!("expected workspace list");
        };
        assert_eq!(wildcard_name.as_deref(), Some("app-*"));
    }

    #[test]
    fn test_global_defaults() {
        let cli = Cli::parse_from(["tfx", "organization", "list"]);
        assert!(!cli.global.json);
        assert!(!cli.global.yes);
        assert_eq!(cli.global.log_level, defaults::LOG_LEVEL);
        assert!(cli.global.timeout.is_none());
        assert!(matches!(
            cli.command,
            Command::Organization {
                command: OrganizationCommand::List(_)
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "tfx",
            "ws",
            "list",
            "--json",
            "--tfe-org",
            "acme",
            "--timeout",
            "30",
        ]);
        assert!(cli.global.json);
        assert_eq!(cli.global.tfe_org.as_deref(), Some("acme"));

        let overrides = cli.global.overrides();
        assert_eq!(overrides.organization.as_deref(), Some("acme"));
        assert_eq!(overrides.timeout_secs, Some(30));
    }

    #[test]
    fn test_needs_confirmation() {
        let cli = Cli::parse_from(["tfx", "org", "list"]);
        assert!(cli.global.needs_confirmation());

        let cli = Cli::parse_from(["tfx", "org", "list", "-y"]);
        assert!(!cli.global.needs_confirmation());

        let cli = Cli::parse_from(["tfx", "org", "list", "--json"]);
        assert!(!cli.global.needs_confirmation());
    }

    #[test]
    fn test_markdown_help_is_offline() {
        let cli = Cli::parse_from(["tfx", "markdown-help"]);
        assert!(cli.command.is_offline());
    }
}
