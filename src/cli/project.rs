//! Project command definitions

use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List projects of the organization, or of every organization with --all
    #[command(visible_alias = "ls")]
    List(ProjectListArgs),

    /// Show project details
    Show(ProjectShowArgs),
}

#[derive(Parser, Debug)]
pub struct ProjectListArgs {
    /// Only projects whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// List across all organizations
    #[arg(short, long, default_value_t = false)]
    pub all: bool,
}

/// Exactly one of --id or --name
#[derive(Parser, Debug)]
#[command(group(clap::ArgGroup::new("project").required(true).args(["id", "name"])))]
pub struct ProjectShowArgs {
    /// Project ID (prj-xxx)
    #[arg(short, long)]
    pub id: Option<String>,

    /// Project name (exact match)
    #[arg(short, long)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, ProjectCommand};
    use clap::Parser;

    #[test]
    fn test_show_requires_id_or_name() {
        assert!(Cli::try_parse_from(["tfx", "project", "show"]).is_err());
        assert!(
            Cli::try_parse_from(["tfx", "project", "show", "--id", "prj-1", "--name", "x"])
                .is_err()
        );

        let cli = Cli::parse_from(["tfx", "prj", "show", "--name", "core"]);
        let Command::Project {
            command: ProjectCommand::Show(args),
        } = cli.command
        else {
            panic!("expected project show");
        };
        assert_eq!(args.name.as_deref(), Some("core"));
        assert!(args.id.is_none());
    }
}
