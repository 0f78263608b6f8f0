//! Organization command definitions

use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum OrganizationCommand {
    /// List organizations
    #[command(visible_alias = "ls")]
    List(OrganizationListArgs),

    /// Show organization details
    Show(OrganizationShowArgs),
}

#[derive(Parser, Debug)]
pub struct OrganizationListArgs {
    /// Only organizations whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug)]
pub struct OrganizationShowArgs {
    /// Organization name
    #[arg(short, long)]
    pub name: String,
}
