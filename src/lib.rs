//! tfx - Administer Terraform Cloud and Terraform Enterprise
//!
//! A CLI for the day-to-day administration of an organization: workspaces
//! and their variables, runs, configuration versions, state versions and
//! team access, plus the private module and provider registry.
//!
//! # Example
//!
//! ```bash
//! # List workspaces of the configured organization
//! tfx workspace list
//!
//! # Lock every workspace whose name contains "prod"
//! tfx ws lock --all --search prod
//!
//! # Upload the current directory as a configuration version
//! tfx ws cv create -w my-workspace -d .
//!
//! # Publish a module version to the private registry
//! tfx registry module create -n vpc -p aws -v 1.2.0 -d ./modules/vpc
//!
//! # Machine-readable output
//! tfx ws run list -w my-workspace --json
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hcp;
pub mod logging;
pub mod output;
pub mod settings;
pub mod ui;

pub use cli::{Cli, Command, GlobalArgs};
pub use error::{Result, TfeError};
pub use hcp::{
    run_org_command, run_prj_command, run_registry_command, run_ws_command, Organization,
    Project, RequestContext, Run, TfeClient, TfeResource, Workspace,
};
pub use output::Renderer;
pub use settings::{Config, Overrides};
