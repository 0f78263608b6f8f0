//! Terraform Cloud / Enterprise API client
//!
//! Each resource lives in its own module with an `api` half (methods on
//! [`TfeClient`]) and a `commands` half (CLI handlers rendering through
//! [`crate::output`]).

mod client;
pub mod configuration_versions;
pub mod context;
pub mod organizations;
pub mod pagination;
pub mod projects;
pub mod registry;
pub mod runs;
pub mod state;
pub mod teams;
pub mod traits;
pub mod transport;
pub mod variables;
pub mod workspaces;

pub use client::TfeClient;
pub use configuration_versions::{run_configuration_version_command, ConfigurationVersion};
pub use context::RequestContext;
pub use organizations::{run_org_command, Organization, OrganizationAttributes};
pub use projects::{run_prj_command, Project, ProjectAttributes, TagBinding};
pub use registry::run_registry_command;
pub use runs::{run_runs_command, Run, RunAttributes, RunStatus};
pub use state::{run_state_command, StateVersion};
pub use teams::run_team_command;
pub use traits::{PaginatedResponse, TfeResource};
pub use variables::{run_variable_command, Variable};
pub use workspaces::{run_ws_command, Workspace, WorkspaceAttributes};
