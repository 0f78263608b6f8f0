//! Output module
//!
//! [`Renderer`] decides between terminal tables and a single JSON document;
//! the views shape each resource for it.

mod configuration_versions;
mod organizations;
mod projects;
mod registry;
pub mod renderer;
mod runs;
mod state_versions;
mod team_access;
mod variables;
mod workspaces;

pub use configuration_versions::ConfigurationVersionView;
pub use organizations::OrganizationView;
pub use projects::ProjectView;
pub use registry::RegistryView;
pub use renderer::{Cell, Renderer, Tone};
pub use runs::RunView;
pub use state_versions::StateVersionView;
pub use team_access::TeamAccessView;
pub use variables::VariableView;
pub use workspaces::WorkspaceView;
