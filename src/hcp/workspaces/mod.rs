//! Workspace module

mod api;
mod commands;
mod filter;
mod lock;
mod models;

pub(crate) use commands::target_workspace;
pub use commands::run_ws_command;
pub use filter::filter_workspaces;
pub use lock::{BatchLockResult, LockOutcome};
pub use models::{VcsRepo, Workspace, WorkspaceAttributes, WorkspaceListOptions};
