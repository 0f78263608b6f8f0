//! Run module

mod api;
mod commands;
mod models;

pub use commands::run_runs_command;
pub use models::{Run, RunAttributes, RunStatus, StatusClass};
