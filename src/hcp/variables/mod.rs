//! Workspace variables module

mod api;
mod commands;
mod models;

pub use commands::run_variable_command;
pub use models::{Variable, VariableAttributes, VariableOptions};
