//! Configuration versions module

mod api;
mod commands;
mod models;
pub mod slug;

pub use commands::run_configuration_version_command;
pub use models::{ConfigurationVersion, ConfigurationVersionAttributes};
