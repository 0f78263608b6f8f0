//! Organization module

mod api;
mod commands;
mod models;

pub use commands::run_org_command;
pub use models::{Organization, OrganizationAttributes};
