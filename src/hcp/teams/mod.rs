//! Teams module: workspace team access

mod api;
mod commands;
mod models;

pub use commands::run_team_command;
pub use models::{NamedTeamAccess, Team, TeamAccess, TeamAccessAttributes};
