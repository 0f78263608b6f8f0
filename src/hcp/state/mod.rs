//! State version module

mod api;
mod commands;
mod models;

pub use commands::run_state_command;
pub use models::{EncodedState, StateFile, StateFileHeader, StateVersion};
