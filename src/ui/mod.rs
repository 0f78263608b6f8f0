//! UI utilities for terminal output
//!
//! Progress spinners and confirmation prompts. Both stay silent in JSON mode.

mod confirm;
mod spinner;

pub use confirm::confirm_delete;
pub use spinner::{create_spinner, finish_spinner};
