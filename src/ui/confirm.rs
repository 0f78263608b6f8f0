//! Confirmation prompts for destructive operations

use dialoguer::Confirm;

use crate::error::{Result, TfeError};

/// Ask before deleting `what`
///
/// Returns `true` without prompting when `ask` is false (`--yes` or JSON
/// output). The default answer is no.
pub fn confirm_delete(what: &str, ask: bool) -> Result<bool> {
    if !ask {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()
        .map_err(|e| TfeError::Io(format!("confirmation prompt failed: {}", e)))
}
