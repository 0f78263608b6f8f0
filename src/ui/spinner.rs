//! Progress spinner utilities
//!
//! Spinners draw on stderr so they never mix with stdout documents.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(100);

/// Start a spinner labelled `message`; JSON mode gets none.
pub fn create_spinner(message: &str, json: bool) -> Option<ProgressBar> {
    if json {
        return None;
    }
    let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
        .with_message(message.to_owned());
    match ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        Ok(style) => bar.set_style(style.tick_strings(&FRAMES)),
        Err(_) => bar.set_style(ProgressStyle::default_spinner()),
    }
    bar.enable_steady_tick(TICK);
    Some(bar)
}

/// Remove the spinner before results are printed
pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
}
