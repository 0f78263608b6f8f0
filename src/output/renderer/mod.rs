//! Presentation primitives with a terminal and a JSON implementation
//!
//! Views talk only to [`Renderer`]; which variant is active decides whether
//! the output is human-readable tables or a single JSON document.

mod json;
mod terminal;

use std::io::Write;

use serde::Serialize;

use crate::error::{Result, TfeError};
use crate::hcp::runs::{RunStatus, StatusClass};

pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;

/// Colour hint for a table cell; ignored by the JSON renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Success,
    Failure,
    Progress,
}

impl From<StatusClass> for Tone {
    fn from(class: StatusClass) -> Self {
        match class {
            StatusClass::Success => Tone::Success,
            StatusClass::Failure => Tone::Failure,
            StatusClass::InProgress => Tone::Progress,
            StatusClass::Neutral => Tone::Plain,
        }
    }
}

/// One table cell: its text and an optional colour hint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    /// Run status coloured by its class
    pub fn status(status: RunStatus) -> Self {
        Self {
            text: status.to_string(),
            tone: status.class().into(),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

impl From<&String> for Cell {
    fn from(text: &String) -> Self {
        Cell::new(text.as_str())
    }
}

/// Output sink for one command invocation
pub enum Renderer {
    Terminal(TerminalRenderer),
    Json(JsonRenderer),
}

impl Renderer {
    /// Renderer writing to stdout
    pub fn stdout(json: bool) -> Self {
        Self::with_writer(json, Box::new(std::io::stdout()))
    }

    pub fn with_writer(json: bool, out: Box<dyn Write + Send>) -> Self {
        if json {
            Renderer::Json(JsonRenderer::new(out))
        } else {
            Renderer::Terminal(TerminalRenderer::new(out))
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Renderer::Json(_))
    }

    pub fn render_table(&mut self, headers: &[&str], rows: Vec<Vec<Cell>>) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.render_table(headers, rows),
            Renderer::Json(r) => r.render_table(headers, rows),
        }
    }

    /// Aligned `label: value` block
    pub fn render_properties(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.render_properties(pairs),
            Renderer::Json(r) => r.render_properties(pairs),
        }
    }

    /// Labelled nested block of key/value pairs
    pub fn render_tags(&mut self, group_label: &str, pairs: &[(String, String)]) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.render_tags(group_label, pairs),
            Renderer::Json(r) => r.render_tags(group_label, pairs),
        }
    }

    /// Informational line; nothing in JSON mode
    pub fn message(&mut self, text: &str) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.message(text),
            Renderer::Json(_) => Ok(()),
        }
    }

    /// Preamble line naming what the command is doing; nothing in JSON mode
    pub fn command_header(&mut self, text: &str) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.command_header(text),
            Renderer::Json(_) => Ok(()),
        }
    }

    pub fn render_error(&mut self, err: &TfeError) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.render_error(err),
            Renderer::Json(r) => r.render_error(err),
        }
    }

    /// Emit a whole document; the terminal renderer pretty-prints it too
    pub fn render_json<T: Serialize + ?Sized>(&mut self, doc: &T) -> Result<()> {
        match self {
            Renderer::Terminal(r) => r.render_json(doc),
            Renderer::Json(r) => r.render_json(doc),
        }
    }
}

/// Cloneable in-memory sink for asserting on rendered output
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub(crate) fn renderer(&self, json: bool) -> Renderer {
        Renderer::with_writer(json, Box::new(self.clone()))
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_suppresses_messages() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(true);
        assert!(renderer.is_json());
        renderer.command_header("Listing workspaces").unwrap();
        renderer.message("nothing to see").unwrap();
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn test_status_cell_tone() {
        assert_eq!(Cell::status(RunStatus::Applied).tone, Tone::Success);
        assert_eq!(Cell::status(RunStatus::Errored).tone, Tone::Failure);
        assert_eq!(Cell::status(RunStatus::Planning).tone, Tone::Progress);
        assert_eq!(Cell::status(RunStatus::Applied).text, "applied");
    }
}
