//! Human-readable renderer: rounded tables and coloured property blocks

use std::io::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Color, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use crate::error::{Result, TfeError};

use super::{Cell, Tone};

pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
}

fn to_table_cell(cell: Cell) -> comfy_table::Cell {
    let table_cell = comfy_table::Cell::new(cell.text);
    match cell.tone {
        Tone::Plain => table_cell,
        Tone::Success => table_cell.fg(Color::Green),
        Tone::Failure => table_cell.fg(Color::Red),
        Tone::Progress => table_cell.fg(Color::Yellow),
    }
}

fn property_table(pairs: impl Iterator<Item = (String, String)>) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    for (label, value) in pairs {
        table.add_row(vec![
            comfy_table::Cell::new(format!("{}:", label)).add_attribute(Attribute::Bold),
            comfy_table::Cell::new(value).fg(Color::Cyan),
        ]);
    }
    table
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    pub fn render_table(&mut self, headers: &[&str], rows: Vec<Vec<Cell>>) -> Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.to_vec());

        for row in rows {
            table.add_row(row.into_iter().map(to_table_cell).collect::<Vec<_>>());
        }

        writeln!(self.out, "{table}")?;
        Ok(())
    }

    pub fn render_properties(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        let table = property_table(pairs.iter().map(|(l, v)| (l.to_string(), v.clone())));
        writeln!(self.out, "{table}")?;
        Ok(())
    }

    pub fn render_tags(&mut self, group_label: &str, pairs: &[(String, String)]) -> Result<()> {
        writeln!(self.out, "{}", style(format!("{}:", group_label)).bold())?;
        if pairs.is_empty() {
            return Ok(());
        }
        let table = property_table(pairs.iter().cloned());
        for line in table.to_string().lines() {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn command_header(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", style(text).bold().blue())?;
        Ok(())
    }

    pub fn render_error(&mut self, err: &TfeError) -> Result<()> {
        writeln!(self.out, "{}", style(format!("Error: {}", err)).red())?;
        Ok(())
    }

    pub fn render_json<T: Serialize + ?Sized>(&mut self, doc: &T) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }
}
