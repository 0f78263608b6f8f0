//! JSON renderer: every primitive becomes one JSON document on the sink

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, TfeError};

use super::Cell;

pub struct JsonRenderer {
    out: Box<dyn Write + Send>,
}

impl JsonRenderer {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }

    /// Rows become objects keyed by the headers
    pub fn render_table(&mut self, headers: &[&str], rows: Vec<Vec<Cell>>) -> Result<()> {
        let objects: Vec<Value> = rows
            .into_iter()
            .map(|row| {
                let map: Map<String, Value> = headers
                    .iter()
                    .zip(row)
                    .map(|(h, cell)| (h.to_string(), Value::String(cell.text)))
                    .collect();
                Value::Object(map)
            })
            .collect();
        self.render_json(&objects)
    }

    pub fn render_properties(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        let map: Map<String, Value> = pairs
            .iter()
            .map(|(label, value)| (label.to_string(), Value::String(value.clone())))
            .collect();
        self.render_json(&map)
    }

    pub fn render_tags(&mut self, group_label: &str, pairs: &[(String, String)]) -> Result<()> {
        let tags: Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let mut doc = Map::new();
        doc.insert(group_label.to_string(), Value::Object(tags));
        self.render_json(&doc)
    }

    pub fn render_error(&mut self, err: &TfeError) -> Result<()> {
        self.render_json(&serde_json::json!({"error": err.to_string()}))
    }

    pub fn render_json<T: Serialize + ?Sized>(&mut self, doc: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, doc)?;
        writeln!(self.out)?;
        Ok(())
    }
}
