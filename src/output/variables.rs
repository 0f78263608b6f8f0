//! Workspace variable views

use serde::Serialize;

use crate::error::Result;
use crate::hcp::variables::Variable;
use crate::output::renderer::{Cell, Renderer};

/// Value shown for sensitive variables
const HIDDEN: &str = "***";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VariableItem<'a> {
    id: &'a str,
    key: &'a str,
    value: &'a str,
    description: &'a str,
    category: &'a str,
    hcl: bool,
    sensitive: bool,
}

impl<'a> From<&'a Variable> for VariableItem<'a> {
    fn from(v: &'a Variable) -> Self {
        Self {
            id: &v.id,
            key: v.key(),
            value: displayed_value(v),
            description: v.description(),
            category: v.category(),
            hcl: v.is_hcl(),
            sensitive: v.is_sensitive(),
        }
    }
}

fn displayed_value(v: &Variable) -> &str {
    if v.is_sensitive() {
        HIDDEN
    } else {
        v.value()
    }
}

pub struct VariableView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> VariableView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, variables: &[Variable]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<VariableItem> = variables.iter().map(VariableItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = variables
            .iter()
            .map(|v| {
                vec![
                    Cell::new(&v.id),
                    Cell::new(v.key()),
                    Cell::new(displayed_value(v)),
                    Cell::new(v.category()),
                    Cell::new(v.is_sensitive().to_string()),
                    Cell::new(v.is_hcl().to_string()),
                ]
            })
            .collect();
        self.renderer.render_table(
            &["ID", "Key", "Value", "Category", "Sensitive", "HCL"],
            rows,
        )
    }

    /// Used by show, create and update
    pub fn show(&mut self, variable: &Variable) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&VariableItem::from(variable));
        }

        self.renderer.render_properties(&[
            ("ID", variable.id.clone()),
            ("Key", variable.key().to_string()),
            ("Value", displayed_value(variable).to_string()),
            ("Description", variable.description().to_string()),
            ("Category", variable.category().to_string()),
            ("Sensitive", variable.is_sensitive().to_string()),
            ("HCL", variable.is_hcl().to_string()),
        ])
    }

    pub fn deleted(&mut self, key: &str, workspace_name: &str) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&serde_json::json!({
                "key": key,
                "workspace": workspace_name,
                "status": "Deleted"
            }));
        }
        self.renderer.message(&format!(
            "Variable '{}' deleted from workspace '{}'",
            key, workspace_name
        ))
    }
}
