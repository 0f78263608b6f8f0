//! State version views

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::hcp::state::StateVersion;
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateVersionItem<'a> {
    id: &'a str,
    serial: u64,
    lineage: &'a str,
    terraform_version: &'a str,
    created_at: &'a str,
    resources_processed: bool,
}

impl<'a> From<&'a StateVersion> for StateVersionItem<'a> {
    fn from(sv: &'a StateVersion) -> Self {
        Self {
            id: &sv.id,
            serial: sv.serial(),
            lineage: sv.lineage(),
            terraform_version: sv.terraform_version(),
            created_at: sv.created_at(),
            resources_processed: sv.resources_processed(),
        }
    }
}

pub struct StateVersionView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> StateVersionView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, versions: &[StateVersion]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<StateVersionItem> =
                versions.iter().map(StateVersionItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = versions
            .iter()
            .map(|sv| {
                vec![
                    Cell::new(&sv.id),
                    Cell::new(sv.serial().to_string()),
                    Cell::new(sv.terraform_version()),
                    Cell::new(sv.created_at()),
                ]
            })
            .collect();
        self.renderer
            .render_table(&["ID", "Serial", "Terraform Version", "Created"], rows)
    }

    /// Used by show and create
    pub fn show(&mut self, sv: &StateVersion) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&StateVersionItem::from(sv));
        }

        self.renderer.render_properties(&[
            ("ID", sv.id.clone()),
            ("Serial", sv.serial().to_string()),
            ("Lineage", sv.lineage().to_string()),
            ("Terraform Version", sv.terraform_version().to_string()),
            ("Created", sv.created_at().to_string()),
            ("Resources Processed", sv.resources_processed().to_string()),
        ])
    }

    pub fn downloaded(&mut self, sv_id: &str, path: &Path) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&serde_json::json!({
                "id": sv_id,
                "path": path.display().to_string()
            }));
        }
        self.renderer.message(&format!(
            "State version '{}' written to {}",
            sv_id,
            path.display()
        ))
    }
}
