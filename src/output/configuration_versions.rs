//! Configuration version views

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::hcp::configuration_versions::ConfigurationVersion;
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationVersionItem<'a> {
    id: &'a str,
    status: &'a str,
    source: &'a str,
    speculative: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

impl<'a> From<&'a ConfigurationVersion> for ConfigurationVersionItem<'a> {
    fn from(cv: &'a ConfigurationVersion) -> Self {
        Self {
            id: &cv.id,
            status: cv.status(),
            source: cv.source(),
            speculative: cv.is_speculative(),
            error_message: cv.error_message(),
        }
    }
}

pub struct ConfigurationVersionView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> ConfigurationVersionView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, cvs: &[ConfigurationVersion]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<ConfigurationVersionItem> =
                cvs.iter().map(ConfigurationVersionItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = cvs
            .iter()
            .map(|cv| {
                vec![
                    Cell::new(&cv.id),
                    Cell::new(cv.status()),
                    Cell::new(cv.source()),
                    Cell::new(cv.is_speculative().to_string()),
                ]
            })
            .collect();
        self.renderer
            .render_table(&["ID", "Status", "Source", "Speculative"], rows)
    }

    pub fn show(&mut self, cv: &ConfigurationVersion) -> Result<()> {
        if self.renderer.is_json() {
            return self
                .renderer
                .render_json(&ConfigurationVersionItem::from(cv));
        }

        let mut pairs = vec![
            ("ID", cv.id.clone()),
            ("Status", cv.status().to_string()),
            ("Source", cv.source().to_string()),
            ("Speculative", cv.is_speculative().to_string()),
        ];
        if let Some(err) = cv.error_message() {
            pairs.push(("Error", err.to_string()));
        }
        self.renderer.render_properties(&pairs)?;

        let timestamps = cv.status_timestamps();
        if !timestamps.is_empty() {
            self.renderer.render_tags("Status Timestamps", &timestamps)?;
        }
        Ok(())
    }

    pub fn downloaded(&mut self, cv_id: &str, directory: &Path) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&serde_json::json!({
                "id": cv_id,
                "directory": directory.display().to_string()
            }));
        }
        self.renderer.message(&format!(
            "Configuration version '{}' downloaded to {}",
            cv_id,
            directory.display()
        ))
    }
}
