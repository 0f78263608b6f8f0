//! Run views

use serde::Serialize;

use crate::error::Result;
use crate::hcp::Run;
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunItem<'a> {
    id: &'a str,
    status: &'static str,
    message: &'a str,
    source: &'a str,
    configuration_version_id: &'a str,
    terraform_version: &'a str,
    plan_only: bool,
    is_destroy: bool,
    has_changes: bool,
    created_at: &'a str,
}

impl<'a> From<&'a Run> for RunItem<'a> {
    fn from(run: &'a Run) -> Self {
        Self {
            id: &run.id,
            status: run.status().as_str(),
            message: run.message(),
            source: run.source(),
            configuration_version_id: run.configuration_version_id(),
            terraform_version: run.terraform_version(),
            plan_only: run.plan_only(),
            is_destroy: run.is_destroy(),
            has_changes: run.has_changes(),
            created_at: run.created_at(),
        }
    }
}

pub struct RunView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> RunView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, runs: &[Run]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<RunItem> = runs.iter().map(RunItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = runs
            .iter()
            .map(|run| {
                vec![
                    Cell::new(&run.id),
                    Cell::status(run.status()),
                    Cell::new(run.configuration_version_id()),
                    Cell::new(run.source()),
                    Cell::new(run.created_at()),
                    Cell::new(run.message()),
                ]
            })
            .collect();
        self.renderer.render_table(
            &["ID", "Status", "Configuration Version", "Source", "Created", "Message"],
            rows,
        )
    }

    pub fn show(&mut self, run: &Run) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&RunItem::from(run));
        }

        self.renderer.render_properties(&[
            ("ID", run.id.clone()),
            ("Status", run.status().to_string()),
            ("Message", run.message().to_string()),
            ("Source", run.source().to_string()),
            ("Configuration Version", run.configuration_version_id().to_string()),
            ("Terraform Version", run.terraform_version().to_string()),
            ("Plan Only", run.plan_only().to_string()),
            ("Destroy", run.is_destroy().to_string()),
            ("Has Changes", run.has_changes().to_string()),
            ("Created", run.created_at().to_string()),
        ])
    }

    pub fn discarded(&mut self, run_id: &str) -> Result<()> {
        if self.renderer.is_json() {
            return self
                .renderer
                .render_json(&serde_json::json!({"id": run_id, "status": "Discarded"}));
        }
        self.renderer
            .message(&format!("Run '{}' discarded", run_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::renderer::SharedBuffer;

    fn run() -> Run {
        serde_json::from_value(serde_json::json!({
            "id": "run-1",
            "type": "runs",
            "attributes": {"status": "planned_and_finished", "message": "Queued manually", "plan-only": true},
            "relationships": {
                "configuration-version": {"data": {"id": "cv-1", "type": "configuration-versions"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_show_json() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(true);
        RunView::new(&mut renderer).show(&run()).unwrap();

        let doc: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(doc["status"], "planned_and_finished");
        assert_eq!(doc["configurationVersionId"], "cv-1");
        assert_eq!(doc["planOnly"], true);
    }

    #[test]
    fn test_list_terminal() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(false);
        RunView::new(&mut renderer).list(&[run()]).unwrap();
        let out = buf.contents();
        assert!(out.contains("run-1"));
        assert!(out.contains("planned_and_finished"));
    }
}
