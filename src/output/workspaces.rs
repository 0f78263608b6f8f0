//! Workspace views

use serde::Serialize;

use crate::error::Result;
use crate::hcp::teams::NamedTeamAccess;
use crate::hcp::workspaces::{BatchLockResult, LockOutcome};
use crate::hcp::{TfeResource, Workspace};
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceListItem<'a> {
    name: &'a str,
    id: &'a str,
    organization: &'a str,
    resource_count: u32,
    terraform_version: &'a str,
    locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_run_status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
}

impl<'a> From<&'a Workspace> for WorkspaceListItem<'a> {
    fn from(ws: &'a Workspace) -> Self {
        Self {
            name: ws.name(),
            id: &ws.id,
            organization: ws.organization(),
            resource_count: ws.resource_count(),
            terraform_version: ws.terraform_version(),
            locked: ws.is_locked(),
            current_run_status: ws.current_run_status().map(|s| s.as_str()),
            repository: ws.repository(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamAccessItem<'a> {
    team_name: &'a str,
    team_id: &'a str,
    access: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceDetail<'a> {
    name: &'a str,
    id: &'a str,
    description: &'a str,
    organization: &'a str,
    project_id: &'a str,
    terraform_version: &'a str,
    execution_mode: &'a str,
    auto_apply: bool,
    working_directory: &'a str,
    locked: bool,
    global_remote_state: bool,
    resource_count: u32,
    created_at: &'a str,
    updated_at: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_run_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_run_status: Option<&'static str>,
    tags: &'a [String],
    team_access: Vec<TeamAccessItem<'a>>,
    remote_state_consumers: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LockItem<'a> {
    name: &'a str,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub struct WorkspaceView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> WorkspaceView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, workspaces: &[Workspace]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<WorkspaceListItem> =
                workspaces.iter().map(WorkspaceListItem::from).collect();
            return self.renderer.render_json(&items);
        }

        let rows = workspaces
            .iter()
            .map(|ws| {
                vec![
                    Cell::new(ws.organization()),
                    Cell::new(ws.name()),
                    Cell::new(&ws.id),
                    Cell::new(ws.resource_count().to_string()),
                    ws.current_run_status().map(Cell::status).unwrap_or_default(),
                    Cell::new(ws.repository().unwrap_or("")),
                    Cell::new(if ws.is_locked() { "true" } else { "false" }),
                ]
            })
            .collect();
        self.renderer.render_table(
            &[
                "Organization",
                "Name",
                "ID",
                "Resources",
                "Current Run",
                "Repository",
                "Locked",
            ],
            rows,
        )
    }

    /// Workspace details followed by team access and remote state consumers
    pub fn show(
        &mut self,
        ws: &Workspace,
        team_access: &[NamedTeamAccess],
        consumers: &[Workspace],
    ) -> Result<()> {
        if self.renderer.is_json() {
            let detail = WorkspaceDetail {
                name: ws.name(),
                id: &ws.id,
                description: ws.description(),
                organization: ws.organization(),
                project_id: ws.project_id(),
                terraform_version: ws.terraform_version(),
                execution_mode: ws.execution_mode(),
                auto_apply: ws.auto_apply(),
                working_directory: ws.working_directory(),
                locked: ws.is_locked(),
                global_remote_state: ws.global_remote_state(),
                resource_count: ws.resource_count(),
                created_at: ws.created_at(),
                updated_at: ws.updated_at(),
                repository: ws.repository(),
                branch: ws.branch(),
                current_run_id: ws.current_run_id(),
                current_run_status: ws.current_run_status().map(|s| s.as_str()),
                tags: ws.tag_names(),
                team_access: team_access
                    .iter()
                    .map(|t| TeamAccessItem {
                        team_name: &t.team_name,
                        team_id: t.access.team_id().unwrap_or(""),
                        access: t.access.access(),
                    })
                    .collect(),
                remote_state_consumers: consumers.iter().map(|c| c.name()).collect(),
            };
            return self.renderer.render_json(&detail);
        }

        self.renderer.render_properties(&[
            ("Name", ws.name().to_string()),
            ("ID", ws.id.clone()),
            ("Description", ws.description().to_string()),
            ("Organization", ws.organization().to_string()),
            ("Project", ws.project_id().to_string()),
            ("Terraform Version", ws.terraform_version().to_string()),
            ("Execution Mode", ws.execution_mode().to_string()),
            ("Auto Apply", ws.auto_apply().to_string()),
            ("Working Directory", ws.working_directory().to_string()),
            ("Locked", ws.is_locked().to_string()),
            ("Resources", ws.resource_count().to_string()),
            ("Repository", ws.repository().unwrap_or("").to_string()),
            ("Branch", ws.branch().unwrap_or("").to_string()),
            (
                "Current Run",
                ws.current_run_status()
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            ),
            ("Tags", ws.tag_names().join(", ")),
            ("Created", ws.created_at().to_string()),
            ("Updated", ws.updated_at().to_string()),
        ])?;

        let teams: Vec<(String, String)> = team_access
            .iter()
            .map(|t| (t.team_name.clone(), t.access.access().to_string()))
            .collect();
        self.renderer.render_tags("Team Access", &teams)?;

        let consumer_pairs: Vec<(String, String)> = consumers
            .iter()
            .map(|c| (c.name().to_string(), c.id.clone()))
            .collect();
        self.renderer
            .render_tags("Remote State Consumers", &consumer_pairs)
    }

    pub fn lock_outcome(&mut self, name: &str, outcome: LockOutcome) -> Result<()> {
        if self.renderer.is_json() {
            return self.renderer.render_json(&serde_json::json!({
                "name": name,
                "status": outcome.to_string()
            }));
        }
        self.renderer
            .render_properties(&[("Name", name.to_string()), ("Status", outcome.to_string())])
    }

    pub fn batch_lock(&mut self, results: &[BatchLockResult]) -> Result<()> {
        let items: Vec<LockItem> = results
            .iter()
            .map(|r| LockItem {
                name: &r.workspace_name,
                id: &r.workspace_id,
                status: r.result.as_ref().ok().map(|o| o.to_string()),
                error: r.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect();

        if self.renderer.is_json() {
            return self.renderer.render_json(&items);
        }

        let rows = items
            .into_iter()
            .map(|item| {
                let status = match (item.status, item.error) {
                    (Some(status), _) => Cell::new(status),
                    (None, Some(error)) => Cell {
                        text: error,
                        tone: crate::output::renderer::Tone::Failure,
                    },
                    (None, None) => Cell::default(),
                };
                vec![Cell::new(item.name), Cell::new(item.id), status]
            })
            .collect();
        self.renderer.render_table(&["Name", "ID", "Status"], rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::output::renderer::SharedBuffer;

    fn workspace() -> Workspace {
        serde_json::from_value(serde_json::json!({
            "id": "ws-1",
            "type": "workspaces",
            "attributes": {
                "name": "app-prod",
                "locked": true,
                "resource-count": 12,
                "vcs-repo": {"identifier": "acme/app", "branch": "main"}
            },
            "relationships": {"organization": {"data": {"id": "acme", "type": "organizations"}}}
        }))
        .unwrap()
    }

    #[test]
    fn test_list_json_fields() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(true);
        WorkspaceView::new(&mut renderer)
            .list(&[workspace()])
            .unwrap();

        let doc: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(doc[0]["name"], "app-prod");
        assert_eq!(doc[0]["resourceCount"], 12);
        assert_eq!(doc[0]["repository"], "acme/app");
        assert!(doc[0].get("currentRunStatus").is_none());
    }

    #[test]
    fn test_show_terminal_lists_consumers() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(false);
        let consumer: Workspace = serde_json::from_value(serde_json::json!({
            "id": "ws-2", "type": "workspaces", "attributes": {"name": "app-dns"}
        }))
        .unwrap();
        WorkspaceView::new(&mut renderer)
            .show(&workspace(), &[], &[consumer])
            .unwrap();

        let out = buf.contents();
        assert!(out.contains("app-prod"));
        assert!(out.contains("Team Access:"));
        assert!(out.contains("Remote State Consumers:"));
        assert!(out.contains("app-dns"));
    }

    #[test]
    fn test_batch_lock_json_reports_errors() {
        let buf = SharedBuffer::default();
        let mut renderer = buf.renderer(true);
        let results = vec![
            BatchLockResult {
                workspace_id: "ws-1".to_string(),
                workspace_name: "one".to_string(),
                result: Ok(LockOutcome::Locked),
            },
            BatchLockResult {
                workspace_id: "ws-2".to_string(),
                workspace_name: "two".to_string(),
                result: Err(TfeError::Conflict("lock held".to_string())),
            },
        ];
        WorkspaceView::new(&mut renderer)
            .batch_lock(&results)
            .unwrap();

        let doc: serde_json::Value = serde_json::from_str(&buf.contents()).unwrap();
        assert_eq!(doc[0]["status"], "Locked");
        assert_eq!(doc[1]["error"], "Conflict: lock held");
        assert!(doc[1].get("status").is_none());
    }
}
