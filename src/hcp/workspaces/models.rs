//! Workspace data models

use serde::Deserialize;

use crate::hcp::runs::{Run, RunStatus};
use crate::hcp::traits::{included_of_type, Relationship, TfeResource};

/// Workspace data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
    #[serde(default)]
    pub relationships: Option<WorkspaceRelationships>,
    /// Hydrated from `included` when listed with `include=current_run`
    #[serde(skip)]
    pub current_run: Option<Run>,
}

/// Workspace attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkspaceAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,
    #[serde(rename = "execution-mode")]
    pub execution_mode: Option<String>,
    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,
    #[serde(rename = "working-directory")]
    pub working_directory: Option<String>,
    pub locked: Option<bool>,
    #[serde(rename = "global-remote-state")]
    pub global_remote_state: Option<bool>,
    #[serde(rename = "resource-count")]
    pub resource_count: Option<u32>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated-at")]
    pub updated_at: Option<String>,
    #[serde(rename = "vcs-repo")]
    pub vcs_repo: Option<VcsRepo>,
    #[serde(rename = "tag-names", default)]
    pub tag_names: Vec<String>,
}

/// VCS connection of a workspace
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsRepo {
    /// `owner/repo` on the VCS provider
    pub identifier: Option<String>,
    pub branch: Option<String>,
    #[serde(rename = "oauth-token-id")]
    pub oauth_token_id: Option<String>,
    #[serde(rename = "repository-http-url")]
    pub repository_http_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkspaceRelationships {
    #[serde(default)]
    pub organization: Option<Relationship>,
    #[serde(default)]
    pub project: Option<Relationship>,
    #[serde(rename = "current-run", default)]
    pub current_run: Option<Relationship>,
    #[serde(rename = "locked-by", default)]
    pub locked_by: Option<Relationship>,
}

/// Server- and client-side filters for workspace listings
#[derive(Debug, Clone, Default)]
pub struct WorkspaceListOptions {
    /// Name substring (`search[name]`)
    pub search: Option<String>,
    /// Pattern with leading/trailing `*` (`search[wildcard-name]`)
    pub wildcard_name: Option<String>,
    pub project_id: Option<String>,
    /// Status of the current run (`filter[current-run][status]`)
    pub run_status: Option<RunStatus>,
    /// Comma separated tag names (`search[tags]`)
    pub tags: Option<String>,
    /// Comma separated tag names to exclude (`search[exclude-tags]`)
    pub exclude_tags: Option<String>,
    /// VCS repository identifier; filtered client-side
    pub repository: Option<String>,
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Workspace {
    pub fn description(&self) -> &str {
        self.attributes.description.as_deref().unwrap_or("")
    }

    pub fn terraform_version(&self) -> &str {
        self.attributes.terraform_version.as_deref().unwrap_or("")
    }

    pub fn execution_mode(&self) -> &str {
        self.attributes.execution_mode.as_deref().unwrap_or("")
    }

    pub fn auto_apply(&self) -> bool {
        self.attributes.auto_apply.unwrap_or(false)
    }

    pub fn working_directory(&self) -> &str {
        self.attributes.working_directory.as_deref().unwrap_or("")
    }

    pub fn is_locked(&self) -> bool {
        self.attributes.locked.unwrap_or(false)
    }

    pub fn global_remote_state(&self) -> bool {
        self.attributes.global_remote_state.unwrap_or(false)
    }

    pub fn resource_count(&self) -> u32 {
        self.attributes.resource_count.unwrap_or(0)
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn updated_at(&self) -> &str {
        self.attributes.updated_at.as_deref().unwrap_or("")
    }

    pub fn tag_names(&self) -> &[String] {
        &self.attributes.tag_names
    }

    /// VCS repository identifier, if the workspace is VCS-backed
    pub fn repository(&self) -> Option<&str> {
        self.attributes
            .vcs_repo
            .as_ref()
            .and_then(|r| r.identifier.as_deref())
    }

    pub fn branch(&self) -> Option<&str> {
        self.attributes
            .vcs_repo
            .as_ref()
            .and_then(|r| r.branch.as_deref())
    }

    fn relationship(&self, pick: fn(&WorkspaceRelationships) -> Option<&Relationship>) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(pick)
            .and_then(|r| r.id())
    }

    /// Name of the owning organization
    pub fn organization(&self) -> &str {
        self.relationship(|r| r.organization.as_ref()).unwrap_or("")
    }

    pub fn project_id(&self) -> &str {
        self.relationship(|r| r.project.as_ref()).unwrap_or("")
    }

    pub fn current_run_id(&self) -> Option<&str> {
        self.relationship(|r| r.current_run.as_ref())
    }

    /// Status of the hydrated current run
    pub fn current_run_status(&self) -> Option<RunStatus> {
        self.current_run.as_ref().map(|r| r.status())
    }

    /// Attach the current run from a document's `included` section
    pub(crate) fn hydrate_current_run(&mut self, included: &[serde_json::Value]) {
        let Some(run_id) = self.current_run_id().map(|id| id.to_string()) else {
            return;
        };
        self.current_run = included_of_type(included, "runs")
            .find(|item| item["id"].as_str() == Some(run_id.as_str()))
            .and_then(|item| serde_json::from_value(item.clone()).ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_json() -> serde_json::Value {
        serde_json::json!({
            "id": "ws-1",
            "type": "workspaces",
            "attributes": {
                "name": "network-prod",
                "terraform-version": "1.9.5",
                "execution-mode": "remote",
                "auto-apply": true,
                "locked": false,
                "resource-count": 42,
                "vcs-repo": {"identifier": "acme/network", "branch": "main"},
                "tag-names": ["prod", "network"]
            },
            "relationships": {
                "organization": {"data": {"id": "acme", "type": "organizations"}},
                "project": {"data": {"id": "prj-1", "type": "projects"}},
                "current-run": {"data": {"id": "run-7", "type": "runs"}}
            }
        })
    }

    #[test]
    fn test_workspace_accessors() {
        let ws: Workspace = serde_json::from_value(workspace_json()).unwrap();
        assert_eq!(ws.name(), "network-prod");
        assert_eq!(ws.organization(), "acme");
        assert_eq!(ws.project_id(), "prj-1");
        assert_eq!(ws.repository(), Some("acme/network"));
        assert_eq!(ws.branch(), Some("main"));
        assert_eq!(ws.resource_count(), 42);
        assert!(ws.auto_apply());
        assert!(!ws.is_locked());
        assert_eq!(ws.tag_names(), &["prod".to_string(), "network".to_string()]);
    }

    #[test]
    fn test_hydrate_current_run() {
        let mut ws: Workspace = serde_json::from_value(workspace_json()).unwrap();
        let included = vec![
            serde_json::json!({"id": "run-6", "type": "runs", "attributes": {"status": "errored"}}),
            serde_json::json!({"id": "run-7", "type": "runs", "attributes": {"status": "applied"}}),
        ];
        ws.hydrate_current_run(&included);
        assert_eq!(ws.current_run_status(), Some(RunStatus::Applied));
    }

    #[test]
    fn test_hydrate_without_current_run() {
        let mut ws: Workspace = serde_json::from_value(serde_json::json!({
            "id": "ws-2",
            "attributes": {"name": "empty"}
        }))
        .unwrap();
        ws.hydrate_current_run(&[]);
        assert!(ws.current_run.is_none());
        assert_eq!(ws.repository(), None);
        assert_eq!(ws.organization(), "");
    }
}
