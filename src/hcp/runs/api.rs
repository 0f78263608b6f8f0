//! Run API operations

use log::debug;
use reqwest::Method;
use serde_json::json;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::traits::ApiDocument;
use crate::hcp::TfeClient;

use super::models::Run;

/// JSON:API body for `POST /runs`
fn create_run_body(workspace_id: &str, message: &str, cv_id: Option<&str>) -> serde_json::Value {
    let mut relationships = json!({
        "workspace": {"data": {"type": "workspaces", "id": workspace_id}}
    });
    if let Some(cv) = cv_id {
        relationships["configuration-version"] =
            json!({"data": {"type": "configuration-versions", "id": cv}});
    }

    json!({
        "data": {
            "type": "runs",
            "attributes": {"message": message},
            "relationships": relationships
        }
    })
}

impl TfeClient {
    /// Most recent runs of a workspace, newest first
    ///
    /// Stops paging once `max_items` runs are collected.
    pub async fn fetch_runs(&self, workspace_id: &str, max_items: usize) -> Result<Vec<Run>> {
        let path = format!(
            "/{}/{}/{}",
            api::WORKSPACES,
            urlencoding::encode(workspace_id),
            api::RUNS
        );
        let error_context = format!("runs for workspace '{}'", workspace_id);
        self.fetch_pages_bounded::<Run>(&path, max_items, &error_context)
            .await
    }

    pub async fn read_run(&self, run_id: &str) -> Result<Run> {
        let path = format!("/{}/{}", api::RUNS, urlencoding::encode(run_id));
        let label = format!("run '{}'", run_id);
        self.fetch_resource_by_path::<Run>(&path, &label)
            .await?
            .map(|(run, _)| run)
            .ok_or_else(|| TfeError::NotFound(format!("{} not found", label)))
    }

    /// Queue a run; without a configuration version the workspace's latest is used
    pub async fn create_run(
        &self,
        workspace_id: &str,
        message: &str,
        configuration_version_id: Option<&str>,
    ) -> Result<Run> {
        debug!(
            "Creating run in {} (configuration version: {:?})",
            workspace_id, configuration_version_id
        );
        let body = create_run_body(workspace_id, message, configuration_version_id);
        let path = format!("/{}", api::RUNS);
        let doc: ApiDocument<Run> = self
            .send_json(Method::POST, &path, &body, "create run")
            .await?;
        Ok(doc.data)
    }

    pub async fn discard_run(&self, run_id: &str, comment: &str) -> Result<()> {
        let path = format!(
            "/{}/{}/actions/discard",
            api::RUNS,
            urlencoding::encode(run_id)
        );
        let body = json!({ "comment": comment });
        self.send_no_content(Method::POST, &path, Some(&body), "discard run")
            .await
    }
}
