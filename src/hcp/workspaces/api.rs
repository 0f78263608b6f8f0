//! Workspace API operations

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{ErrorKind, Result, ResultExt, TfeError};
use crate::hcp::pagination::{self, Page};
use crate::hcp::traits::{ApiDocument, ApiListResponse, PaginatedResponse, TfeResource};
use crate::hcp::TfeClient;

use super::filter::filter_workspaces;
use super::models::{Workspace, WorkspaceListOptions};

/// Build the API path for workspaces with the server-side filters
fn build_workspaces_path(org: &str, options: &WorkspaceListOptions) -> String {
    let mut path = format!(
        "/{}/{}/{}",
        api::ORGANIZATIONS,
        urlencoding::encode(org),
        api::WORKSPACES
    );

    let mut query_parts = vec!["include=current_run".to_string()];
    let mut push = |key: &str, value: Option<&str>| {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            query_parts.push(format!("{}={}", key, urlencoding::encode(v)));
        }
    };
    push("search[name]", options.search.as_deref());
    push("search[wildcard-name]", options.wildcard_name.as_deref());
    push("filter[project][id]", options.project_id.as_deref());
    push(
        "filter[current-run][status]",
        options.run_status.map(|s| s.as_str()),
    );
    push("search[tags]", options.tags.as_deref());
    push("search[exclude-tags]", options.exclude_tags.as_deref());

    path.push('?');
    path.push_str(&query_parts.join("&"));
    path
}

/// Map a bare 404 onto a message naming the workspace
fn not_found_as(err: TfeError, message: String) -> TfeError {
    if err.kind() == ErrorKind::NotFound {
        TfeError::NotFound(message)
    } else {
        err
    }
}

impl TfeClient {
    /// List all workspace pages of `path`, attaching each workspace's current run
    async fn fetch_workspace_pages(&self, path: &str, error_context: &str) -> Result<Vec<Workspace>> {
        pagination::fetch_all(self.context(), move |n| async move {
            let response: ApiListResponse<Workspace> = self.list_page(path, n).await?;
            let page_info = response.pagination();
            let ApiListResponse { data, included, .. } = response;
            let items = data
                .into_iter()
                .map(|mut ws| {
                    ws.hydrate_current_run(&included);
                    ws
                })
                .collect();
            Ok::<Page<Workspace>, TfeError>(Page::new(items, page_info))
        })
        .await
        .with_context(|| format!("failed to list {}", error_context))
    }

    /// List workspaces of an organization
    ///
    /// Server-side filters are forwarded as query parameters; the repository
    /// filter (which the API lacks) and the run status are applied locally.
    pub async fn fetch_workspaces(
        &self,
        org: &str,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        let path = build_workspaces_path(org, options);
        let error_context = format!("workspaces for organization '{}'", org);

        let workspaces = self.fetch_workspace_pages(&path, &error_context).await?;
        debug!("Fetched {} workspaces for {}", workspaces.len(), org);

        Ok(filter_workspaces(
            workspaces,
            options.run_status,
            options.repository.as_deref(),
        ))
    }

    /// List workspaces across every organization, one organization at a time
    pub async fn fetch_workspaces_across_orgs(
        &self,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        let orgs = self.fetch_organizations(None).await?;
        let mut all = Vec::new();
        for org in &orgs {
            all.extend(self.fetch_workspaces(org.name(), options).await?);
        }
        Ok(all)
    }

    /// Read a workspace by organization and name
    pub async fn read_workspace(&self, org: &str, name: &str) -> Result<Workspace> {
        let path = format!(
            "/{}/{}/{}/{}?include=current_run",
            api::ORGANIZATIONS,
            urlencoding::encode(org),
            api::WORKSPACES,
            urlencoding::encode(name)
        );
        let what = format!("read workspace '{}'", name);

        let doc: ApiDocument<Workspace> = self.get_json(&path, &what).await.map_err(|e| {
            not_found_as(
                e,
                format!("workspace '{}' not found in organization '{}'", name, org),
            )
        })?;
        let mut workspace = doc.data;
        workspace.hydrate_current_run(&doc.included);
        Ok(workspace)
    }

    /// Read a workspace by id (`ws-...`)
    pub async fn read_workspace_by_id(&self, workspace_id: &str) -> Result<Workspace> {
        let path = format!(
            "/{}/{}?include=current_run",
            api::WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        let what = format!("read workspace '{}'", workspace_id);

        let doc: ApiDocument<Workspace> = self
            .get_json(&path, &what)
            .await
            .map_err(|e| not_found_as(e, format!("workspace '{}' not found", workspace_id)))?;
        let mut workspace = doc.data;
        workspace.hydrate_current_run(&doc.included);
        Ok(workspace)
    }

    /// Workspaces allowed to read this workspace's state outputs
    pub async fn fetch_workspace_remote_state_consumers(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<Workspace>> {
        let path = format!(
            "/{}/{}/relationships/remote-state-consumers",
            api::WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        let error_context = format!("remote state consumers of workspace '{}'", workspace_id);
        self.fetch_all_pages::<Workspace>(&path, &error_context)
            .await
    }

    async fn workspace_action(
        &self,
        workspace_id: &str,
        action: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Workspace> {
        let path = format!(
            "/{}/{}/actions/{}",
            api::WORKSPACES,
            urlencoding::encode(workspace_id),
            action
        );
        let what = format!("{} workspace '{}'", action, workspace_id);
        let body = body.unwrap_or_else(|| serde_json::json!({}));

        let doc: ApiDocument<Workspace> = self.send_json(Method::POST, &path, &body, &what).await?;
        Ok(doc.data)
    }

    /// Lock a workspace with a reason
    pub async fn lock_workspace(&self, workspace_id: &str, reason: &str) -> Result<Workspace> {
        debug!("Locking workspace {}: {}", workspace_id, reason);
        self.workspace_action(
            workspace_id,
            "lock",
            Some(serde_json::json!({ "reason": reason })),
        )
        .await
    }

    /// Release a lock held by the calling token
    pub async fn unlock_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        self.workspace_action(workspace_id, "unlock", None).await
    }

    /// Release a lock taken by this invocation, even after cancellation
    pub(crate) async fn release_workspace_lock(&self, workspace_id: &str) -> Result<Workspace> {
        let path = format!(
            "/{}/{}/actions/unlock",
            api::WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        let what = format!("unlock workspace '{}'", workspace_id);
        let doc: ApiDocument<Workspace> = self
            .send_json_detached(Method::POST, &path, &serde_json::json!({}), &what)
            .await?;
        Ok(doc.data)
    }

    /// Release a lock regardless of who holds it
    pub async fn force_unlock_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        debug!("Force-unlocking workspace {}", workspace_id);
        self.workspace_action(workspace_id, "force-unlock", None)
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::hcp::runs::RunStatus;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn ws_json(id: &str, name: &str, locked: bool) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "workspaces",
            "attributes": {"name": name, "locked": locked},
            "relationships": {
                "organization": {"data": {"id": "acme", "type": "organizations"}}
            }
        })
    }

    #[test]
    fn test_build_path_defaults() {
        let path = build_workspaces_path("acme", &WorkspaceListOptions::default());
        assert_eq!(path, "/organizations/acme/workspaces?include=current_run");
    }

    #[test]
    fn test_build_path_all_filters() {
        let options = WorkspaceListOptions {
            search: Some("net".to_string()),
            wildcard_name: Some("*-prod".to_string()),
            project_id: Some("prj-1".to_string()),
            run_status: Some(RunStatus::Errored),
            tags: Some("a,b".to_string()),
            exclude_tags: Some("c".to_string()),
            repository: Some("acme/app".to_string()),
        };
        let path = build_workspaces_path("acme", &options);
        assert!(path.contains("search[name]=net"));
        assert!(path.contains("search[wildcard-name]=%2A-prod"));
        assert!(path.contains("filter[project][id]=prj-1"));
        assert!(path.contains("filter[current-run][status]=errored"));
        assert!(path.contains("search[tags]=a%2Cb"));
        assert!(path.contains("search[exclude-tags]=c"));
        // repository has no server-side filter
        assert!(!path.contains("acme%2Fapp"));
    }

    #[tokio::test]
    async fn test_fetch_workspaces_hydrates_and_filters_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/acme/workspaces"))
            .and(query_param("include", "current_run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "ws-1", "attributes": {"name": "one"},
                     "relationships": {"current-run": {"data": {"id": "run-1", "type": "runs"}}}},
                    {"id": "ws-2", "attributes": {"name": "two"},
                     "relationships": {"current-run": {"data": null}}},
                    {"id": "ws-3", "attributes": {"name": "three"},
                     "relationships": {"current-run": {"data": {"id": "run-3", "type": "runs"}}}}
                ],
                "included": [
                    {"id": "run-1", "type": "runs", "attributes": {"status": "applied"}},
                    {"id": "run-3", "type": "runs", "attributes": {"status": "errored"}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());

        let all = client
            .fetch_workspaces("acme", &WorkspaceListOptions::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].current_run_status(), Some(RunStatus::Errored));

        let options = WorkspaceListOptions {
            run_status: Some(RunStatus::Applied),
            ..Default::default()
        };
        let applied = client.fetch_workspaces("acme", &options).await.unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].id, "ws-1");
    }

    #[tokio::test]
    async fn test_read_workspace_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/acme/workspaces/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let err = client.read_workspace("acme", "nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "workspace 'nope' not found in organization 'acme'"
        );
    }

    #[tokio::test]
    async fn test_read_workspace_by_id_hydrates_current_run() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1"))
            .and(query_param("include", "current_run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "ws-1", "attributes": {"name": "one"},
                    "relationships": {"current-run": {"data": {"id": "run-1", "type": "runs"}}}},
                "included": [{"id": "run-1", "type": "runs", "attributes": {"status": "planning"}}]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/workspaces/ws-gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let ws = client.read_workspace_by_id("ws-1").await.unwrap();
        assert_eq!(ws.name(), "one");
        assert_eq!(ws.current_run_status(), Some(RunStatus::Planning));

        let err = client.read_workspace_by_id("ws-gone").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "workspace 'ws-gone' not found");
    }

    #[tokio::test]
    async fn test_lock_workspace_sends_reason() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workspaces/ws-1/actions/lock"))
            .and(body_partial_json(serde_json::json!({"reason": "maintenance"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": ws_json("ws-1", "one", true)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let ws = client.lock_workspace("ws-1", "maintenance").await.unwrap();
        assert!(ws.is_locked());
    }

    #[tokio::test]
    async fn test_remote_state_consumers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/relationships/remote-state-consumers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [ws_json("ws-2", "consumer-a", false), ws_json("ws-3", "consumer-b", false)]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let consumers = client
            .fetch_workspace_remote_state_consumers("ws-1")
            .await
            .unwrap();
        let names: Vec<&str> = consumers.iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["consumer-a", "consumer-b"]);
    }
}
