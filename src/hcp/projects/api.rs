//! Project API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::traits::{exact_name_matches, ApiDocument, TfeResource};
use crate::hcp::TfeClient;

use super::models::Project;

impl TfeClient {
    /// List projects of an organization, optionally narrowed by a name
    /// substring (`q=`, server-side)
    pub async fn fetch_projects(&self, org: &str, search: Option<&str>) -> Result<Vec<Project>> {
        let mut path = format!(
            "/{}/{}/{}",
            api::ORGANIZATIONS,
            urlencoding::encode(org),
            api::PROJECTS
        );
        if let Some(s) = search.filter(|s| !s.is_empty()) {
            path.push_str(&format!("?q={}", urlencoding::encode(s)));
        }

        let error_context = format!("projects for organization '{}'", org);
        self.fetch_all_pages::<Project>(&path, &error_context).await
    }

    /// List projects across every organization the token can see
    ///
    /// Organizations are visited one at a time in listing order; the first
    /// failing organization aborts the whole fan-out.
    pub async fn fetch_projects_across_orgs(&self, search: Option<&str>) -> Result<Vec<Project>> {
        let orgs = self.fetch_organizations(None).await?;
        let mut all = Vec::new();

        for org in &orgs {
            debug!("Fetching projects for organization {}", org.name());
            let projects = self.fetch_projects(org.name(), search).await?;
            all.extend(projects);
        }

        Ok(all)
    }

    /// Read a project by id, hydrating its effective tag bindings
    pub async fn read_project(&self, project_id: &str) -> Result<Project> {
        let path = format!(
            "/{}/{}?include=effective_tag_bindings",
            api::PROJECTS,
            urlencoding::encode(project_id)
        );
        let what = format!("read project '{}'", project_id);

        let doc: ApiDocument<Project> = self.get_json(&path, &what).await?;
        let mut project = doc.data;
        project.hydrate_tag_bindings(&doc.included);
        Ok(project)
    }

    /// Find a project by its exact name within an organization
    ///
    /// Lists with `q=<name>`, keeps the exact match, then re-reads it by id.
    pub async fn fetch_project_by_name(&self, org: &str, name: &str) -> Result<Project> {
        let candidates = self.fetch_projects(org, Some(name)).await?;
        let matched = exact_name_matches(candidates, name)
            .into_iter()
            .next()
            .ok_or_else(|| {
                TfeError::NotFound(format!(
                    "project '{}' not found in organization '{}'",
                    name, org
                ))
            })?;

        self.read_project(&matched.id)
            .await
            .with_context(|| format!("failed to read project '{}'", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project_json(id: &str, name: &str, org: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "projects",
            "attributes": {"name": name, "description": null},
            "relationships": {"organization": {"data": {"id": org, "type": "organizations"}}}
        })
    }

    fn org_json(name: &str) -> serde_json::Value {
        serde_json::json!({"id": name, "type": "organizations", "attributes": {"name": name}})
    }

    #[tokio::test]
    async fn test_fetch_projects_with_search() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/acme/projects"))
            .and(query_param("q", "net"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-1", "network", "acme")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let projects = client.fetch_projects("acme", Some("net")).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].organization(), "acme");
    }

    #[tokio::test]
    async fn test_fetch_projects_across_orgs_keeps_org_order() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [org_json("orgA"), org_json("orgB")]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations/orgA/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-1", "p1", "orgA")]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations/orgB/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-2", "p2", "orgB"), project_json("prj-3", "p3", "orgB")]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let projects = client.fetch_projects_across_orgs(None).await.unwrap();
        let names: Vec<&str> = projects.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_fetch_projects_across_orgs_aborts_on_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [org_json("orgA"), org_json("orgB")]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations/orgA/projects"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/organizations/orgB/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let err = client.fetch_projects_across_orgs(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.to_string().contains("projects for organization 'orgA'"));
    }

    #[tokio::test]
    async fn test_fetch_project_by_name_exact_match() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/acme/projects"))
            .and(query_param("q", "app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    project_json("prj-9", "app-legacy", "acme"),
                    project_json("prj-1", "app", "acme")
                ]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/prj-1"))
            .and(query_param("include", "effective_tag_bindings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": project_json("prj-1", "app", "acme"),
                "included": [{
                    "id": "etb-1",
                    "type": "effective-tag-bindings",
                    "attributes": {"key": "env", "value": "prod"}
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let project = client.fetch_project_by_name("acme", "app").await.unwrap();
        assert_eq!(project.id, "prj-1");
        assert_eq!(project.effective_tag_bindings.len(), 1);
        assert_eq!(project.effective_tag_bindings[0].key, "env");
    }

    #[tokio::test]
    async fn test_fetch_project_by_name_without_exact_match() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/acme/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [project_json("prj-9", "app-legacy", "acme")]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let err = client.fetch_project_by_name("acme", "app").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
