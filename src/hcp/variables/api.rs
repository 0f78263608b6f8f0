//! Workspace variable API operations

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::traits::ApiDocument;
use crate::hcp::TfeClient;

use super::models::{Variable, VariableOptions};

fn vars_path(workspace_id: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::WORKSPACES,
        urlencoding::encode(workspace_id),
        api::VARS
    )
}

impl TfeClient {
    pub async fn fetch_variables(&self, workspace_id: &str) -> Result<Vec<Variable>> {
        let error_context = format!("variables for workspace '{}'", workspace_id);
        self.fetch_all_pages::<Variable>(&vars_path(workspace_id), &error_context)
            .await
    }

    /// Find a variable by exact key
    pub async fn fetch_variable(&self, workspace_id: &str, key: &str) -> Result<Variable> {
        self.fetch_variables(workspace_id)
            .await?
            .into_iter()
            .find(|v| v.key() == key)
            .ok_or_else(|| {
                TfeError::NotFound(format!(
                    "variable '{}' not found in workspace '{}'",
                    key, workspace_id
                ))
            })
    }

    pub async fn create_variable(
        &self,
        workspace_id: &str,
        options: &VariableOptions,
    ) -> Result<Variable> {
        debug!(
            "Creating {} variable {} in {}",
            options.category(),
            options.key,
            workspace_id
        );
        let doc: ApiDocument<Variable> = self
            .send_json(
                Method::POST,
                &vars_path(workspace_id),
                &options.request_body(),
                "create variable",
            )
            .await?;
        Ok(doc.data)
    }

    /// Update the variable whose key equals `options.key`
    pub async fn update_variable(
        &self,
        workspace_id: &str,
        options: &VariableOptions,
    ) -> Result<Variable> {
        let existing = self.fetch_variable(workspace_id, &options.key).await?;
        let path = format!(
            "{}/{}",
            vars_path(workspace_id),
            urlencoding::encode(&existing.id)
        );
        let mut body = options.request_body();
        body["data"]["id"] = serde_json::Value::from(existing.id.as_str());

        let doc: ApiDocument<Variable> = self
            .send_json(Method::PATCH, &path, &body, "update variable")
            .await?;
        Ok(doc.data)
    }

    pub async fn delete_variable(&self, workspace_id: &str, variable_id: &str) -> Result<()> {
        let path = format!(
            "{}/{}",
            vars_path(workspace_id),
            urlencoding::encode(variable_id)
        );
        self.send_no_content(Method::DELETE, &path, None, "delete variable")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn var_json(id: &str, key: &str, category: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "type": "vars",
            "attributes": {"key": key, "value": "v", "category": category}
        })
    }

    async fn mount_list(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/vars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    var_json("var-1", "region", "terraform"),
                    var_json("var-2", "TF_LOG", "env")
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_variable_exact_key() {
        let mock_server = MockServer::start().await;
        mount_list(&mock_server).await;

        let client = TfeClient::test_client(&mock_server.uri());
        let var = client.fetch_variable("ws-1", "TF_LOG").await.unwrap();
        assert_eq!(var.id, "var-2");

        let err = client.fetch_variable("ws-1", "tf_log").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_env_variable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workspaces/ws-1/vars"))
            .and(body_partial_json(serde_json::json!({
                "data": {"type": "vars", "attributes": {"key": "TF_LOG", "category": "env"}}
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"data": var_json("var-9", "TF_LOG", "env")})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let options = VariableOptions {
            key: "TF_LOG".to_string(),
            value: "DEBUG".to_string(),
            env: true,
            ..Default::default()
        };
        let var = client.create_variable("ws-1", &options).await.unwrap();
        assert_eq!(var.id, "var-9");
    }

    #[tokio::test]
    async fn test_create_duplicate_key_is_conflict() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/workspaces/ws-1/vars"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "errors": [{"status": "409", "detail": "Key has already been taken"}]
            })))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let options = VariableOptions {
            key: "region".to_string(),
            ..Default::default()
        };
        let err = client.create_variable("ws-1", &options).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_variable_resolves_id_by_key() {
        let mock_server = MockServer::start().await;
        mount_list(&mock_server).await;
        Mock::given(method("PATCH"))
            .and(path("/workspaces/ws-1/vars/var-1"))
            .and(body_partial_json(serde_json::json!({
                "data": {"id": "var-1", "attributes": {"value": "us-east-1"}}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(
                    serde_json::json!({"data": var_json("var-1", "region", "terraform")}),
                ),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let options = VariableOptions {
            key: "region".to_string(),
            value: "us-east-1".to_string(),
            ..Default::default()
        };
        client.update_variable("ws-1", &options).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_variable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/workspaces/ws-1/vars/var-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        client.delete_variable("ws-1", "var-1").await.unwrap();
    }
}
