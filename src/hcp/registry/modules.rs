//! Private registry module API operations

use std::path::Path;

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::configuration_versions::slug;
use crate::hcp::traits::ApiDocument;
use crate::hcp::TfeClient;

use super::models::{ModuleVersion, RegistryModule};
use super::validate;

/// What a module delete removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleDeleteTarget {
    /// The module with every provider and version
    Module,
    /// Every version of one provider
    Provider(String),
    /// A single version of one provider
    Version { provider: String, version: String },
}

fn modules_path(org: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::ORGANIZATIONS,
        urlencoding::encode(org),
        api::REGISTRY_MODULES
    )
}

/// `/organizations/:org/registry-modules/private/:org/:name`
fn module_path(org: &str, name: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        modules_path(org),
        api::PRIVATE_REGISTRY,
        urlencoding::encode(org),
        urlencoding::encode(name)
    )
}

impl TfeClient {
    pub async fn fetch_registry_modules(&self, org: &str) -> Result<Vec<RegistryModule>> {
        let error_context = format!("registry modules for organization '{}'", org);
        self.fetch_all_pages::<RegistryModule>(&modules_path(org), &error_context)
            .await
    }

    pub async fn read_registry_module(
        &self,
        org: &str,
        name: &str,
        provider: &str,
    ) -> Result<RegistryModule> {
        let path = format!(
            "{}/{}",
            module_path(org, name),
            urlencoding::encode(provider)
        );
        let label = format!("module '{}/{}'", name, provider);
        self.fetch_resource_by_path::<RegistryModule>(&path, &label)
            .await?
            .map(|(module, _)| module)
            .ok_or_else(|| {
                TfeError::NotFound(format!("{} not found in organization '{}'", label, org))
            })
    }

    /// Publish a module version from a local directory
    ///
    /// The module is created first when it does not exist yet. The version is
    /// validated locally before anything is sent.
    pub async fn create_registry_module_version(
        &self,
        org: &str,
        name: &str,
        provider: &str,
        version: &str,
        directory: &Path,
    ) -> Result<ModuleVersion> {
        let version = validate::version(version)?;
        let slug = slug::pack(directory)?;

        match self.read_registry_module(org, name, provider).await {
            Ok(module) => debug!("Module {} exists ({})", module.id, module.status()),
            Err(e) if e.kind() == crate::error::ErrorKind::NotFound => {
                self.create_registry_module(org, name, provider).await?;
            }
            Err(e) => return Err(e),
        }

        let path = format!(
            "{}/{}/versions",
            module_path(org, name),
            urlencoding::encode(provider)
        );
        let body = serde_json::json!({
            "data": {
                "type": "registry-module-versions",
                "attributes": {"version": version.to_string()}
            }
        });
        let doc: ApiDocument<ModuleVersion> = self
            .send_json(Method::POST, &path, &body, "create module version")
            .await?;
        let module_version = doc.data;

        let upload_url = module_version.links.upload.as_deref().ok_or_else(|| {
            TfeError::Api {
                status: 201,
                message: format!("module version {} has no upload link", version),
            }
        })?;
        self.upload(upload_url, slug, "upload module")
            .await
            .with_context(|| format!("failed to upload module {}/{} {}", name, provider, version))?;

        Ok(module_version)
    }

    async fn create_registry_module(
        &self,
        org: &str,
        name: &str,
        provider: &str,
    ) -> Result<RegistryModule> {
        debug!("Creating module {}/{} in {}", name, provider, org);
        let body = serde_json::json!({
            "data": {
                "type": "registry-modules",
                "attributes": {
                    "name": name,
                    "provider": provider,
                    "registry-name": api::PRIVATE_REGISTRY
                }
            }
        });
        let doc: ApiDocument<RegistryModule> = self
            .send_json(Method::POST, &modules_path(org), &body, "create module")
            .await?;
        Ok(doc.data)
    }

    pub async fn delete_registry_module(
        &self,
        org: &str,
        name: &str,
        target: &ModuleDeleteTarget,
    ) -> Result<()> {
        let path = match target {
            ModuleDeleteTarget::Module => module_path(org, name),
            ModuleDeleteTarget::Provider(provider) => format!(
                "{}/{}",
                module_path(org, name),
                urlencoding::encode(provider)
            ),
            ModuleDeleteTarget::Version { provider, version } => {
                let version = validate::version(version)?;
                format!(
                    "{}/{}/{}",
                    module_path(org, name),
                    urlencoding::encode(provider),
                    version
                )
            }
        };
        self.send_no_content(Method::DELETE, &path, None, "delete module")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODULE_PATH: &str = "/organizations/acme/registry-modules/private/acme/vpc/aws";

    fn module_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.tf"), "variable \"cidr\" {}").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_invalid_version_sends_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dir = module_dir();
        let client = TfeClient::test_client(&mock_server.uri());
        let err = client
            .create_registry_module_version("acme", "vpc", "aws", "1.0", dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_version_creates_missing_module() {
        let mock_server = MockServer::start().await;
        let upload_url = format!("{}/upload/mod", mock_server.uri());
        Mock::given(method("GET"))
            .and(path(MODULE_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/organizations/acme/registry-modules"))
            .and(body_partial_json(serde_json::json!({
                "data": {"attributes": {"name": "vpc", "provider": "aws", "registry-name": "private"}}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {"id": "mod-1", "type": "registry-modules", "attributes": {"name": "vpc"}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{}/versions", MODULE_PATH)))
            .and(body_partial_json(serde_json::json!({
                "data": {"attributes": {"version": "1.2.0"}}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {
                    "id": "modver-1",
                    "type": "registry-module-versions",
                    "attributes": {"version": "1.2.0", "status": "pending"},
                    "links": {"upload": upload_url}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/upload/mod"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = module_dir();
        let client = TfeClient::test_client(&mock_server.uri());
        let version = client
            .create_registry_module_version("acme", "vpc", "aws", "1.2.0", dir.path())
            .await
            .unwrap();
        assert_eq!(version.attributes.version, "1.2.0");
    }

    #[tokio::test]
    async fn test_delete_targets() {
        let mock_server = MockServer::start().await;
        for p in [
            "/organizations/acme/registry-modules/private/acme/vpc",
            "/organizations/acme/registry-modules/private/acme/vpc/aws",
            "/organizations/acme/registry-modules/private/acme/vpc/aws/1.0.0",
        ] {
            Mock::given(method("DELETE"))
                .and(path(p))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = TfeClient::test_client(&mock_server.uri());
        client
            .delete_registry_module("acme", "vpc", &ModuleDeleteTarget::Module)
            .await
            .unwrap();
        client
            .delete_registry_module("acme", "vpc", &ModuleDeleteTarget::Provider("aws".into()))
            .await
            .unwrap();
        client
            .delete_registry_module(
                "acme",
                "vpc",
                &ModuleDeleteTarget::Version {
                    provider: "aws".into(),
                    version: "1.0.0".into(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_read_module_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MODULE_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = TfeClient::test_client(&mock_server.uri());
        let err = client
            .read_registry_module("acme", "vpc", "aws")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("module 'vpc/aws'"));
    }
}
