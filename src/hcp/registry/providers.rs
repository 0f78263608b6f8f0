//! Private registry provider, version and platform API operations

use std::path::Path;

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::traits::ApiDocument;
use crate::hcp::TfeClient;

use super::models::{ProviderPlatform, ProviderVersion, RegistryProvider};
use super::validate;

/// Input for publishing a provider version
#[derive(Debug, Clone)]
pub struct ProviderVersionOptions<'a> {
    pub version: &'a str,
    /// GPG key the SHA256SUMS file is signed with
    pub key_id: &'a str,
    pub protocols: Vec<String>,
    pub shasums: &'a Path,
    pub shasums_sig: &'a Path,
}

/// Input for publishing one platform binary
#[derive(Debug, Clone)]
pub struct ProviderPlatformOptions<'a> {
    pub os: &'a str,
    pub arch: &'a str,
    pub binary: &'a Path,
    /// Computed from `binary` when absent
    pub shasum: Option<&'a str>,
}

fn providers_path(org: &str) -> String {
    format!(
        "/{}/{}/{}",
        api::ORGANIZATIONS,
        urlencoding::encode(org),
        api::REGISTRY_PROVIDERS
    )
}

/// `/organizations/:org/registry-providers/private/:org/:name`
fn provider_path(org: &str, name: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        providers_path(org),
        api::PRIVATE_REGISTRY,
        urlencoding::encode(org),
        urlencoding::encode(name)
    )
}

fn version_path(org: &str, name: &str, version: &semver::Version) -> String {
    format!("{}/versions/{}", provider_path(org, name), version)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| TfeError::Config(format!("failed to read {}: {}", path.display(), e)))
}

fn not_found(label: String, org: &str) -> TfeError {
    TfeError::NotFound(format!("{} not found in organization '{}'", label, org))
}

impl TfeClient {
    pub async fn fetch_registry_providers(&self, org: &str) -> Result<Vec<RegistryProvider>> {
        let error_context = format!("registry providers for organization '{}'", org);
        self.fetch_all_pages::<RegistryProvider>(&providers_path(org), &error_context)
            .await
    }

    pub async fn read_registry_provider(&self, org: &str, name: &str) -> Result<RegistryProvider> {
        let label = format!("provider '{}'", name);
        self.fetch_resource_by_path::<RegistryProvider>(&provider_path(org, name), &label)
            .await?
            .map(|(provider, _)| provider)
            .ok_or_else(|| not_found(label, org))
    }

    pub async fn create_registry_provider(
        &self,
        org: &str,
        name: &str,
    ) -> Result<RegistryProvider> {
        let body = serde_json::json!({
            "data": {
                "type": "registry-providers",
                "attributes": {
                    "name": name,
                    "namespace": org,
                    "registry-name": api::PRIVATE_REGISTRY
                }
            }
        });
        let doc: ApiDocument<RegistryProvider> = self
            .send_json(Method::POST, &providers_path(org), &body, "create provider")
            .await?;
        Ok(doc.data)
    }

    pub async fn delete_registry_provider(&self, org: &str, name: &str) -> Result<()> {
        self.send_no_content(
            Method::DELETE,
            &provider_path(org, name),
            None,
            "delete provider",
        )
        .await
    }

    pub async fn fetch_provider_versions(
        &self,
        org: &str,
        name: &str,
    ) -> Result<Vec<ProviderVersion>> {
        let path = format!("{}/versions", provider_path(org, name));
        let error_context = format!("versions of provider '{}'", name);
        self.fetch_all_pages::<ProviderVersion>(&path, &error_context)
            .await
    }

    pub async fn read_provider_version(
        &self,
        org: &str,
        name: &str,
        version: &str,
    ) -> Result<ProviderVersion> {
        let version = validate::version(version)?;
        let label = format!("provider '{}' version {}", name, version);
        self.fetch_resource_by_path::<ProviderVersion>(&version_path(org, name, &version), &label)
            .await?
            .map(|(v, _)| v)
            .ok_or_else(|| not_found(label, org))
    }

    /// Create a provider version, then upload its SHA256SUMS and signature
    pub async fn create_provider_version(
        &self,
        org: &str,
        name: &str,
        options: &ProviderVersionOptions<'_>,
    ) -> Result<ProviderVersion> {
        let version = validate::version(options.version)?;
        let shasums = read_file(options.shasums)?;
        let shasums_sig = read_file(options.shasums_sig)?;

        let path = format!("{}/versions", provider_path(org, name));
        let body = serde_json::json!({
            "data": {
                "type": "registry-provider-versions",
                "attributes": {
                    "version": version.to_string(),
                    "key-id": options.key_id,
                    "protocols": options.protocols
                }
            }
        });
        let doc: ApiDocument<ProviderVersion> = self
            .send_json(Method::POST, &path, &body, "create provider version")
            .await?;
        let created = doc.data;

        let missing_link = |link: &str| TfeError::Api {
            status: 201,
            message: format!("provider version {} has no {} link", version, link),
        };
        let sums_url = created
            .links
            .shasums_upload
            .as_deref()
            .ok_or_else(|| missing_link("shasums-upload"))?;
        let sig_url = created
            .links
            .shasums_sig_upload
            .as_deref()
            .ok_or_else(|| missing_link("shasums-sig-upload"))?;

        debug!("Uploading SHA256SUMS for {} {}", name, version);
        self.upload(sums_url, shasums, "upload SHA256SUMS")
            .await
            .context("failed to upload SHA256SUMS")?;
        self.upload(sig_url, shasums_sig, "upload SHA256SUMS.sig")
            .await
            .context("failed to upload SHA256SUMS.sig")?;

        Ok(created)
    }

    pub async fn delete_provider_version(&self, org: &str, name: &str, version: &str) -> Result<()> {
        let version = validate::version(version)?;
        self.send_no_content(
            Method::DELETE,
            &version_path(org, name, &version),
            None,
            "delete provider version",
        )
        .await
    }

    pub async fn fetch_provider_platforms(
        &self,
        org: &str,
        name: &str,
        version: &str,
    ) -> Result<Vec<ProviderPlatform>> {
        let version = validate::version(version)?;
        let path = format!("{}/platforms", version_path(org, name, &version));
        let error_context = format!("platforms of provider '{}' {}", name, version);
        self.fetch_all_pages::<ProviderPlatform>(&path, &error_context)
            .await
    }

    pub async fn read_provider_platform(
        &self,
        org: &str,
        name: &str,
        version: &str,
        os: &str,
        arch: &str,
    ) -> Result<ProviderPlatform> {
        let version = validate::version(version)?;
        let path = format!(
            "{}/platforms/{}/{}",
            version_path(org, name, &version),
            urlencoding::encode(os),
            urlencoding::encode(arch)
        );
        let label = format!("provider '{}' {} platform {}_{}", name, version, os, arch);
        self.fetch_resource_by_path::<ProviderPlatform>(&path, &label)
            .await?
            .map(|(p, _)| p)
            .ok_or_else(|| not_found(label, org))
    }

    /// Create a platform and upload its binary
    ///
    /// A given shasum must be 64 hex characters; otherwise it is computed
    /// from the binary.
    pub async fn create_provider_platform(
        &self,
        org: &str,
        name: &str,
        version: &str,
        options: &ProviderPlatformOptions<'_>,
    ) -> Result<ProviderPlatform> {
        let version = validate::version(version)?;
        let shasum = match options.shasum {
            Some(sum) => validate::shasum(sum)?,
            None => validate::sha256_file(options.binary)?,
        };
        let filename = options
            .binary
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .ok_or_else(|| {
                TfeError::Config(format!("{} is not a file", options.binary.display()))
            })?;
        let binary = read_file(options.binary)?;

        let path = format!("{}/platforms", version_path(org, name, &version));
        let body = serde_json::json!({
            "data": {
                "type": "registry-provider-platforms",
                "attributes": {
                    "os": options.os,
                    "arch": options.arch,
                    "shasum": shasum,
                    "filename": filename
                }
            }
        });
        let doc: ApiDocument<ProviderPlatform> = self
            .send_json(Method::POST, &path, &body, "create provider platform")
            .await?;
        let platform = doc.data;

        let upload_url = platform
            .links
            .provider_binary_upload
            .as_deref()
            .ok_or_else(|| TfeError::Api {
                status: 201,
                message: format!("platform {} has no provider-binary-upload link", platform.id),
            })?;
        self.upload(upload_url, binary, "upload provider binary")
            .await
            .with_context(|| format!("failed to upload {}", filename))?;

        Ok(platform)
    }

    pub async fn delete_provider_platform(
        &self,
        org: &str,
        name: &str,
        version: &str,
        os: &str,
        arch: &str,
    ) -> Result<()> {
        let version = validate::version(version)?;
        let path = format!(
            "{}/platforms/{}/{}",
            version_path(org, name, &version),
            urlencoding::encode(os),
            urlencoding::encode(arch)
        );
        self.send_no_content(Method::DELETE, &path, None, "delete provider platform")
            .await
    }
}
