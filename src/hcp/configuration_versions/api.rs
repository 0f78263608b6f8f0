//! Configuration version API operations

use std::path::{Path, PathBuf};

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::traits::ApiDocument;
use crate::hcp::TfeClient;

use super::models::ConfigurationVersion;
use super::slug;

impl TfeClient {
    /// Newest configuration versions of a workspace, bounded by `max_items`
    pub async fn fetch_configuration_versions(
        &self,
        workspace_id: &str,
        max_items: usize,
    ) -> Result<Vec<ConfigurationVersion>> {
        let path = format!(
            "/{}/{}/{}",
            api::WORKSPACES,
            urlencoding::encode(workspace_id),
            api::CONFIGURATION_VERSIONS
        );
        let error_context = format!("configuration versions for workspace '{}'", workspace_id);
        self.fetch_pages_bounded::<ConfigurationVersion>(&path, max_items, &error_context)
            .await
    }

    pub async fn read_configuration_version(&self, cv_id: &str) -> Result<ConfigurationVersion> {
        let path = format!(
            "/{}/{}",
            api::CONFIGURATION_VERSIONS,
            urlencoding::encode(cv_id)
        );
        let label = format!("configuration version '{}'", cv_id);
        self.fetch_resource_by_path::<ConfigurationVersion>(&path, &label)
            .await?
            .map(|(cv, _)| cv)
            .ok_or_else(|| TfeError::NotFound(format!("{} not found", label)))
    }

    /// Create a configuration version and upload `directory` as its slug
    ///
    /// Runs are never queued automatically; the caller starts one explicitly.
    pub async fn create_configuration_version(
        &self,
        workspace_id: &str,
        directory: &Path,
        speculative: bool,
    ) -> Result<ConfigurationVersion> {
        let slug = slug::pack(directory)?;

        let path = format!(
            "/{}/{}/{}",
            api::WORKSPACES,
            urlencoding::encode(workspace_id),
            api::CONFIGURATION_VERSIONS
        );
        let body = serde_json::json!({
            "data": {
                "type": "configuration-versions",
                "attributes": {
                    "auto-queue-runs": false,
                    "speculative": speculative
                }
            }
        });
        let doc: ApiDocument<ConfigurationVersion> = self
            .send_json(Method::POST, &path, &body, "create configuration version")
            .await?;
        let cv = doc.data;

        let upload_url = cv.upload_url().ok_or_else(|| TfeError::Api {
            status: 201,
            message: format!("configuration version '{}' has no upload URL", cv.id),
        })?;
        debug!("Uploading {} byte slug for {}", slug.len(), cv.id);
        self.upload(upload_url, slug, "upload configuration")
            .await
            .with_context(|| format!("failed to upload configuration version '{}'", cv.id))?;

        Ok(cv)
    }

    /// Download a configuration version and unpack it
    ///
    /// Without a target directory a fresh temporary directory is created and
    /// kept. Returns the directory the files were written to.
    pub async fn download_configuration_version(
        &self,
        cv_id: &str,
        directory: Option<&Path>,
    ) -> Result<PathBuf> {
        let path = format!(
            "/{}/{}/download",
            api::CONFIGURATION_VERSIONS,
            urlencoding::encode(cv_id)
        );
        let bytes = self
            .download(&path, "download configuration version")
            .await?;
        if bytes.is_empty() {
            return Err(TfeError::NotFound(format!(
                "configuration version '{}' has no content",
                cv_id
            )));
        }

        let target = match directory {
            Some(dir) => dir.to_path_buf(),
            None => tempfile::Builder::new()
                .prefix(&format!("tfx-{}-", cv_id))
                .tempdir()?
                .keep(),
        };
        slug::unpack(&bytes, &target)?;
        debug!("Unpacked {} into {}", cv_id, target.display());
        Ok(target)
    }
}
