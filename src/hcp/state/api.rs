//! State version API operations

use std::path::Path;

use log::{debug, warn};
use reqwest::Method;

use crate::config::{api, lock};
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::traits::ApiDocument;
use crate::hcp::TfeClient;

use super::models::{StateFile, StateVersion};

impl TfeClient {
    /// Newest state versions of a workspace, bounded by `max_items`
    pub async fn fetch_state_versions(
        &self,
        org: &str,
        workspace_name: &str,
        max_items: usize,
    ) -> Result<Vec<StateVersion>> {
        let path = format!(
            "/{}?filter[workspace][name]={}&filter[organization][name]={}",
            api::STATE_VERSIONS,
            urlencoding::encode(workspace_name),
            urlencoding::encode(org)
        );
        let error_context = format!("state versions for workspace '{}'", workspace_name);
        self.fetch_pages_bounded::<StateVersion>(&path, max_items, &error_context)
            .await
    }

    pub async fn read_state_version(&self, state_version_id: &str) -> Result<StateVersion> {
        let path = format!(
            "/{}/{}",
            api::STATE_VERSIONS,
            urlencoding::encode(state_version_id)
        );
        let label = format!("state version '{}'", state_version_id);
        self.fetch_resource_by_path::<StateVersion>(&path, &label)
            .await?
            .map(|(sv, _)| sv)
            .ok_or_else(|| TfeError::NotFound(format!("{} not found", label)))
    }

    /// Current state version of a workspace; `None` if it never had state
    pub async fn read_current_state_version(
        &self,
        workspace_id: &str,
    ) -> Result<Option<StateVersion>> {
        let path = format!(
            "/{}/{}/current-state-version",
            api::WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        let label = format!("current state version of workspace '{}'", workspace_id);
        Ok(self
            .fetch_resource_by_path::<StateVersion>(&path, &label)
            .await?
            .map(|(sv, _)| sv))
    }

    /// Raw state file of a state version
    pub async fn download_state_version(&self, state_version: &StateVersion) -> Result<Vec<u8>> {
        let url = state_version.download_url().ok_or_else(|| {
            TfeError::NotFound(format!(
                "state version '{}' has no download URL",
                state_version.id
            ))
        })?;
        debug!("Downloading state version {}", state_version.id);
        self.download(url, "download state version").await
    }

    /// Upload a local state file as the workspace's new current state
    ///
    /// The serial is bumped past the current one (0 for a fresh workspace)
    /// and the workspace is locked for the upload. It is always unlocked
    /// afterwards: if the upload fails, an unlock error takes precedence over
    /// the upload error; if the upload succeeds, an unlock error is only
    /// logged since the state is already stored.
    pub async fn create_state_version(
        &self,
        org: &str,
        workspace_name: &str,
        state_path: &Path,
    ) -> Result<StateVersion> {
        let content = std::fs::read(state_path).map_err(|e| {
            TfeError::Config(format!(
                "failed to read state file {}: {}",
                state_path.display(),
                e
            ))
        })?;
        let state = StateFile::parse(&content)?;

        let workspace = self.read_workspace(org, workspace_name).await?;

        let serial = match self.read_current_state_version(&workspace.id).await? {
            Some(current) => current.serial() + 1,
            None => 0,
        };
        debug!(
            "Creating state version for {} (file serial {}, new serial {})",
            workspace.id, state.header.serial, serial
        );
        let encoded = state.with_serial(serial)?;

        self.lock_workspace(&workspace.id, lock::STATE_CREATE_REASON)
            .await
            .with_context(|| format!("failed to lock workspace '{}'", workspace_name))?;

        let path = format!(
            "/{}/{}/{}",
            api::WORKSPACES,
            urlencoding::encode(&workspace.id),
            api::STATE_VERSIONS
        );
        let created: Result<ApiDocument<StateVersion>> = self
            .send_json(
                Method::POST,
                &path,
                &encoded.request_body(),
                "create state version",
            )
            .await;

        let unlocked = self.release_workspace_lock(&workspace.id).await;

        match (created, unlocked) {
            (Ok(doc), Ok(_)) => Ok(doc.data),
            (Ok(doc), Err(e)) => {
                warn!(
                    "State version {} created but workspace '{}' could not be unlocked: {}",
                    doc.data.id, workspace_name, e
                );
                Ok(doc.data)
            }
            (Err(e), Ok(_)) => {
                Err(e.context(format!("failed to create state version for '{}'", workspace_name)))
            }
            (Err(create_err), Err(unlock_err)) => {
                debug!("State version creation failed: {}", create_err);
                Err(unlock_err.context(format!(
                    "failed to unlock workspace '{}' after state version creation failed ({})",
                    workspace_name, create_err
                )))
            }
        }
    }
}
