//! Workspace lock state changes, single and batch

use std::fmt;

use log::{debug, warn};

use crate::config::lock;
use crate::error::Result;
use crate::hcp::traits::TfeResource;
use crate::hcp::TfeClient;

use super::models::{Workspace, WorkspaceListOptions};

/// Result of a lock or unlock request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    Locked,
    Unlocked,
    AlreadyLocked,
    AlreadyUnlocked,
}

impl fmt::Display for LockOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LockOutcome::Locked => "Locked",
            LockOutcome::Unlocked => "Unlocked",
            LockOutcome::AlreadyLocked => "Workspace already locked",
            LockOutcome::AlreadyUnlocked => "Workspace already unlocked",
        };
        write!(f, "{}", s)
    }
}

/// Per-workspace entry of a batch lock/unlock
#[derive(Debug)]
pub struct BatchLockResult {
    pub workspace_id: String,
    pub workspace_name: String,
    pub result: Result<LockOutcome>,
}

impl TfeClient {
    /// Move one workspace into the wanted lock state
    ///
    /// Unlocking uses force-unlock so a lock held by another user or a run is
    /// released too.
    async fn apply_lock(&self, workspace: &Workspace, lock: bool) -> Result<LockOutcome> {
        match (lock, workspace.is_locked()) {
            (true, true) => Ok(LockOutcome::AlreadyLocked),
            (false, false) => Ok(LockOutcome::AlreadyUnlocked),
            (true, false) => {
                self.lock_workspace(&workspace.id, lock::MANUAL_REASON)
                    .await?;
                Ok(LockOutcome::Locked)
            }
            (false, true) => {
                self.force_unlock_workspace(&workspace.id).await?;
                Ok(LockOutcome::Unlocked)
            }
        }
    }

    /// Lock or unlock a workspace by name; a no-op when already in that state
    pub async fn set_workspace_lock(
        &self,
        org: &str,
        workspace_name: &str,
        lock: bool,
    ) -> Result<LockOutcome> {
        let workspace = self.read_workspace(org, workspace_name).await?;
        self.apply_lock(&workspace, lock).await
    }

    async fn set_lock_all(
        &self,
        org: &str,
        search: Option<&str>,
        lock: bool,
    ) -> Result<Vec<BatchLockResult>> {
        let options = WorkspaceListOptions {
            search: search.map(|s| s.to_string()),
            ..Default::default()
        };
        let workspaces = self.fetch_workspaces(org, &options).await?;
        debug!(
            "{} {} workspaces in {}",
            if lock { "Locking" } else { "Unlocking" },
            workspaces.len(),
            org
        );

        let mut results = Vec::with_capacity(workspaces.len());
        for ws in &workspaces {
            let result = self.apply_lock(ws, lock).await;
            if let Err(e) = &result {
                warn!("Workspace {} ({}): {}", ws.name(), ws.id, e);
            }
            results.push(BatchLockResult {
                workspace_id: ws.id.clone(),
                workspace_name: ws.name().to_string(),
                result,
            });
        }
        Ok(results)
    }

    /// Lock every workspace matching `search`, recording each outcome
    pub async fn lock_all(&self, org: &str, search: Option<&str>) -> Result<Vec<BatchLockResult>> {
        self.set_lock_all(org, search, true).await
    }

    /// Force-unlock every workspace matching `search`, recording each outcome
    pub async fn unlock_all(
        &self,
        org: &str,
        search: Option<&str>,
    ) -> Result<Vec<BatchLockResult>> {
        self.set_lock_all(org, search, false).await
    }
}
