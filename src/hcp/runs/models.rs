//! Run data models

use serde::{Deserialize, Deserializer};

use crate::error::TfeError;
use crate::hcp::traits::Relationship;

/// Lifecycle states of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Pending,
    Fetching,
    Queuing,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    PlannedAndFinished,
    PlannedAndSaved,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Errored,
    Canceled,
    ForceCanceled,
    /// Status string this client does not know
    Unknown,
}

const STATUS_NAMES: &[(RunStatus, &str)] = &[
    (RunStatus::Pending, "pending"),
    (RunStatus::Fetching, "fetching"),
    (RunStatus::Queuing, "queuing"),
    (RunStatus::PlanQueued, "plan_queued"),
    (RunStatus::Planning, "planning"),
    (RunStatus::Planned, "planned"),
    (RunStatus::CostEstimating, "cost_estimating"),
    (RunStatus::CostEstimated, "cost_estimated"),
    (RunStatus::PolicyChecking, "policy_checking"),
    (RunStatus::PolicyOverride, "policy_override"),
    (RunStatus::PolicySoftFailed, "policy_soft_failed"),
    (RunStatus::PolicyChecked, "policy_checked"),
    (RunStatus::Confirmed, "confirmed"),
    (RunStatus::PlannedAndFinished, "planned_and_finished"),
    (RunStatus::PlannedAndSaved, "planned_and_saved"),
    (RunStatus::ApplyQueued, "apply_queued"),
    (RunStatus::Applying, "applying"),
    (RunStatus::Applied, "applied"),
    (RunStatus::Discarded, "discarded"),
    (RunStatus::Errored, "errored"),
    (RunStatus::Canceled, "canceled"),
    (RunStatus::ForceCanceled, "force_canceled"),
];

/// Coarse grouping used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Failure,
    InProgress,
    Neutral,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        STATUS_NAMES
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }

    /// Every known status name, for help text
    pub fn names() -> impl Iterator<Item = &'static str> {
        STATUS_NAMES.iter().map(|(_, name)| *name)
    }

    /// Final statuses never change again
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            RunStatus::Applied
                | RunStatus::Discarded
                | RunStatus::Errored
                | RunStatus::Canceled
                | RunStatus::ForceCanceled
                | RunStatus::PlannedAndFinished
                | RunStatus::PlannedAndSaved
        )
    }

    pub fn class(&self) -> StatusClass {
        match self {
            RunStatus::Applied | RunStatus::PlannedAndFinished | RunStatus::PlannedAndSaved => {
                StatusClass::Success
            }
            RunStatus::Errored | RunStatus::PolicySoftFailed | RunStatus::ForceCanceled => {
                StatusClass::Failure
            }
            RunStatus::Discarded | RunStatus::Canceled | RunStatus::Unknown => {
                StatusClass::Neutral
            }
            _ => StatusClass::InProgress,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunStatus {
    type Err = TfeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        STATUS_NAMES
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(status, _)| *status)
            .ok_or_else(|| TfeError::Validation(format!("unknown run status '{}'", s)))
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(RunStatus::Unknown))
    }
}

/// Run data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Run {
    pub id: String,
    pub attributes: RunAttributes,
    #[serde(default)]
    pub relationships: Option<RunRelationships>,
}

/// Run attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunAttributes {
    pub status: RunStatus,
    pub message: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,
    #[serde(rename = "plan-only")]
    pub plan_only: Option<bool>,
    #[serde(rename = "is-destroy")]
    pub is_destroy: Option<bool>,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunRelationships {
    #[serde(default)]
    pub workspace: Option<Relationship>,
    #[serde(rename = "configuration-version", default)]
    pub configuration_version: Option<Relationship>,
}

impl Run {
    pub fn status(&self) -> RunStatus {
        self.attributes.status
    }

    pub fn message(&self) -> &str {
        self.attributes.message.as_deref().unwrap_or("")
    }

    pub fn source(&self) -> &str {
        self.attributes.source.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn terraform_version(&self) -> &str {
        self.attributes.terraform_version.as_deref().unwrap_or("")
    }

    pub fn plan_only(&self) -> bool {
        self.attributes.plan_only.unwrap_or(false)
    }

    pub fn is_destroy(&self) -> bool {
        self.attributes.is_destroy.unwrap_or(false)
    }

    pub fn has_changes(&self) -> bool {
        self.attributes.has_changes.unwrap_or(false)
    }

    pub fn workspace_id(&self) -> &str {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(|w| w.id())
            .unwrap_or("")
    }

    pub fn configuration_version_id(&self) -> &str {
        self.relationships
            .as_ref()
            .and_then(|r| r.configuration_version.as_ref())
            .and_then(|c| c.id())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_names() {
        for name in RunStatus::names() {
            let status: RunStatus = name.parse().unwrap();
            assert_eq!(status.as_str(), name);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(" Applied ".parse::<RunStatus>().unwrap(), RunStatus::Applied);
        assert!("bogus".parse::<RunStatus>().is_err());
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: RunStatus = serde_json::from_value(serde_json::json!("new_state")).unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert_eq!(status.to_string(), "unknown");
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(RunStatus::Applied.class(), StatusClass::Success);
        assert_eq!(RunStatus::Errored.class(), StatusClass::Failure);
        assert_eq!(RunStatus::Planning.class(), StatusClass::InProgress);
        assert!(RunStatus::Discarded.is_final());
        assert!(!RunStatus::ApplyQueued.is_final());
    }

    #[test]
    fn test_run_from_json() {
        let run: Run = serde_json::from_value(serde_json::json!({
            "id": "run-1",
            "type": "runs",
            "attributes": {
                "status": "planned_and_finished",
                "message": "Triggered via tfx",
                "created-at": "2025-01-01T00:00:00Z",
                "plan-only": true
            },
            "relationships": {
                "workspace": {"data": {"id": "ws-1", "type": "workspaces"}},
                "configuration-version": {"data": {"id": "cv-1", "type": "configuration-versions"}}
            }
        }))
        .unwrap();
        assert_eq!(run.status(), RunStatus::PlannedAndFinished);
        assert_eq!(run.workspace_id(), "ws-1");
        assert_eq!(run.configuration_version_id(), "cv-1");
        assert!(run.plan_only());
        assert!(!run.is_destroy());
    }
}
