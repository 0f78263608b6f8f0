//! Team and team access data models

use serde::Deserialize;

use crate::hcp::traits::{Relationship, TfeResource};

/// Team as far as access listings need it: id and display name
#[derive(Deserialize, Debug, Clone)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub attributes: TeamAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamAttributes {
    #[serde(default)]
    pub name: String,
}

impl TfeResource for Team {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Team access grant on a workspace (`team-workspaces` resource)
#[derive(Deserialize, Debug, Clone)]
pub struct TeamAccess {
    pub id: String,
    #[serde(default)]
    pub attributes: TeamAccessAttributes,
    pub relationships: Option<TeamAccessRelationships>,
}

/// Access level plus the fine-grained capabilities of a `custom` grant
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamAccessAttributes {
    pub access: Option<String>,
    pub runs: Option<String>,
    pub variables: Option<String>,
    #[serde(rename = "state-versions")]
    pub state_versions: Option<String>,
    #[serde(rename = "sentinel-mocks")]
    pub sentinel_mocks: Option<String>,
    #[serde(rename = "workspace-locking")]
    pub workspace_locking: Option<bool>,
    #[serde(rename = "run-tasks")]
    pub run_tasks: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamAccessRelationships {
    #[serde(default)]
    pub team: Relationship,
    #[serde(default)]
    pub workspace: Relationship,
}

impl TeamAccess {
    pub fn access(&self) -> &str {
        self.attributes.access.as_deref().unwrap_or("")
    }

    pub fn team_id(&self) -> Option<&str> {
        self.relationships.as_ref().and_then(|r| r.team.id())
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships.as_ref().and_then(|r| r.workspace.id())
    }

    pub fn can_lock(&self) -> bool {
        self.attributes.workspace_locking.unwrap_or(false)
    }
}

/// Team access entry with the team's display name resolved
#[derive(Debug, Clone)]
pub struct NamedTeamAccess {
    pub team_name: String,
    pub access: TeamAccess,
}
