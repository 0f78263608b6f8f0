//! Project data models

use serde::Deserialize;

use crate::hcp::traits::{Relationship, TfeResource};

/// Project data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    pub id: String,
    pub attributes: ProjectAttributes,
    #[serde(default)]
    pub relationships: Option<ProjectRelationships>,
    /// Hydrated from `included` when requested with `include=effective_tag_bindings`
    #[serde(skip)]
    pub effective_tag_bindings: Vec<TagBinding>,
}

/// Project attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProjectAttributes {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "default-execution-mode")]
    pub default_execution_mode: Option<String>,
    #[serde(rename = "auto-destroy-activity-duration")]
    pub auto_destroy_activity_duration: Option<String>,
    #[serde(rename = "workspace-count")]
    pub workspace_count: Option<u32>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProjectRelationships {
    #[serde(default)]
    pub organization: Option<Relationship>,
}

/// Key/value tag effective on a project (own or inherited)
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagBinding {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl TfeResource for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Project {
    pub fn description(&self) -> &str {
        self.attributes.description.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn default_execution_mode(&self) -> &str {
        self.attributes
            .default_execution_mode
            .as_deref()
            .unwrap_or("")
    }

    pub fn auto_destroy_activity_duration(&self) -> Option<&str> {
        self.attributes.auto_destroy_activity_duration.as_deref()
    }

    /// Name of the owning organization
    pub fn organization(&self) -> &str {
        self.relationships
            .as_ref()
            .and_then(|r| r.organization.as_ref())
            .and_then(|o| o.id())
            .unwrap_or("")
    }

    /// Fill `effective_tag_bindings` from a document's `included` section
    pub(crate) fn hydrate_tag_bindings(&mut self, included: &[serde_json::Value]) {
        self.effective_tag_bindings =
            crate::hcp::traits::included_of_type(included, "effective-tag-bindings")
                .filter_map(|item| serde_json::from_value(item["attributes"].clone()).ok())
                .collect();
    }
}
