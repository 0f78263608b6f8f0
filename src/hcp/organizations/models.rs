//! Organization data models

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Organization data from TFE API
///
/// The JSON:API `id` of an organization is its name.
#[derive(Deserialize, Debug, Clone)]
pub struct Organization {
    pub id: String,
    pub attributes: Option<OrganizationAttributes>,
}

/// Organization attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrganizationAttributes {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "external-id")]
    pub external_id: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "collaborator-auth-policy")]
    pub collaborator_auth_policy: Option<String>,
    #[serde(rename = "cost-estimation-enabled")]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(rename = "two-factor-conformant")]
    pub two_factor_conformant: Option<bool>,
    #[serde(rename = "saml-enabled")]
    pub saml_enabled: Option<bool>,
    #[serde(rename = "session-timeout")]
    pub session_timeout: Option<u32>,
    #[serde(rename = "session-remember")]
    pub session_remember: Option<u32>,
    #[serde(rename = "default-execution-mode")]
    pub default_execution_mode: Option<String>,
    /// Capability flags of the calling token (`can-update`, `can-destroy`, ...)
    #[serde(default)]
    pub permissions: Option<BTreeMap<String, bool>>,
}

impl Organization {
    fn attr(&self) -> Option<&OrganizationAttributes> {
        self.attributes.as_ref()
    }

    pub fn email(&self) -> &str {
        self.attr().and_then(|a| a.email.as_deref()).unwrap_or("")
    }

    pub fn external_id(&self) -> &str {
        self.attr()
            .and_then(|a| a.external_id.as_deref())
            .unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attr()
            .and_then(|a| a.created_at.as_deref())
            .unwrap_or("")
    }

    pub fn collaborator_auth_policy(&self) -> &str {
        self.attr()
            .and_then(|a| a.collaborator_auth_policy.as_deref())
            .unwrap_or("")
    }

    pub fn cost_estimation_enabled(&self) -> bool {
        self.attr()
            .and_then(|a| a.cost_estimation_enabled)
            .unwrap_or(false)
    }

    pub fn two_factor_conformant(&self) -> bool {
        self.attr()
            .and_then(|a| a.two_factor_conformant)
            .unwrap_or(false)
    }

    pub fn saml_enabled(&self) -> bool {
        self.attr().and_then(|a| a.saml_enabled).unwrap_or(false)
    }

    /// Session timeout in minutes (0 when unset)
    pub fn session_timeout(&self) -> u32 {
        self.attr().and_then(|a| a.session_timeout).unwrap_or(0)
    }

    /// Session expiration in minutes (0 when unset)
    pub fn session_remember(&self) -> u32 {
        self.attr().and_then(|a| a.session_remember).unwrap_or(0)
    }

    pub fn default_execution_mode(&self) -> &str {
        self.attr()
            .and_then(|a| a.default_execution_mode.as_deref())
            .unwrap_or("remote")
    }

    /// Permissions in key order; empty when the API sent none
    pub fn permissions(&self) -> Vec<(String, bool)> {
        self.attr()
            .and_then(|a| a.permissions.as_ref())
            .map(|p| p.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default()
    }
}

impl TfeResource for Organization {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    /// Organizations can also be addressed by their `external-id`
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.external_id() == input
    }
}
