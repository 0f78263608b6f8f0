//! Workspace variable data models

use serde::{Deserialize, Serialize};

/// Variable data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Variable {
    pub id: String,
    #[serde(default)]
    pub attributes: VariableAttributes,
}

/// Variable attributes from TFE API
///
/// `value` is null for sensitive variables.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct VariableAttributes {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "version-id")]
    pub version_id: Option<String>,
}

impl Variable {
    pub fn key(&self) -> &str {
        &self.attributes.key
    }

    pub fn value(&self) -> &str {
        self.attributes.value.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.attributes.description.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> &str {
        self.attributes.category.as_deref().unwrap_or("terraform")
    }

    pub fn is_hcl(&self) -> bool {
        self.attributes.hcl
    }

    pub fn is_sensitive(&self) -> bool {
        self.attributes.sensitive
    }
}

/// Input for creating or updating a workspace variable
#[derive(Debug, Clone, Default)]
pub struct VariableOptions {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    /// Environment variable instead of a Terraform input variable
    pub env: bool,
    pub hcl: bool,
    pub sensitive: bool,
}

/// Attribute set sent in create/update bodies
#[derive(Serialize, Debug, PartialEq, Eq)]
pub(crate) struct VariablePayload<'a> {
    pub key: &'a str,
    pub value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub category: &'static str,
    pub hcl: bool,
    pub sensitive: bool,
}

impl VariableOptions {
    pub fn category(&self) -> &'static str {
        if self.env {
            "env"
        } else {
            "terraform"
        }
    }

    pub(crate) fn payload(&self) -> VariablePayload<'_> {
        VariablePayload {
            key: &self.key,
            value: &self.value,
            description: self.description.as_deref(),
            category: self.category(),
            hcl: self.hcl,
            sensitive: self.sensitive,
        }
    }

    /// JSON:API body for variable create/update
    pub fn request_body(&self) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "type": "vars",
                "attributes": self.payload()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_env_flag() {
        let mut opts = VariableOptions {
            key: "AWS_REGION".to_string(),
            value: "eu-west-1".to_string(),
            env: true,
            ..Default::default()
        };
        assert_eq!(opts.category(), "env");
        opts.env = false;
        assert_eq!(opts.category(), "terraform");
    }

    #[test]
    fn test_request_body() {
        let opts = VariableOptions {
            key: "tags".to_string(),
            value: "{ team = \"core\" }".to_string(),
            hcl: true,
            sensitive: true,
            ..Default::default()
        };
        let body = opts.request_body();
        let attrs = &body["data"]["attributes"];
        assert_eq!(body["data"]["type"], "vars");
        assert_eq!(attrs["category"], "terraform");
        assert_eq!(attrs["hcl"], true);
        assert_eq!(attrs["sensitive"], true);
        assert!(attrs.get("description").is_none());
    }

    #[test]
    fn test_sensitive_value_is_null() {
        let var: Variable = serde_json::from_value(serde_json::json!({
            "id": "var-1",
            "type": "vars",
            "attributes": {"key": "secret", "value": null, "category": "env", "sensitive": true}
        }))
        .unwrap();
        assert_eq!(var.value(), "");
        assert_eq!(var.category(), "env");
        assert!(var.is_sensitive());
        assert!(!var.is_hcl());
    }
}
