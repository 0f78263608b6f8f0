//! Configuration version data models

use serde::Deserialize;

/// Configuration version data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigurationVersion {
    pub id: String,
    pub attributes: ConfigurationVersionAttributes,
    pub links: Option<ConfigurationVersionLinks>,
}

/// Configuration version attributes
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigurationVersionAttributes {
    /// Origin of the configuration: tfe-api, github, gitlab, ...
    pub source: Option<String>,
    /// pending, fetching, uploaded, archived, errored
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub speculative: bool,
    #[serde(rename = "auto-queue-runs", default)]
    pub auto_queue_runs: bool,
    #[serde(rename = "error-message")]
    pub error_message: Option<String>,
    /// One-time URL the slug is PUT to, present right after creation
    #[serde(rename = "upload-url")]
    pub upload_url: Option<String>,
    #[serde(rename = "status-timestamps", default)]
    pub status_timestamps: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ConfigurationVersionLinks {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub download: Option<String>,
}

impl ConfigurationVersion {
    pub fn status(&self) -> &str {
        &self.attributes.status
    }

    pub fn source(&self) -> &str {
        self.attributes.source.as_deref().unwrap_or("")
    }

    pub fn is_speculative(&self) -> bool {
        self.attributes.speculative
    }

    pub fn upload_url(&self) -> Option<&str> {
        self.attributes.upload_url.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.attributes.error_message.as_deref()
    }

    /// Only uploaded or archived configurations have content behind them
    pub fn is_downloadable(&self) -> bool {
        matches!(self.status(), "uploaded" | "archived")
    }

    /// Status timestamps (`queued-at`, `uploaded-at`, ...) in server order
    pub fn status_timestamps(&self) -> Vec<(String, String)> {
        self.attributes
            .status_timestamps
            .iter()
            .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_created_configuration_version() {
        let cv: ConfigurationVersion = serde_json::from_value(serde_json::json!({
            "id": "cv-ntv3HbhJqvFzamy7",
            "type": "configuration-versions",
            "attributes": {
                "error": null,
                "error-message": null,
                "source": "tfe-api",
                "speculative": true,
                "status": "pending",
                "status-timestamps": {"queued-at": "2025-01-01T00:00:00Z"},
                "upload-url": "https://archivist.test/v1/object/dmF1bHQ6djE6"
            },
            "links": {"self": "/api/v2/configuration-versions/cv-ntv3HbhJqvFzamy7"}
        }))
        .unwrap();
        assert_eq!(cv.status(), "pending");
        assert!(cv.is_speculative());
        assert!(!cv.is_downloadable());
        assert!(cv.upload_url().unwrap().starts_with("https://archivist.test"));
        assert_eq!(
            cv.status_timestamps(),
            vec![("queued-at".to_string(), "2025-01-01T00:00:00Z".to_string())]
        );
    }

    #[test]
    fn test_downloadable_statuses() {
        for (status, expected) in [
            ("uploaded", true),
            ("archived", true),
            ("pending", false),
            ("errored", false),
        ] {
            let cv: ConfigurationVersion = serde_json::from_value(serde_json::json!({
                "id": "cv-1",
                "attributes": {"status": status}
            }))
            .unwrap();
            assert_eq!(cv.is_downloadable(), expected, "status {}", status);
        }
    }
}
