//! State version data models

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TfeError};

/// State version data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersion {
    pub id: String,
    pub attributes: StateVersionAttributes,
}

/// State version attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct StateVersionAttributes {
    pub serial: u64,
    pub lineage: Option<String>,
    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "hosted-state-download-url")]
    pub hosted_state_download_url: Option<String>,
    #[serde(rename = "resources-processed")]
    pub resources_processed: Option<bool>,
    pub size: Option<u64>,
    pub status: Option<String>,
}

impl StateVersion {
    pub fn serial(&self) -> u64 {
        self.attributes.serial
    }

    pub fn lineage(&self) -> &str {
        self.attributes.lineage.as_deref().unwrap_or("")
    }

    pub fn terraform_version(&self) -> &str {
        self.attributes.terraform_version.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn download_url(&self) -> Option<&str> {
        self.attributes.hosted_state_download_url.as_deref()
    }

    pub fn resources_processed(&self) -> bool {
        self.attributes.resources_processed.unwrap_or(false)
    }
}

/// Header fields every Terraform state file carries
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StateFileHeader {
    pub version: u32,
    pub terraform_version: String,
    pub serial: u64,
    pub lineage: String,
}

/// Decoded local state file: the full document plus its header
#[derive(Debug, Clone)]
pub struct StateFile {
    pub header: StateFileHeader,
    document: serde_json::Value,
}

impl StateFile {
    /// Parse a state file, requiring `version`, `terraform_version`, `serial` and `lineage`
    pub fn parse(content: &[u8]) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_slice(content)
            .map_err(|e| TfeError::Validation(format!("state file is not valid JSON: {}", e)))?;
        let header: StateFileHeader = serde_json::from_value(document.clone())
            .map_err(|e| TfeError::Validation(format!("invalid state file: {}", e)))?;
        Ok(Self { header, document })
    }

    /// Re-encode with a new serial; every other field is left as it was
    pub fn with_serial(&self, serial: u64) -> Result<EncodedState> {
        let mut document = self.document.clone();
        document["serial"] = serde_json::Value::from(serial);
        let bytes = serde_json::to_vec_pretty(&document)?;

        let mut hasher = Md5::new();
        hasher.update(&bytes);
        let md5 = format!("{:x}", hasher.finalize());

        Ok(EncodedState {
            lineage: self.header.lineage.clone(),
            serial,
            md5,
            state: BASE64.encode(&bytes),
        })
    }
}

/// Upload-ready state: base64 payload plus its integrity data
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodedState {
    pub lineage: String,
    pub serial: u64,
    pub md5: String,
    /// Base64 of the rewritten state file
    pub state: String,
}

impl EncodedState {
    /// JSON:API body for `POST /workspaces/:id/state-versions`
    pub fn request_body(&self) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "type": "state-versions",
                "attributes": self
            }
        })
    }
}
