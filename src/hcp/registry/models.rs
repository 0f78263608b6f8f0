//! Private registry data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Registry module data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RegistryModule {
    pub id: String,
    #[serde(default)]
    pub attributes: RegistryModuleAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RegistryModuleAttributes {
    pub name: String,
    pub namespace: Option<String>,
    pub provider: Option<String>,
    #[serde(rename = "registry-name")]
    pub registry_name: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "version-statuses", default)]
    pub version_statuses: Vec<VersionStatus>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated-at")]
    pub updated_at: Option<String>,
    #[serde(rename = "no-code", default)]
    pub no_code: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub version: String,
    #[serde(default)]
    pub status: String,
}

impl RegistryModule {
    pub fn namespace(&self) -> &str {
        self.attributes.namespace.as_deref().unwrap_or("")
    }

    pub fn provider(&self) -> &str {
        self.attributes.provider.as_deref().unwrap_or("")
    }

    pub fn status(&self) -> &str {
        self.attributes.status.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn updated_at(&self) -> &str {
        self.attributes.updated_at.as_deref().unwrap_or("")
    }

    pub fn versions(&self) -> &[VersionStatus] {
        &self.attributes.version_statuses
    }

    /// Highest version by semver ordering; unparsable versions are ignored
    pub fn latest_version(&self) -> Option<&str> {
        self.versions()
            .iter()
            .filter_map(|v| semver::Version::parse(&v.version).ok().map(|p| (p, v)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.version.as_str())
    }
}

impl TfeResource for RegistryModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Module version created ahead of its slug upload
#[derive(Deserialize, Debug, Clone)]
pub struct ModuleVersion {
    pub id: String,
    #[serde(default)]
    pub attributes: ModuleVersionAttributes,
    #[serde(default)]
    pub links: ModuleVersionLinks,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ModuleVersionAttributes {
    pub version: String,
    pub status: Option<String>,
    pub source: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ModuleVersionLinks {
    pub upload: Option<String>,
}

/// Registry provider data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RegistryProvider {
    pub id: String,
    #[serde(default)]
    pub attributes: RegistryProviderAttributes,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RegistryProviderAttributes {
    pub name: String,
    pub namespace: Option<String>,
    #[serde(rename = "registry-name")]
    pub registry_name: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated-at")]
    pub updated_at: Option<String>,
}

impl RegistryProvider {
    pub fn namespace(&self) -> &str {
        self.attributes.namespace.as_deref().unwrap_or("")
    }

    pub fn registry_name(&self) -> &str {
        self.attributes.registry_name.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn updated_at(&self) -> &str {
        self.attributes.updated_at.as_deref().unwrap_or("")
    }
}

impl TfeResource for RegistryProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Provider version from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct ProviderVersion {
    pub id: String,
    #[serde(default)]
    pub attributes: ProviderVersionAttributes,
    #[serde(default)]
    pub links: ProviderVersionLinks,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderVersionAttributes {
    pub version: String,
    #[serde(rename = "key-id")]
    pub key_id: Option<String>,
    #[serde(default)]
    pub protocols: Vec<String>,
    #[serde(rename = "shasums-uploaded", default)]
    pub shasums_uploaded: bool,
    #[serde(rename = "shasums-sig-uploaded", default)]
    pub shasums_sig_uploaded: bool,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
}

/// One-time upload URLs returned when a provider version is created
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderVersionLinks {
    #[serde(rename = "shasums-upload")]
    pub shasums_upload: Option<String>,
    #[serde(rename = "shasums-sig-upload")]
    pub shasums_sig_upload: Option<String>,
}

impl ProviderVersion {
    pub fn version(&self) -> &str {
        &self.attributes.version
    }

    pub fn key_id(&self) -> &str {
        self.attributes.key_id.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }
}

/// Provider platform (one os/arch binary of a version)
#[derive(Deserialize, Debug, Clone)]
pub struct ProviderPlatform {
    pub id: String,
    #[serde(default)]
    pub attributes: ProviderPlatformAttributes,
    #[serde(default)]
    pub links: ProviderPlatformLinks,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderPlatformAttributes {
    pub os: String,
    pub arch: String,
    pub filename: Option<String>,
    pub shasum: Option<String>,
    #[serde(rename = "provider-binary-uploaded", default)]
    pub provider_binary_uploaded: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderPlatformLinks {
    #[serde(rename = "provider-binary-upload")]
    pub provider_binary_upload: Option<String>,
}

impl ProviderPlatform {
    pub fn filename(&self) -> &str {
        self.attributes.filename.as_deref().unwrap_or("")
    }

    pub fn shasum(&self) -> &str {
        self.attributes.shasum.as_deref().unwrap_or("")
    }
}
