//! Configuration discovery
//!
//! Builds the [`Config`] a [`TfeClient`](crate::hcp::TfeClient) is created from.
//! Values are taken in order from CLI flags, environment variables (clap
//! fills both into [`Overrides`]), the `.tfx.yaml` config file and finally
//! built-in defaults. A missing token falls back to the Terraform CLI
//! credentials file.

mod credentials;
mod file;

use std::path::PathBuf;
use std::time::Duration;

use log::debug;

use crate::config::{defaults, settings};
use crate::error::{Result, TfeError};

pub use credentials::TokenResolver;
pub use file::ConfigFile;

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub hostname: Option<String>,
    pub token: Option<String>,
    pub organization: Option<String>,
    pub http_log: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Service hostname without scheme
    pub hostname: String,
    pub token: String,
    pub organization: Option<String>,
    /// Optional HTTP dump file
    pub http_log: Option<PathBuf>,
    /// Deadline applied to the whole invocation
    pub timeout: Option<Duration>,
}

/// Organization, or a config error naming how to set it
pub fn require_organization(organization: Option<&str>) -> Result<&str> {
    organization.filter(|o| !o.is_empty()).ok_or_else(|| {
        TfeError::Config(format!(
            "no organization configured; pass --tfe-org, set {} or add tfeOrganization to {}",
            settings::ORGANIZATION_ENV,
            settings::CONFIG_FILE_NAME
        ))
    })
}

/// Strip scheme and trailing slashes from a hostname
pub fn normalize_hostname(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve configuration from overrides, config file and defaults
pub fn resolve(overrides: &Overrides) -> Result<Config> {
    let file = ConfigFile::discover(overrides.config_path.as_deref())?.unwrap_or_default();
    resolve_with(overrides, file, &TokenResolver::default())
}

/// Resolution with an explicit config file and credentials source
pub fn resolve_with(
    overrides: &Overrides,
    file: ConfigFile,
    token_resolver: &TokenResolver,
) -> Result<Config> {
    let hostname = non_empty(overrides.hostname.clone())
        .or_else(|| non_empty(file.tfe_hostname.clone()))
        .map(|h| normalize_hostname(&h))
        .unwrap_or_else(|| defaults::HOST.to_string());

    if hostname.is_empty() {
        return Err(TfeError::Config("hostname must not be empty".to_string()));
    }

    let token = match non_empty(overrides.token.clone()).or_else(|| non_empty(file.tfe_token)) {
        Some(token) => token,
        None => {
            debug!("No token in flags, environment or config file; trying Terraform credentials");
            token_resolver.resolve(&hostname)?
        }
    };

    let organization =
        non_empty(overrides.organization.clone()).or_else(|| non_empty(file.tfe_organization));
    let http_log = overrides.http_log.clone().or(file.http_log);

    debug!(
        "Resolved configuration: hostname={}, organization={:?}, http_log={:?}",
        hostname, organization, http_log
    );

    Ok(Config {
        hostname,
        token,
        organization,
        http_log,
        timeout: overrides.timeout_secs.map(Duration::from_secs),
    })
}
