//! Token fallback from the Terraform CLI credentials file

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{credentials, settings};
use crate::error::{Result, TfeError};

/// Credentials file structure
#[derive(Deserialize, Debug)]
struct TfeCredentials {
    credentials: HashMap<String, TfeCredential>,
}

/// Single credential entry
#[derive(Deserialize, Debug)]
struct TfeCredential {
    token: String,
}

/// Looks up a host's token in `credentials.tfrc.json`
pub struct TokenResolver {
    credentials_path: Option<PathBuf>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self {
            credentials_path: Self::get_credentials_path(),
        }
    }
}

impl TokenResolver {
    /// Use a specific credentials file (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            credentials_path: Some(path),
        }
    }

    /// Token for `host`, or a config error explaining where tokens come from
    pub fn resolve(&self, host: &str) -> Result<String> {
        let path = self
            .credentials_path
            .as_deref()
            .ok_or_else(|| TfeError::Config(token_not_found_message(host, None)))?;

        debug!("Looking for credentials file at: {}", path.display());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                return Err(TfeError::Config(token_not_found_message(host, Some(path))));
            }
        };

        let creds: TfeCredentials = serde_json::from_str(&content).map_err(|e| {
            TfeError::Config(format!(
                "could not parse credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        creds
            .credentials
            .get(host)
            .map(|cred| {
                debug!(
                    "Using token from credentials file {} for host: {}",
                    path.display(),
                    host
                );
                cred.token.clone()
            })
            .ok_or_else(|| TfeError::Config(token_not_found_message(host, Some(path))))
    }

    /// Get the path to Terraform credentials file (platform-specific)
    /// - Windows: %APPDATA%\terraform.d\credentials.tfrc.json
    /// - Linux/macOS: ~/.terraform.d/credentials.tfrc.json
    fn get_credentials_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            dirs::config_dir().map(|p| p.join(credentials::FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            dirs::home_dir().map(|p| p.join(credentials::FILE_PATH_UNIX))
        }
    }
}

/// Generate helpful error message when token is not found
fn token_not_found_message(host: &str, credentials_path: Option<&Path>) -> String {
    let creds_info = credentials_path
        .map(|p| format!(" or in credentials file {}", p.display()))
        .unwrap_or_default();

    format!(
        "no API token found for host '{}'. Provide one with --tfe-token, the {} \
         environment variable, tfeToken in {}, or run `terraform login {}`{}",
        host,
        settings::TOKEN_ENV,
        settings::CONFIG_FILE_NAME,
        host,
        creds_info
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_token_not_found_message_format() {
        let msg = token_not_found_message("app.terraform.io", None);
        assert!(msg.contains("app.terraform.io"));
        assert!(msg.contains("--tfe-token"));
        assert!(msg.contains("TFE_TOKEN"));
        assert!(msg.contains("terraform login"));
    }

    #[test]
    fn test_token_not_found_message_with_path() {
        let path = Path::new("/home/user/.terraform.d/credentials.tfrc.json");
        let msg = token_not_found_message("app.terraform.io", Some(path));
        assert!(msg.contains("/home/user/.terraform.d/credentials.tfrc.json"));
    }

    #[test]
    fn test_resolve_from_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.tfrc.json");
        fs::write(
            &path,
            r#"{
                "credentials": {
                    "app.terraform.io": { "token": "test-token-123" },
                    "custom.host.com": { "token": "custom-token-456" }
                }
            }"#,
        )
        .unwrap();

        let resolver = TokenResolver::with_path(path);
        assert_eq!(resolver.resolve("custom.host.com").unwrap(), "custom-token-456");
        assert_eq!(
            resolver.resolve("other.host").unwrap_err().kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let resolver = TokenResolver::with_path(PathBuf::from("/nonexistent/creds.json"));
        let err = resolver.resolve("app.terraform.io").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_credentials_file_parsing_empty() {
        let json = r#"{"credentials": {}}"#;
        let creds: TfeCredentials = serde_json::from_str(json).unwrap();
        assert!(creds.credentials.is_empty());
    }

    #[test]
    fn test_get_credentials_path() {
        let path = TokenResolver::get_credentials_path();
        assert!(path.is_some());
        assert!(path
            .unwrap()
            .to_string_lossy()
            .contains("credentials.tfrc.json"));
    }
}
