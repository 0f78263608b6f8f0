//! `.tfx.yaml` config file discovery

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::config::settings;
use crate::error::{Result, TfeError};

/// Values a config file may provide
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub tfe_hostname: Option<String>,
    pub tfe_token: Option<String>,
    pub tfe_organization: Option<String>,
    pub http_log: Option<PathBuf>,
}

impl ConfigFile {
    /// Parse a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TfeError::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yml::from_str(&content).map_err(|e| {
            TfeError::Config(format!(
                "failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Candidate locations, in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(settings::CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(settings::CONFIG_FILE_NAME));
        }
        paths
    }

    /// Load the explicit path, or the first file found on the search path
    ///
    /// An explicit path that does not exist is an error; a missing file on
    /// the search path is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            debug!("Loading config file from --config: {}", path.display());
            return Self::load(path).map(Some);
        }
        Self::discover_in(&Self::search_paths())
    }

    fn discover_in(paths: &[PathBuf]) -> Result<Option<Self>> {
        for path in paths {
            if path.is_file() {
                debug!("Using config file {}", path.display());
                return Self::load(path).map(Some);
            }
        }
        debug!("No config file found in {:?}", paths);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tfx.yaml");
        fs::write(
            &path,
            "tfeHostname: tfe.example.com\ntfeToken: abc\ntfeOrganization: acme\nhttpLog: /tmp/http.log\n",
        )
        .unwrap();

        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.tfe_hostname.as_deref(), Some("tfe.example.com"));
        assert_eq!(file.tfe_token.as_deref(), Some("abc"));
        assert_eq!(file.tfe_organization.as_deref(), Some("acme"));
        assert_eq!(file.http_log, Some(PathBuf::from("/tmp/http.log")));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tfx.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(ConfigFile::load(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tfx.yaml");
        fs::write(&path, "tfeHostname: [unclosed").unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_discover_first_existing() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let second_path = second.path().join(".tfx.yaml");
        fs::write(&second_path, "tfeOrganization: from-home\n").unwrap();

        let paths = vec![first.path().join(".tfx.yaml"), second_path];
        let file = ConfigFile::discover_in(&paths).unwrap().unwrap();
        assert_eq!(file.tfe_organization.as_deref(), Some("from-home"));
    }

    #[test]
    fn test_discover_none() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join(".tfx.yaml")];
        assert!(ConfigFile::discover_in(&paths).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let err = ConfigFile::discover(Some(Path::new("/nonexistent/.tfx.yaml"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
