/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// JSON:API media type used for Accept and Content-Type
    pub const MEDIA_TYPE: &str = "application/vnd.api+json";

    pub const ORGANIZATIONS: &str = "organizations";
    pub const PROJECTS: &str = "projects";
    pub const WORKSPACES: &str = "workspaces";
    pub const RUNS: &str = "runs";
    pub const VARS: &str = "vars";
    pub const TEAMS: &str = "teams";
    pub const TEAM_WORKSPACES: &str = "team-workspaces";
    pub const CONFIGURATION_VERSIONS: &str = "configuration-versions";
    pub const STATE_VERSIONS: &str = "state-versions";
    pub const REGISTRY_MODULES: &str = "registry-modules";
    pub const REGISTRY_PROVIDERS: &str = "registry-providers";

    /// Default page size for API requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Registry name used for organization-private modules and providers
    pub const PRIVATE_REGISTRY: &str = "private";
}

/// Workspace lock reasons sent to the service
pub mod lock {
    pub const MANUAL_REASON: &str = "Locked via tfx";
    pub const STATE_CREATE_REASON: &str = "TFx locking to create new State File";

    /// Upper bound for releasing a lock once the operation holding it ended
    pub const RELEASE_GRACE_SECS: u64 = 30;
}

/// HTTP dump settings
pub mod http_log {
    /// Headers whose values are replaced before they reach the log file
    pub const REDACTED_HEADERS: &[&str] = &[
        "Authorization",
        "Cookie",
        "Set-Cookie",
        "X-Api-Key",
        "X-Auth-Token",
    ];

    pub const REDACTED: &str = "[REDACTED]";
}

/// Configuration constants for credentials
pub mod credentials {
    /// Credentials file name
    pub const FILE_NAME: &str = "terraform.d/credentials.tfrc.json";

    /// Path to Terraform credentials file on Unix (relative to HOME)
    pub const FILE_PATH_UNIX: &str = ".terraform.d/credentials.tfrc.json";
}

/// Environment variables and config file discovery
pub mod settings {
    pub const HOSTNAME_ENV: &str = "TFE_HOSTNAME";
    pub const TOKEN_ENV: &str = "TFE_TOKEN";
    pub const ORGANIZATION_ENV: &str = "TFE_ORGANIZATION";
    pub const HTTP_LOG_ENV: &str = "TFX_HTTP_LOG";
    pub const LOG_LEVEL_ENV: &str = "TFX_LOG_LEVEL";
    pub const LOG_DIR_ENV: &str = "TFX_LOG_DIR";

    /// Config file looked up in the current directory, then the home directory
    pub const CONFIG_FILE_NAME: &str = ".tfx.yaml";
}

/// Default values for CLI
pub mod defaults {
    /// Default TFE host
    pub const HOST: &str = "app.terraform.io";

    /// Default log level
    pub const LOG_LEVEL: &str = "off";

    /// Default cap for run/configuration/state version listings
    pub const MAX_ITEMS: usize = 10;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_path_format() {
        assert!(api::BASE_PATH.starts_with('/'));
    }

    #[test]
    fn test_default_host_is_valid() {
        assert!(defaults::HOST.contains('.'));
        assert!(!defaults::HOST.starts_with("https://"));
    }

    #[test]
    fn test_redacted_headers_cover_auth() {
        assert!(http_log::REDACTED_HEADERS.contains(&"Authorization"));
        assert!(http_log::REDACTED_HEADERS.contains(&"Set-Cookie"));
    }
}
