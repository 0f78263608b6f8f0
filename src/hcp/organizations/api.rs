//! Organization API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::TfeClient;

use super::models::Organization;

impl TfeClient {
    /// List organizations visible to the token, optionally filtered by a
    /// name/email substring
    pub async fn fetch_organizations(&self, search: Option<&str>) -> Result<Vec<Organization>> {
        let mut path = format!("/{}", api::ORGANIZATIONS);
        if let Some(q) = search.filter(|s| !s.is_empty()) {
            path.push_str(&format!("?q={}", urlencoding::encode(q)));
        }
        debug!("Fetching organizations (search: {:?})", search);

        self.fetch_all_pages::<Organization>(&path, "organizations")
            .await
    }

    /// Read a single organization by name
    pub async fn read_organization(&self, name: &str) -> Result<Organization> {
        let path = format!("/{}/{}", api::ORGANIZATIONS, urlencoding::encode(name));
        let label = format!("organization '{}'", name);

        self.fetch_resource_by_path::<Organization>(&path, &label)
            .await?
            .map(|(org, _raw)| org)
            .ok_or_else(|| TfeError::NotFound(format!("{} not found", label)))
    }
}
