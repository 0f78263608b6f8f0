//! Team API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::traits::TfeResource;
use crate::hcp::TfeClient;

use super::models::{NamedTeamAccess, Team, TeamAccess};

impl TfeClient {
    pub async fn read_team(&self, team_id: &str) -> Result<Team> {
        let path = format!("/{}/{}", api::TEAMS, urlencoding::encode(team_id));
        let label = format!("team '{}'", team_id);
        self.fetch_resource_by_path::<Team>(&path, &label)
            .await?
            .map(|(team, _)| team)
            .ok_or_else(|| TfeError::NotFound(format!("{} not found", label)))
    }

    /// Team access grants of a workspace, bounded by `max_items`
    pub async fn fetch_workspace_team_access(
        &self,
        workspace_id: &str,
        max_items: usize,
    ) -> Result<Vec<TeamAccess>> {
        let path = format!(
            "/{}?filter[workspace][id]={}",
            api::TEAM_WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        let error_context = format!("team access for workspace '{}'", workspace_id);
        self.fetch_pages_bounded::<TeamAccess>(&path, max_items, &error_context)
            .await
    }

    /// Resolve the team name of every grant, one request per grant
    pub async fn get_team_access_names(
        &self,
        team_access: Vec<TeamAccess>,
    ) -> Result<Vec<NamedTeamAccess>> {
        let mut named = Vec::with_capacity(team_access.len());
        for access in team_access {
            let team_name = match access.team_id() {
                Some(team_id) => self.read_team(team_id).await?.name().to_string(),
                None => {
                    debug!("Team access {} has no team relationship", access.id);
                    String::new()
                }
            };
            named.push(NamedTeamAccess { team_name, access });
        }
        Ok(named)
    }
}
