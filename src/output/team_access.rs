//! Workspace team access view

use serde::Serialize;

use crate::error::Result;
use crate::hcp::teams::NamedTeamAccess;
use crate::output::renderer::{Cell, Renderer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamAccessItem<'a> {
    team_name: &'a str,
    team_id: &'a str,
    access: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    runs: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state_versions: Option<&'a str>,
    workspace_locking: bool,
}

pub struct TeamAccessView<'a> {
    renderer: &'a mut Renderer,
}

impl<'a> TeamAccessView<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Self {
        Self { renderer }
    }

    pub fn list(&mut self, entries: &[NamedTeamAccess]) -> Result<()> {
        if self.renderer.is_json() {
            let items: Vec<TeamAccessItem> = entries
                .iter()
                .map(|e| {
                    let attrs = &e.access.attributes;
                    TeamAccessItem {
                        team_name: &e.team_name,
                        team_id: e.access.team_id().unwrap_or(""),
                        access: e.access.access(),
                        runs: attrs.runs.as_deref(),
                        variables: attrs.variables.as_deref(),
                        state_versions: attrs.state_versions.as_deref(),
                        workspace_locking: e.access.can_lock(),
                    }
                })
                .collect();
            return self.renderer.render_json(&items);
        }

        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    Cell::new(&e.team_name),
                    Cell::new(e.access.team_id().unwrap_or("")),
                    Cell::new(e.access.access()),
                    Cell::new(e.access.attributes.runs.as_deref().unwrap_or("")),
                    Cell::new(e.access.can_lock().to_string()),
                ]
            })
            .collect();
        self.renderer.render_table(
            &["Team", "Team ID", "Access", "Runs", "Workspace Locking"],
            rows,
        )
    }
}
