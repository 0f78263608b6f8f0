//! Workspace team access command handlers

use crate::cli::{GlobalArgs, TeamCommand};
use crate::error::Result;
use crate::hcp::workspaces::target_workspace;
use crate::hcp::TfeClient;
use crate::output::{Renderer, TeamAccessView};
use crate::ui::{create_spinner, finish_spinner};

/// Run a `workspace team` subcommand
pub async fn run_team_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &TeamCommand,
) -> Result<()> {
    match command {
        TeamCommand::List(args) => {
            renderer.command_header(&format!(
                "Team access of workspace: {}",
                args.target.workspace
            ))?;
            let spinner = create_spinner("Fetching team access...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                let access = client
                    .fetch_workspace_team_access(&ws.id, args.limit.max_items)
                    .await?;
                client.get_team_access_names(access).await
            }
            .await;
            finish_spinner(spinner);

            TeamAccessView::new(renderer).list(&result?)
        }
    }
}
