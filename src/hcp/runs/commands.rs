//! Run command handlers

use log::info;

use crate::cli::{GlobalArgs, RunCommand};
use crate::error::Result;
use crate::hcp::workspaces::target_workspace;
use crate::hcp::TfeClient;
use crate::output::{Renderer, RunView};
use crate::ui::{create_spinner, finish_spinner};

/// Run a `workspace run` subcommand
pub async fn run_runs_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &RunCommand,
) -> Result<()> {
    match command {
        RunCommand::List(args) => {
            renderer.command_header(&format!("Runs of workspace: {}", args.target.workspace))?;
            let spinner = create_spinner("Fetching runs...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client.fetch_runs(&ws.id, args.limit.max_items).await
            }
            .await;
            finish_spinner(spinner);

            RunView::new(renderer).list(&result?)
        }
        RunCommand::Create(args) => {
            renderer.command_header(&format!("Queueing run in workspace: {}", args.target.workspace))?;
            let spinner = create_spinner("Creating run...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client
                    .create_run(&ws.id, &args.message, args.configuration_version_id.as_deref())
                    .await
            }
            .await;
            finish_spinner(spinner);

            let run = result?;
            info!(workspace = args.target.workspace.as_str(); "Queued run {}", run.id);
            RunView::new(renderer).show(&run)
        }
        RunCommand::Show(args) => {
            let spinner = create_spinner("Fetching run...", global.json);
            let result = client.read_run(&args.id).await;
            finish_spinner(spinner);

            RunView::new(renderer).show(&result?)
        }
        RunCommand::Discard(args) => {
            let spinner = create_spinner("Discarding run...", global.json);
            let result = client.discard_run(&args.id, &args.comment).await;
            finish_spinner(spinner);

            result?;
            RunView::new(renderer).discarded(&args.id)
        }
    }
}
