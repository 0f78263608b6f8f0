//! State version command handlers

use std::path::PathBuf;

use log::debug;

use crate::cli::{GlobalArgs, StateVersionCommand};
use crate::error::{Result, ResultExt, TfeError};
use crate::hcp::TfeClient;
use crate::output::{Renderer, StateVersionView};
use crate::ui::{create_spinner, finish_spinner};

/// Where a downloaded state version is written by default
fn default_state_path(state_version_id: &str) -> PathBuf {
    PathBuf::from(format!("{}.tfstate", state_version_id))
}

/// Run a `workspace state-version` subcommand
pub async fn run_state_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &StateVersionCommand,
) -> Result<()> {
    match command {
        StateVersionCommand::List(args) => {
            let org = client.require_organization()?;
            renderer.command_header(&format!(
                "State versions of workspace: {}",
                args.target.workspace
            ))?;
            let spinner = create_spinner("Fetching state versions...", global.json);
            let result = client
                .fetch_state_versions(org, &args.target.workspace, args.limit.max_items)
                .await;
            finish_spinner(spinner);

            StateVersionView::new(renderer).list(&result?)
        }
        StateVersionCommand::Show(args) => {
            let spinner = create_spinner("Fetching state version...", global.json);
            let result = client.read_state_version(&args.id).await;
            finish_spinner(spinner);

            StateVersionView::new(renderer).show(&result?)
        }
        StateVersionCommand::Create(args) => {
            let org = client.require_organization()?;
            renderer.command_header(&format!(
                "Uploading {} to workspace: {}",
                args.filename.display(),
                args.target.workspace
            ))?;
            let spinner = create_spinner("Creating state version...", global.json);
            let result = client
                .create_state_version(org, &args.target.workspace, &args.filename)
                .await;
            finish_spinner(spinner);

            StateVersionView::new(renderer).show(&result?)
        }
        StateVersionCommand::Download(args) => {
            let target = args
                .filename
                .clone()
                .unwrap_or_else(|| default_state_path(&args.id));
            let spinner = create_spinner(
                &format!("Downloading state version {}...", args.id),
                global.json,
            );
            let result = async {
                let sv = client.read_state_version(&args.id).await?;
                client.download_state_version(&sv).await
            }
            .await;
            finish_spinner(spinner);

            let bytes = result?;
            debug!("Writing {} bytes to {}", bytes.len(), target.display());
            std::fs::write(&target, &bytes)
                .map_err(TfeError::from)
                .with_context(|| format!("failed to write {}", target.display()))?;

            StateVersionView::new(renderer).downloaded(&args.id, &target)
        }
    }
}
