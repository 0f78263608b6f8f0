//! Configuration version command handlers

use log::debug;

use crate::cli::{ConfigurationVersionCommand, GlobalArgs};
use crate::error::{Result, TfeError};
use crate::hcp::workspaces::target_workspace;
use crate::hcp::TfeClient;
use crate::output::{ConfigurationVersionView, Renderer};
use crate::ui::{create_spinner, finish_spinner};

/// Run a `workspace configuration-version` subcommand
pub async fn run_configuration_version_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &ConfigurationVersionCommand,
) -> Result<()> {
    match command {
        ConfigurationVersionCommand::List(args) => {
            renderer.command_header(&format!(
                "Configuration versions of workspace: {}",
                args.target.workspace
            ))?;
            let spinner = create_spinner("Fetching configuration versions...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client
                    .fetch_configuration_versions(&ws.id, args.limit.max_items)
                    .await
            }
            .await;
            finish_spinner(spinner);

            ConfigurationVersionView::new(renderer).list(&result?)
        }
        ConfigurationVersionCommand::Create(args) => {
            renderer.command_header(&format!(
                "Uploading {} to workspace: {}",
                args.directory.display(),
                args.target.workspace
            ))?;
            let spinner = create_spinner("Uploading configuration...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client
                    .create_configuration_version(&ws.id, &args.directory, args.speculative)
                    .await
            }
            .await;
            finish_spinner(spinner);

            ConfigurationVersionView::new(renderer).show(&result?)
        }
        ConfigurationVersionCommand::Show(args) => {
            let spinner = create_spinner("Fetching configuration version...", global.json);
            let result = client.read_configuration_version(&args.id).await;
            finish_spinner(spinner);

            ConfigurationVersionView::new(renderer).show(&result?)
        }
        ConfigurationVersionCommand::Download(args) => {
            let spinner = create_spinner(
                &format!("Downloading configuration version {}...", args.id),
                global.json,
            );
            let result = async {
                let cv = client.read_configuration_version(&args.id).await?;
                if !cv.is_downloadable() {
                    return Err(TfeError::Validation(format!(
                        "configuration version '{}' is not downloadable (status: {})",
                        args.id,
                        cv.status()
                    )));
                }
                debug!("Downloading {} ({})", cv.id, cv.status());
                client
                    .download_configuration_version(&cv.id, args.directory.as_deref())
                    .await
            }
            .await;
            finish_spinner(spinner);

            ConfigurationVersionView::new(renderer).downloaded(&args.id, &result?)
        }
    }
}
