//! Workspace command handlers

use log::{debug, info};

use crate::cli::{GlobalArgs, LockArgs, WorkspaceCommand, WorkspaceListArgs};
use crate::config::api;
use crate::error::Result;
use crate::hcp::configuration_versions::run_configuration_version_command;
use crate::hcp::runs::{run_runs_command, RunStatus};
use crate::hcp::state::run_state_command;
use crate::hcp::teams::run_team_command;
use crate::hcp::variables::run_variable_command;
use crate::hcp::TfeClient;
use crate::output::{Renderer, WorkspaceView};
use crate::ui::{create_spinner, finish_spinner};

use super::models::{Workspace, WorkspaceListOptions};

/// Look up the workspace a subresource command targets, by name in the
/// configured organization
pub(crate) async fn target_workspace(client: &TfeClient, name: &str) -> Result<Workspace> {
    let org = client.require_organization()?;
    client.read_workspace(org, name).await
}

fn list_options(args: &WorkspaceListArgs) -> Result<WorkspaceListOptions> {
    let run_status = args
        .run_status
        .as_deref()
        .map(str::parse::<RunStatus>)
        .transpose()?;

    Ok(WorkspaceListOptions {
        search: args.search.clone(),
        wildcard_name: args.wildcard_name.clone(),
        project_id: args.project_id.clone(),
        run_status,
        tags: args.tags.clone(),
        exclude_tags: args.exclude_tags.clone(),
        repository: args.repository.clone(),
    })
}

/// Run a `workspace` subcommand
pub async fn run_ws_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &WorkspaceCommand,
) -> Result<()> {
    match command {
        WorkspaceCommand::List(args) => list(client, renderer, global, args).await,
        WorkspaceCommand::Show(args) => show(client, renderer, global, &args.name).await,
        WorkspaceCommand::Lock(args) => set_lock(client, renderer, global, args, true).await,
        WorkspaceCommand::Unlock(args) => set_lock(client, renderer, global, args, false).await,
        WorkspaceCommand::Variable { command } => {
            run_variable_command(client, renderer, global, command).await
        }
        WorkspaceCommand::ConfigurationVersion { command } => {
            run_configuration_version_command(client, renderer, global, command).await
        }
        WorkspaceCommand::StateVersion { command } => {
            run_state_command(client, renderer, global, command).await
        }
        WorkspaceCommand::Run { command } => {
            run_runs_command(client, renderer, global, command).await
        }
        WorkspaceCommand::Team { command } => {
            run_team_command(client, renderer, global, command).await
        }
    }
}

async fn list(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    args: &WorkspaceListArgs,
) -> Result<()> {
    let options = list_options(args)?;
    debug!("Workspace list options: {:?}", options);

    let org = if args.all {
        renderer.command_header("Workspaces in all organizations")?;
        None
    } else {
        let org = client.require_organization()?;
        renderer.command_header(&format!("Workspaces in organization: {}", org))?;
        Some(org)
    };

    let spinner = create_spinner("Fetching workspaces...", global.json);
    let result = match org {
        Some(org) => client.fetch_workspaces(org, &options).await,
        None => client.fetch_workspaces_across_orgs(&options).await,
    };
    finish_spinner(spinner);

    WorkspaceView::new(renderer).list(&result?)
}

async fn show(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    name: &str,
) -> Result<()> {
    renderer.command_header(&format!("Workspace: {}", name))?;
    let spinner = create_spinner("Fetching workspace...", global.json);

    let result = async {
        let workspace = target_workspace(client, name).await?;
        let access = client
            .fetch_workspace_team_access(&workspace.id, api::DEFAULT_PAGE_SIZE as usize)
            .await?;
        let team_access = client.get_team_access_names(access).await?;
        let consumers = client
            .fetch_workspace_remote_state_consumers(&workspace.id)
            .await?;
        Ok::<_, crate::error::TfeError>((workspace, team_access, consumers))
    }
    .await;
    finish_spinner(spinner);

    let (workspace, team_access, consumers) = result?;
    WorkspaceView::new(renderer).show(&workspace, &team_access, &consumers)
}

async fn set_lock(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    args: &LockArgs,
    lock: bool,
) -> Result<()> {
    let org = client.require_organization()?;
    let verb = if lock { "Locking" } else { "Unlocking" };

    match (&args.name, args.all) {
        (Some(name), false) => {
            renderer.command_header(&format!("{} workspace: {}", verb, name))?;
            let spinner = create_spinner(&format!("{} {}...", verb, name), global.json);
            let result = client.set_workspace_lock(org, name, lock).await;
            finish_spinner(spinner);

            WorkspaceView::new(renderer).lock_outcome(name, result?)
        }
        _ => {
            let search = args.search.as_deref();
            renderer.command_header(&format!("{} workspaces in organization: {}", verb, org))?;
            let spinner = create_spinner(&format!("{} workspaces...", verb), global.json);
            let result = if lock {
                client.lock_all(org, search).await
            } else {
                client.unlock_all(org, search).await
            };
            finish_spinner(spinner);

            let results = result?;
            let failed = results.iter().filter(|r| r.result.is_err()).count();
            info!(org = org; "{} of {} workspaces failed", failed, results.len());
            WorkspaceView::new(renderer).batch_lock(&results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn ws_list_args(argv: &[&str]) -> WorkspaceListArgs {
        let mut full = vec!["tfx", "workspace", "list"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            crate::cli::Command::Workspace {
                command: WorkspaceCommand::List(args),
            } => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_list_options_parse_run_status() {
        let options = list_options(&ws_list_args(&["-r", "applied", "--repository", "acme/app"]))
            .unwrap();
        assert_eq!(options.run_status, Some(RunStatus::Applied));
        assert_eq!(options.repository.as_deref(), Some("acme/app"));
    }

    #[test]
    fn test_list_options_reject_unknown_status() {
        let err = list_options(&ws_list_args(&["-r", "sleeping"])).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }
}
