//! Project command handlers

use log::debug;

use crate::cli::{GlobalArgs, ProjectCommand};
use crate::error::{Result, TfeError};
use crate::hcp::TfeClient;
use crate::output::{ProjectView, Renderer};
use crate::ui::{create_spinner, finish_spinner};

/// Run a `project` subcommand
pub async fn run_prj_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &ProjectCommand,
) -> Result<()> {
    match command {
        ProjectCommand::List(args) => {
            let search = args.search.as_deref();
            let org = if args.all {
                debug!("Listing projects across all organizations");
                renderer.command_header("Projects in all organizations")?;
                None
            } else {
                let org = client.require_organization()?;
                renderer.command_header(&format!("Projects in organization: {}", org))?;
                Some(org)
            };

            let spinner = create_spinner("Fetching projects...", global.json);
            let result = match org {
                Some(org) => client.fetch_projects(org, search).await,
                None => client.fetch_projects_across_orgs(search).await,
            };
            finish_spinner(spinner);

            ProjectView::new(renderer).list(&result?)
        }
        ProjectCommand::Show(args) => {
            let org = match args.id {
                Some(_) => None,
                None => Some(client.require_organization()?),
            };

            let spinner = create_spinner("Fetching project...", global.json);
            let result = match (&args.id, &args.name, org) {
                (Some(id), _, _) => client.read_project(id).await,
                (None, Some(name), Some(org)) => client.fetch_project_by_name(org, name).await,
                _ => Err(TfeError::Validation(
                    "either --id or --name is required".to_string(),
                )),
            };
            finish_spinner(spinner);

            ProjectView::new(renderer).show(&result?)
        }
    }
}
