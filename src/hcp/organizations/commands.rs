//! Organization command handlers

use log::debug;

use crate::cli::{GlobalArgs, OrganizationCommand};
use crate::error::Result;
use crate::hcp::TfeClient;
use crate::output::{OrganizationView, Renderer};
use crate::ui::{create_spinner, finish_spinner};

/// Run an `organization` subcommand
pub async fn run_org_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &OrganizationCommand,
) -> Result<()> {
    match command {
        OrganizationCommand::List(args) => {
            debug!("Listing organizations (search: {:?})", args.search);
            renderer.command_header(&format!("Organizations on {}", client.host()))?;

            let spinner = create_spinner("Fetching organizations...", global.json);
            let result = client.fetch_organizations(args.search.as_deref()).await;
            finish_spinner(spinner);

            OrganizationView::new(renderer).list(&result?)
        }
        OrganizationCommand::Show(args) => {
            renderer.command_header(&format!("Organization: {}", args.name))?;

            let spinner = create_spinner("Fetching organization...", global.json);
            let result = client.read_organization(&args.name).await;
            finish_spinner(spinner);

            OrganizationView::new(renderer).show(&result?)
        }
    }
}
