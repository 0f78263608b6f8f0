//! Workspace variable command handlers

use std::fs;

use crate::cli::{GlobalArgs, VariableCommand, VariableWriteArgs};
use crate::error::{Result, TfeError};
use crate::hcp::workspaces::target_workspace;
use crate::hcp::TfeClient;
use crate::output::{Renderer, VariableView};
use crate::ui::{confirm_delete, create_spinner, finish_spinner};

use super::models::VariableOptions;

/// Build create/update input; the value comes from `--value` or `--value-file`
fn variable_options(args: &VariableWriteArgs) -> Result<VariableOptions> {
    let value = match (&args.value, &args.value_file) {
        (Some(value), _) => value.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
            TfeError::Config(format!(
                "unable to read value file {}: {}",
                path.display(),
                e
            ))
        })?,
        (None, None) => {
            return Err(TfeError::Validation(
                "either --value or --value-file is required".to_string(),
            ))
        }
    };

    Ok(VariableOptions {
        key: args.key.clone(),
        value,
        description: args.description.clone(),
        env: args.env,
        hcl: args.hcl,
        sensitive: args.sensitive,
    })
}

/// Run a `workspace variable` subcommand
pub async fn run_variable_command(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &VariableCommand,
) -> Result<()> {
    match command {
        VariableCommand::List(target) => {
            renderer.command_header(&format!("Variables of workspace: {}", target.workspace))?;
            let spinner = create_spinner("Fetching variables...", global.json);
            let result = async {
                let ws = target_workspace(client, &target.workspace).await?;
                client.fetch_variables(&ws.id).await
            }
            .await;
            finish_spinner(spinner);

            VariableView::new(renderer).list(&result?)
        }
        VariableCommand::Show(args) => {
            let spinner = create_spinner("Fetching variable...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client.fetch_variable(&ws.id, &args.key).await
            }
            .await;
            finish_spinner(spinner);

            VariableView::new(renderer).show(&result?)
        }
        VariableCommand::Create(args) => {
            let options = variable_options(args)?;
            renderer.command_header(&format!(
                "Creating variable {} in workspace: {}",
                args.key, args.target.workspace
            ))?;
            let spinner = create_spinner("Creating variable...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client.create_variable(&ws.id, &options).await
            }
            .await;
            finish_spinner(spinner);

            VariableView::new(renderer).show(&result?)
        }
        VariableCommand::Update(args) => {
            let options = variable_options(args)?;
            renderer.command_header(&format!(
                "Updating variable {} in workspace: {}",
                args.key, args.target.workspace
            ))?;
            let spinner = create_spinner("Updating variable...", global.json);
            let result = async {
                let ws = target_workspace(client, &args.target.workspace).await?;
                client.update_variable(&ws.id, &options).await
            }
            .await;
            finish_spinner(spinner);

            VariableView::new(renderer).show(&result?)
        }
        VariableCommand::Delete(args) => {
            let workspace = &args.target.workspace;
            let what = format!("variable '{}' from workspace '{}'", args.key, workspace);
            if !confirm_delete(&what, global.needs_confirmation())? {
                return renderer.message("Aborted");
            }

            let spinner = create_spinner("Deleting variable...", global.json);
            let result = async {
                let ws = target_workspace(client, workspace).await?;
                let variable = client.fetch_variable(&ws.id, &args.key).await?;
                client.delete_variable(&ws.id, &variable.id).await
            }
            .await;
            finish_spinner(spinner);

            result?;
            VariableView::new(renderer).deleted(&args.key, workspace)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command, WorkspaceCommand};
    use crate::error::ErrorKind;
    use clap::Parser;

    fn write_args(argv: &[&str]) -> VariableWriteArgs {
        let mut full = vec!["tfx", "workspace", "variable", "create", "-w", "app"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Workspace {
                command:
                    WorkspaceCommand::Variable {
                        command: VariableCommand::Create(args),
                    },
            } => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_value_from_flag() {
        let options = variable_options(&write_args(&["-k", "region", "-v", "eu-west-1", "--hcl"]))
            .unwrap();
        assert_eq!(options.value, "eu-west-1");
        assert!(options.hcl);
        assert_eq!(options.category(), "terraform");
    }

    #[test]
    fn test_value_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.txt");
        fs::write(&path, "{ a = 1 }").unwrap();

        let options = variable_options(&write_args(&[
            "-k",
            "settings",
            "-f",
            path.to_str().unwrap(),
            "--env",
        ]))
        .unwrap();
        assert_eq!(options.value, "{ a = 1 }");
        assert_eq!(options.category(), "env");
    }

    #[test]
    fn test_missing_value_file_is_config_error() {
        let err = variable_options(&write_args(&["-k", "k", "-f", "/nonexistent/value.txt"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_value_required() {
        let err = variable_options(&write_args(&["-k", "k"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
