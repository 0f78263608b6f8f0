//! tfx - main entry point

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn};

use tfx::logging::{self, LogLevel, LogSettings};
use tfx::{
    run_org_command, run_prj_command, run_registry_command, run_ws_command, settings, Cli,
    Command, GlobalArgs, Renderer, RequestContext, Result, TfeClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut renderer = Renderer::stdout(cli.global.json);

    match run(&cli, &mut renderer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            if renderer.render_error(&err).is_err() {
                eprintln!("Error: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, renderer: &mut Renderer) -> Result<()> {
    let global = &cli.global;
    let level: LogLevel = global.log_level.parse()?;
    logging::init(&LogSettings {
        level,
        log_dir: global.log_dir.clone(),
    });

    info!("Starting tfx v{}", env!("CARGO_PKG_VERSION"));

    if cli.command.is_offline() {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let config = settings::resolve(&global.overrides())?;
    debug!(
        "Resolved config: host={}, org={:?}, http_log={:?}, timeout={:?}",
        config.hostname, config.organization, config.http_log, config.timeout
    );

    let ctx = match config.timeout {
        Some(timeout) => RequestContext::with_timeout(timeout),
        None => RequestContext::new(),
    };
    let signal_ctx = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight requests");
            signal_ctx.cancel();
        }
    });

    let client = TfeClient::new(&config, ctx)?;
    let result = dispatch(&client, renderer, global, &cli.command).await;
    settle(result, client.close())
}

/// Outcome of the command; a failed log close only warns once output is written
fn settle(result: Result<()>, closed: Result<()>) -> Result<()> {
    if let Err(e) = closed {
        if result.is_ok() {
            warn!("Failed to close HTTP log: {}", e);
        } else {
            debug!("Failed to close HTTP log: {}", e);
        }
    }
    result
}

async fn dispatch(
    client: &TfeClient,
    renderer: &mut Renderer,
    global: &GlobalArgs,
    command: &Command,
) -> Result<()> {
    match command {
        Command::Organization { command } => {
            run_org_command(client, renderer, global, command).await
        }
        Command::Project { command } => run_prj_command(client, renderer, global, command).await,
        Command::Workspace { command } => run_ws_command(client, renderer, global, command).await,
        Command::Registry { command } => {
            run_registry_command(client, renderer, global, command).await
        }
        Command::MarkdownHelp => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfx::TfeError;

    #[test]
    fn test_close_failure_after_success_is_not_an_error() {
        let closed = Err(TfeError::Io("disk full".to_string()));
        assert!(settle(Ok(()), closed).is_ok());
    }

    #[test]
    fn test_command_error_wins_over_close_failure() {
        let result = Err(TfeError::Config("no token".to_string()));
        let closed = Err(TfeError::Io("disk full".to_string()));
        let err = settle(result, closed).unwrap_err();
        assert!(err.to_string().contains("no token"));
    }
}
