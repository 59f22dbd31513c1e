mod cli;
mod config;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use txc_client::HttpExecutorApi;
use txc_console::{Console, ConsoleResult};
use txc_observe::{LoggerTimeZone, init_local_offset, init_logger};

use crate::{
    cli::{Cli, Command, DlqCommand},
    config::AdminConfig,
    terminal::TerminalView,
};

type AdminConsole = Console<HttpExecutorApi, TerminalView>;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 1) config: defaults < file < env < flags
    let cfg = AdminConfig::resolve(&cli)?;

    // 2) logger
    if cfg.logger.tz == LoggerTimeZone::Local {
        init_local_offset();
    }
    init_logger(&cfg.logger)?;
    debug!(api_base = %cfg.api_base, "configuration resolved");

    // 3) console over the REST api
    let api = HttpExecutorApi::new(&cfg.api_base)?;
    let view = TerminalView::stdio(cfg.download_dir.clone()).assume_yes(cli.command.assume_yes());
    let mut console = Console::with_page_size(api, view, cfg.page_size);

    // 4) run; failures were already shown to the user
    let outcome = run(&mut console, cli.command).await;
    console.view_mut().present()?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!(error = %e, "command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(console: &mut AdminConsole, command: Command) -> ConsoleResult<()> {
    match command {
        Command::List { status, search, page } => {
            console.refresh().await?;
            console.set_status_filter(status);
            console.set_search(&search);
            console.go_to_page(page);
        }
        Command::Show { name } => {
            console.open_executor(&name).await?;
        }
        Command::Add { name, policy } => {
            console.open_new();
            console.set_name_input(&name)?;
            console.form_mut(|form| policy.apply(form))?;
            console.save().await?;
        }
        Command::Edit { name, policy } => {
            console.open_executor(&name).await?;
            console.form_mut(|form| policy.apply(form))?;
            console.save().await?;
        }
        Command::Delete { name, .. } => {
            if !console.delete_executor(&name).await? {
                info!(executor = %name, "delete cancelled");
            }
        }
        Command::Dlq(DlqCommand::Download { name, out }) => {
            if let Some(dir) = out {
                console.view_mut().set_download_dir(dir);
            }
            console.open_dlq(&name);
            console.download_dlq().await?;
        }
        Command::Dlq(DlqCommand::Clear { name, .. }) => {
            console.open_dlq(&name);
            if !console.clear_dlq().await? {
                info!(executor = %name, "dlq clear cancelled");
            }
        }
    }
    Ok(())
}
