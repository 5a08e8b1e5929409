/*
[INPUT]:  CLI arguments, layered configuration, OS shutdown signals
[OUTPUT]: Interactive task TUI, one-shot task listing, or effective config dump
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
[UPDATE]: 2026-10-13 Replace strategy runner with taskdesk subcommands
*/

mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use taskdesk_tui::logging::{LOG_BUFFER_CAPACITY, LogBuffer, LogSink, init_tracing};
use taskdesk_tui::{AppConfig, TaskListView, render_listing};

#[derive(Parser, Debug)]
#[command(name = "taskdesk", version, about = "Terminal client for a remote task list service")]
struct Cli {
    /// YAML config file; defaults to the per-user config when present
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Task service base URL, e.g. http://localhost:5000
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Browse and edit tasks interactively (default)
    Tui,
    /// Print every task with its comments and exit
    List,
    /// Print the effective configuration as YAML and exit
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    config.apply_overrides(args.base_url, args.log_level);

    match args.command.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(config).await,
        Command::List => run_list(config).await,
        Command::Config => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

async fn run_tui(config: AppConfig) -> Result<()> {
    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let _log_guard = init_tracing(&config.log, LogSink::Buffer(log_buffer.clone()))?;
    info!(base_url = %config.api.base_url, "starting taskdesk tui");

    let client = config.api.build_client()?;
    tui::run_tui(TaskListView::new(client), log_buffer).await
}

async fn run_list(config: AppConfig) -> Result<()> {
    let _log_guard = init_tracing(&config.log, LogSink::Stderr)?;
    let client = config.api.build_client()?;
    let mut view = TaskListView::new(client);

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    tokio::select! {
        result = view.load_tasks() => {
            result.with_context(|| format!("load tasks from {}", config.api.base_url))?;
        }
        _ = shutdown.cancelled() => bail!("interrupted before tasks loaded"),
    }

    print!("{}", render_listing(&view));
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
