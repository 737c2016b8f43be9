//! TimeGrid client shell.
//!
//! Wires configuration, logging, storage, transport, session, and
//! navigation together, then dispatches one CLI command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod context;

use commands::Cli;
use context::AppContext;
use timegrid_core::config::AppConfig;
use timegrid_core::error::AppError;
use timegrid_core::events::SessionEvent;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(false).init();
        }
    }
}

/// Build the component graph, bootstrap the session, run the command.
async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let ctx = AppContext::build(&config).await?;

    // The transport layer only broadcasts an invalidated session; reacting
    // to it is the navigation layer's job.
    let mut invalidated = ctx.events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = invalidated.recv().await {
            if matches!(event, SessionEvent::Invalidated) {
                tracing::warn!("Session invalidated; the next navigation redirects to login");
            }
        }
    });

    // Bootstrap once, before any navigation is authorized.
    ctx.session.init().await;

    cli.execute(&ctx).await
}
