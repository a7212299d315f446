use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use skycast_ui::{SearchOrchestrator, TerminalSink};

#[derive(Debug, Parser)]
#[command(name = "skycast", version)]
#[command(about = "Current weather and a 5-day forecast for any city", long_about = None)]
struct Cli {
    /// Place to show at startup instead of the configured default.
    /// Further searches are read from stdin, one per line.
    place: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize core
    skycast_core::init()?;

    let app = skycast_core::App::new().context("Failed to load configuration")?;
    for warning in app.config_warnings() {
        tracing::warn!("Config warning: {}", warning);
    }

    let mut weather = app.config().weather.clone();
    if let Some(place) = cli.place.filter(|p| !p.trim().is_empty()) {
        weather.default_place = place;
    }

    tracing::info!(
        "SkyCast started (config directory: {})",
        app.config().config_dir.display()
    );

    let orchestrator = SearchOrchestrator::from_config(&weather, Arc::new(TerminalSink))
        .context("Failed to create weather clients")?;

    let mut pending = vec![orchestrator.schedule_startup_search()];

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        pending.retain(|handle| !handle.is_finished());
        pending.push(orchestrator.on_enter_key(&line));
    }

    // Let searches started before EOF render; failures are already shown
    for handle in pending {
        if let Err(e) = handle.await {
            tracing::warn!("Search task failed: {}", e);
        }
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}
