use clap::Parser;
use tracing::debug;

use quote_cli::cli::Cli;
use quote_cli::{app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = app::load_config(&cli)?;
    logging::init_logging(&config.logging.level, config.logging.file.as_deref())?;
    debug!(?config, "configuration loaded");

    app::run(cli.command, &config).await
}
