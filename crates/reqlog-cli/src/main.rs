//! Reqlog CLI - export logged API requests

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reqlog_cli::cli::{Cli, Commands, ExportArgs};
use reqlog_cli::config::{ConfigManager, Settings};
use reqlog_cli::export::run_export;
use reqlog_db::RequestStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level)?;

    let file_config = ConfigManager::load()?;
    let settings = Settings::resolve(cli.database_url, cli.base_url, file_config);

    match cli.command {
        Commands::Export(args) => handle_export(args, &settings).await,
    }
}

async fn handle_export(args: ExportArgs, settings: &Settings) -> Result<()> {
    let options = args
        .into_options(settings.base_url.clone())
        .context("One of --id, --chatcmpl or --requestid is required")?;

    let db = reqlog_db::connect(&settings.database_url)
        .await
        .context("Failed to connect to the request log database")?;
    let store = RequestStore::new(db);

    // A missing record is reported tersely; everything else carries context
    let destination = run_export(&store, &options).await.map_err(|e| {
        if e.is_not_found() {
            anyhow::Error::new(e)
        } else {
            anyhow::Error::new(e).context(format!("Failed to export {}", options.selector))
        }
    })?;
    debug!("Wrote {}", destination);

    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to initialize logging filter")?;

    // Exports go to stdout, so logs must not
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
