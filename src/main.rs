mod cli;
mod commands;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::Outcome;
use store::DataDir;

/// The main entry point for the Orderdesk application.
fn main() -> Result<()> {
    // Load ORDERDESK_* overrides from a .env file, if there is one.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("Failed to read .env file");
        }
    }

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    let _log_guard = configuration::init_logging(&config.logging)?;

    let data_dir = DataDir::open(config.storage.data_dir.clone()).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.storage.data_dir.display()
        )
    })?;
    let mut store = data_dir
        .load()
        .with_context(|| format!("Failed to load records from {}", data_dir.root().display()))?;
    tracing::debug!(
        customers = store.customer_count(),
        products = store.product_count(),
        orders = store.order_count(),
        "Records loaded."
    );

    // Execute the appropriate command
    let mut stdout = std::io::stdout().lock();
    let outcome = commands::dispatch(cli.command, &mut store, &config, &mut stdout)?;

    if outcome == Outcome::Changed {
        data_dir
            .save(&store)
            .with_context(|| format!("Failed to save records to {}", data_dir.root().display()))?;
        tracing::debug!(path = %data_dir.root().display(), "Records saved.");
    }

    Ok(())
}
