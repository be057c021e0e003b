#![deny(warnings)]

use anyhow::anyhow;
use clap::{crate_authors, crate_description, crate_version, Arg, Command};
use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc};
use tracing::info;
use twinprobe::{
    api::Api,
    config::{Config, RawConfig},
    database::Database,
    network::{HttpModuleRegistry, Network, TokenProvider},
    scheduler::TaskScheduler,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().flatten_event(true).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    // Install default crypto provider.
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install default RusTLS crypto provider.");

    let matches = Command::new("Twinprobe scheduler.")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("TWINPROBE_CONFIG")
                .short('c')
                .long("config")
                .default_value("twinprobe.toml")
                .help("Path to the Twinprobe configuration file."),
        )
        .get_matches();

    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!(config = ?raw_config, "Twinprobe raw configuration.");

    run(raw_config).await
}

async fn run(raw_config: RawConfig) -> Result<(), anyhow::Error> {
    let database = Database::create(
        PgPoolOptions::new()
            .max_connections(raw_config.db.max_connections)
            .connect(&Database::connection_url(&raw_config.db))
            .await?,
    )
    .await?;

    let config = Config::from(raw_config);
    let registry = HttpModuleRegistry::new(config.dtm.url.clone(), config.dtm.invoke_timeout)?;
    let tokens = TokenProvider::new(config.auth.clone(), config.dtm.invoke_timeout)?;
    let network = Network::new(registry, tokens, config.dtm.invoke_timeout)?;

    let api = Arc::new(Api::new(config, database, network));
    let scheduler = TaskScheduler::start(api).await?;

    info!("Twinprobe scheduler is running, press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Shutting down Twinprobe scheduler.");
    scheduler.shutdown().await
}
