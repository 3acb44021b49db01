use std::path::PathBuf;

use clap::Parser;
use strata_config::{CliArgs, Config};
use strata_server::{ChunkServer, provider_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args);
    config.validate()?;

    strata_log::init_logging(None, cfg!(debug_assertions), Some(&config));
    tracing::info!(config_dir = %config_dir.display(), "starting strata server");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("strata-runtime")
        .enable_all()
        .build()?;

    let provider = strata_provider::create_provider(&provider_config(&config.generation))?;
    let server = ChunkServer::start(&config.server, provider, runtime.handle().clone())?;

    runtime.block_on(tokio::signal::ctrl_c())?;
    tracing::info!("shutdown requested");
    server.shutdown()?;
    Ok(())
}
