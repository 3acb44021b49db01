//! Command-line arguments for the chunk server.

use std::path::PathBuf;

use clap::Parser;
use strata_noise::NoiseKind;

use crate::Config;

/// Strata chunk server command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata-server", about = "On-demand terrain chunk server")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Maximum number of chunks generated at once.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Disable request coalescing.
    #[arg(long)]
    pub no_coalescing: bool,

    /// Noise algorithm (value, perlin).
    #[arg(long)]
    pub noise: Option<NoiseKind>,

    /// Address to bind the HTTP server to.
    #[arg(long)]
    pub bind: Option<String>,

    /// HTTP port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(threads) = args.threads {
            self.generation.max_concurrency = threads;
        }
        if args.no_coalescing {
            self.generation.use_coalescing = false;
        }
        if let Some(noise) = args.noise {
            self.generation.noise = noise;
        }
        if let Some(ref bind) = args.bind {
            self.server.bind_address = bind.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(ref level) = args.log_level {
            self.log.log_level = level.clone();
        }
    }
}
