//! Configuration for the chunk server.
//!
//! Settings persist to disk as `config.ron`. Missing sections and fields fall back to their
//! defaults and unknown fields are ignored, so older and newer files both load. Command-line
//! flags override whatever the file says.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, GenerationSettings, LogSettings, ServerSettings};
pub use error::ConfigError;
