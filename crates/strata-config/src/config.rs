//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_noise::NoiseKind;

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// HTTP serving settings.
    pub server: ServerSettings,
    /// Chunk generation settings.
    pub generation: GenerationSettings,
    /// Logging settings.
    pub log: LogSettings,
}

/// HTTP serving configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind to.
    pub bind_address: String,
    /// TCP port. `0` picks a free port.
    pub port: u16,
    /// Threads accepting and answering HTTP requests.
    pub workers: usize,
    /// A request still waiting for its chunk after this long is answered with a timeout.
    pub request_timeout_ms: u64,
}

/// Chunk generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    /// World seed.
    pub seed: u32,
    /// Maximum number of chunks generated at once.
    pub max_concurrency: usize,
    /// Share one generation between concurrent requests for the same chunk.
    pub use_coalescing: bool,
    /// Noise algorithm.
    pub noise: NoiseKind,
    /// Fractal octaves per sample.
    pub octaves: u32,
    /// Amplitude falloff between octaves.
    pub persistence: f64,
    /// Scale applied to tile coordinates before sampling.
    pub frequency: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Log level filter (e.g., "debug", "info", "warn"). `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Directory for the JSON log file in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5001,
            workers: 4,
            request_timeout_ms: 30_000,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            max_concurrency: num_cpus::get(),
            use_coalescing: true,
            noise: NoiseKind::Perlin,
            octaves: 1,
            persistence: 0.5,
            frequency: 1.0,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for the server, e.g. `~/.config/strata` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("strata"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it differs from `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.max_concurrency == 0 {
            return Err(invalid("generation.max_concurrency", "must be at least 1"));
        }
        if self.server.workers == 0 {
            return Err(invalid("server.workers", "must be at least 1"));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(invalid("server.request_timeout_ms", "must be positive"));
        }
        if self.log.log_level.trim().is_empty() {
            return Err(invalid("log.log_level", "must not be empty"));
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
