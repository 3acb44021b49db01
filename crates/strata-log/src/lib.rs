//! Structured logging for the chunk server.
//!
//! Console output with uptime timestamps and module paths, plus JSON file logging in debug
//! builds. The level comes from `RUST_LOG` when set, otherwise from the config.

use std::path::Path;

use strata_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config specify one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written into the log directory.
pub const LOG_FILE_NAME: &str = "strata.log";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file. Falls back to `config.log.log_dir`.
/// * `debug_build` - file logging is only enabled when this is set.
/// * `config` - source of the log level.
///
/// Panics if a global subscriber is already installed.
///
/// ```no_run
/// use strata_config::Config;
/// use strata_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true) // request workers and blocking generators are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let log_dir = log_dir.or_else(|| config.and_then(|c| c.log.log_dir.as_deref()));
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter directives `init_logging` uses when `RUST_LOG` is unset.
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.log.log_level.trim().is_empty() => {
            config.log.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(filter_directives(None), "info");

        let mut config = Config::default();
        config.log.log_level = "   ".to_string();
        assert_eq!(filter_directives(Some(&config)), "info");
    }

    #[test]
    fn test_config_level_used() {
        let mut config = Config::default();
        config.log.log_level = "debug,strata_provider=trace".to_string();
        let directives = filter_directives(Some(&config));
        assert_eq!(directives, "debug,strata_provider=trace");

        let filter = EnvFilter::try_new(&directives).unwrap();
        assert!(filter.to_string().contains("strata_provider=trace"));
    }

    #[test]
    fn test_env_filter_parsing() {
        for directives in [
            "info",
            "warn,strata_server=debug",
            "debug,strata_provider=trace,tiny_http=warn",
            "error",
        ] {
            assert!(
                EnvFilter::try_new(directives).is_ok(),
                "Failed to parse filter: {directives}"
            );
        }
    }

    #[test]
    fn test_file_logging_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = std::fs::File::create(dir.path().join(LOG_FILE_NAME)).unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false)
                .json(),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(seed = 42, "chunk provider created");
        });

        let contents = std::fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
        assert!(contents.contains("\"message\":\"chunk provider created\""));
        assert!(contents.contains("\"seed\":42"));
    }
}
