//! Structured logging for worldsmith tools via the `tracing` ecosystem.
//!
//! Console output carries uptime timestamps, module paths and thread names
//! (chunk workers are named `chunk-build-N`). Debug builds can also write
//! JSON lines to a file for later inspection.

use std::path::Path;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use worldsmith_config::Config;

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written into `log_dir`.
pub const LOG_FILE_NAME: &str = "worldsmith.log";

/// The filter directive the config asks for, or [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> &str {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => &config.debug.log_level,
        _ => DEFAULT_FILTER,
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the config's `debug.log_level`, which wins over
/// [`DEFAULT_FILTER`]. When `debug_build` is set and `log_dir` can be created,
/// a JSON file layer writing [`LOG_FILE_NAME`] is added.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use worldsmith_config::Config;
/// use worldsmith_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config)).ok();
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_timer(fmt::time::uptime())
            .json();

        return subscriber.with(file_layer).try_init();
    }

    subscriber.try_init()
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = Config::default();
        assert_eq!(filter_directive(Some(&config)), "info");

        config.debug.log_level = "warn,worldsmith_chunk=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "warn,worldsmith_chunk=trace");

        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,worldsmith_chunk=trace",
            "warn,worldsmith_terrain=debug,worldsmith_chunk::pipeline=trace",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_json_file_layer_writes_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join(LOG_FILE_NAME);
        let log_file = std::fs::File::create(&log_path).unwrap();

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .json(),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(resolution = 16, "built sphere chunk");
        });

        let contents = std::fs::read_to_string(&log_path).unwrap();
        let line = contents.lines().next().unwrap();
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["fields"]["message"], "built sphere chunk");
        assert_eq!(record["fields"]["resolution"], 16);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = init_logging(Some(temp_dir.path()), true, None);
        assert!(first.is_ok());
        assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
        assert!(init_logging(None, false, None).is_err());
    }
}
