use std::fmt;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Output style for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Long-running HTTP service.
    Server,
    /// One-shot CLI command whose stdout is the report; only warnings are logged.
    Cli,
}

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

fn directive(config: &TelemetryConfig, target: LogTarget) -> String {
    match target {
        LogTarget::Server => config.log_level.clone(),
        LogTarget::Cli => "warn".to_string(),
    }
}

/// Build the filter, letting `RUST_LOG` override the configured level.
pub fn env_filter(
    config: &TelemetryConfig,
    target: LogTarget,
) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let value = directive(config, target);
    EnvFilter::try_new(&value).map_err(|source| TelemetryError::EnvFilter { value, source })
}

pub fn init(config: &TelemetryConfig, target: LogTarget) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config, target)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_target_ignores_configured_level() {
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
        };

        assert_eq!(directive(&config, LogTarget::Cli), "warn");
        assert_eq!(directive(&config, LogTarget::Server), "debug");
    }

    #[test]
    fn invalid_directive_is_reported() {
        let config = TelemetryConfig {
            log_level: "credence=loud".to_string(),
        };

        if std::env::var("RUST_LOG").is_err() {
            let result = env_filter(&config, LogTarget::Server);
            assert!(matches!(result, Err(TelemetryError::EnvFilter { .. })));
        }
    }
}
