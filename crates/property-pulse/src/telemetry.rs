use crate::config::TelemetryConfig;
use std::error::Error;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{value}': unable to build EnvFilter"
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(err.as_ref()),
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so CLI renderings on
/// stdout stay clean.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = resolve_filter(std::env::var("RUST_LOG").ok(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// `RUST_LOG` wins when it parses; otherwise the configured level is used.
fn resolve_filter(env_value: Option<String>, fallback: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = env_value.and_then(|value| EnvFilter::try_new(value).ok()) {
        return Ok(filter);
    }

    EnvFilter::try_new(fallback).map_err(|source| TelemetryError::EnvFilter {
        value: fallback.to_string(),
        source,
    })
}
