use chrono_tz::Tz;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_REPORTS_BASE_URL: &str = "https://apis.entrata.com/ext/orgs/aamliving/v1";
const DEFAULT_PROPERTY_ID: u64 = 100082999;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Where report payloads come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Live,
    Fixture,
}

impl SourceMode {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" | "http" => Ok(Self::Live),
            "fixture" | "fixtures" | "fake" => Ok(Self::Fixture),
            _ => Err(ConfigError::InvalidSource {
                value: value.to_string(),
            }),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub reports: ReportsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            reports: ReportsConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Reporting API access and the calendar the report periods are computed in.
#[derive(Clone)]
pub struct ReportsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub property_id: u64,
    pub timezone: Tz,
    pub source: SourceMode,
}

impl ReportsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("REPORTS_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REPORTS_BASE_URL.to_string());
        let api_key = env::var("REPORTS_API_KEY").unwrap_or_default();

        let timeout_secs = match env::var("REPORTS_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let property_id = match env::var("REPORTS_PROPERTY_ID") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidPropertyId)?,
            Err(_) => DEFAULT_PROPERTY_ID,
        };

        let timezone = match env::var("REPORTS_TIMEZONE") {
            Ok(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone { value: raw })?,
            Err(_) => chrono_tz::America::Chicago,
        };

        let source = match env::var("REPORTS_SOURCE") {
            Ok(raw) => SourceMode::parse(&raw)?,
            Err(_) => SourceMode::Live,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            property_id,
            timezone,
            source,
        })
    }

    pub fn report_endpoint(&self) -> String {
        format!("{}/reports", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ReportsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("property_id", &self.property_id)
            .field("timezone", &self.timezone)
            .field("source", &self.source)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidPropertyId,
    InvalidTimezone { value: String },
    InvalidSource { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(
                    f,
                    "REPORTS_TIMEOUT_SECS must be a positive number of seconds"
                )
            }
            ConfigError::InvalidPropertyId => {
                write!(f, "REPORTS_PROPERTY_ID must be a numeric property group id")
            }
            ConfigError::InvalidTimezone { value } => {
                write!(
                    f,
                    "REPORTS_TIMEZONE '{value}' is not a known IANA time zone"
                )
            }
            ConfigError::InvalidSource { value } => {
                write!(f, "REPORTS_SOURCE '{value}' must be 'live' or 'fixture'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
