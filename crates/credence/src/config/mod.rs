use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::passport::{PassportConfig, DEFAULT_PASSPORT_TTL_DAYS, MAX_PASSPORT_TTL_DAYS};
use crate::scoring::{UnknownWeightProfile, WeightProfile};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub passport: PassportConfig,
    pub signals: SignalSourceConfig,
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

        let weight_profile = match env::var("CREDENCE_WEIGHT_PROFILE") {
            Ok(raw) => raw.parse::<WeightProfile>()?,
            Err(_) => WeightProfile::default(),
        };

        let share_base_url = env::var("CREDENCE_SHARE_BASE_URL")
            .unwrap_or_else(|_| PassportConfig::default().share_base_url);
        let ttl_days = match env::var("CREDENCE_PASSPORT_TTL_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| (1..=MAX_PASSPORT_TTL_DAYS).contains(days))
                .ok_or(ConfigError::InvalidPassportTtl)?,
            Err(_) => DEFAULT_PASSPORT_TTL_DAYS,
        };

        let csv_path = env::var("CREDENCE_SIGNALS_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig { weight_profile },
            passport: PassportConfig {
                ttl_days,
                share_base_url,
            },
            signals: SignalSourceConfig { csv_path },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which weight profile the scoring engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub weight_profile: WeightProfile,
}

/// Where persona signals come from; fixtures unless a CSV export is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalSourceConfig {
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWeightProfile(UnknownWeightProfile),
    InvalidPassportTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWeightProfile(err) => {
                write!(f, "CREDENCE_WEIGHT_PROFILE is invalid: {err}")
            }
            ConfigError::InvalidPassportTtl => {
                write!(
                    f,
                    "CREDENCE_PASSPORT_TTL_DAYS must be between 1 and {MAX_PASSPORT_TTL_DAYS} days"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPassportTtl => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeightProfile(err) => Some(err),
        }
    }
}

impl From<UnknownWeightProfile> for ConfigError {
    fn from(value: UnknownWeightProfile) -> Self {
        Self::InvalidWeightProfile(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("CREDENCE_WEIGHT_PROFILE");
        env::remove_var("CREDENCE_SHARE_BASE_URL");
        env::remove_var("CREDENCE_PASSPORT_TTL_DAYS");
        env::remove_var("CREDENCE_SIGNALS_CSV");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring.weight_profile, WeightProfile::Standard);
        assert_eq!(config.passport.ttl_days, 30);
        assert!(config.signals.csv_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_scoring_and_passport_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDENCE_WEIGHT_PROFILE", "client_preview");
        env::set_var("CREDENCE_PASSPORT_TTL_DAYS", "7");
        env::set_var("CREDENCE_SHARE_BASE_URL", "https://credence.example");
        env::set_var("CREDENCE_SIGNALS_CSV", "data/signals.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.weight_profile, WeightProfile::ClientPreview);
        assert_eq!(config.passport.ttl_days, 7);
        assert_eq!(config.passport.share_base_url, "https://credence.example");
        assert_eq!(
            config.signals.csv_path,
            Some(PathBuf::from("data/signals.csv"))
        );
        reset_env();
    }

    #[test]
    fn rejects_unknown_weight_profile_and_bad_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDENCE_WEIGHT_PROFILE", "aggressive");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidWeightProfile(_))
        ));

        reset_env();
        env::set_var("CREDENCE_PASSPORT_TTL_DAYS", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPassportTtl)
        ));
        reset_env();
    }

    #[test]
    fn passport_ttl_is_bounded_above() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDENCE_PASSPORT_TTL_DAYS", "200000000");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPassportTtl)
        ));

        env::set_var("CREDENCE_PASSPORT_TTL_DAYS", "3650");
        let config = AppConfig::load().expect("upper bound accepted");
        assert_eq!(config.passport.ttl_days, 3650);
        reset_env();
    }
}
