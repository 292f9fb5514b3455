//! Application configuration
//!
//! Layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`config/settlement_risk.toml` unless overridden)
//! 3. `SETTLEMENT_RISK__<SECTION>__<KEY>` environment variables
//! 4. The deployment variables `SUPABASE_URL`, `SUPABASE_KEY`, `SMTP_SERVER`,
//!    `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD` and
//!    `ALERT_EMAIL_RECIPIENTS` (comma-separated)
//!
//! A `.env` file in the working directory is read into the environment first.

use crate::domain::entities::RiskLimits;
use crate::domain::errors::DomainError;
use crate::domain::services::AggregatorConfig;
use crate::infrastructure::notifications::SmtpConfig;
use crate::infrastructure::persistence::{DEFAULT_PAGE_SIZE, TimeFrame};
use crate::infrastructure::rest::RestStoreConfig;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config/settlement_risk";

/// Prefix of structured environment variables.
pub const ENV_PREFIX: &str = "SETTLEMENT_RISK";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or merged.
    #[error("configuration load error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {field} - {reason}")]
    Invalid {
        /// Dotted key of the offending value.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Store access was requested but no URL or key is set.
    #[error("store is not configured: set SUPABASE_URL and SUPABASE_KEY")]
    MissingStore,

    /// Alert limits are invalid.
    #[error("invalid alert limits: {0}")]
    Limits(#[from] DomainError),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Alert evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// User whose stored preferences drive the preference checks.
    pub user_id: Option<String>,
    /// Desk-wide hard limits.
    pub limits: RiskLimits,
}

/// Trade loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Trade-date window.
    #[serde(deserialize_with = "deserialize_time_frame")]
    pub time_frame: TimeFrame,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            time_frame: TimeFrame::default(),
        }
    }
}

fn deserialize_time_frame<'de, D>(deserializer: D) -> Result<TimeFrame, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    TimeFrame::from_str(&s).map_err(|_| {
        serde::de::Error::custom(format!("invalid time frame '{s}', expected 7d, 30d or 90d"))
    })
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hosted store connection.
    pub store: RestStoreConfig,
    /// Alert email relay.
    pub smtp: SmtpConfig,
    /// Top-N sizes.
    pub aggregator: AggregatorConfig,
    /// Alert rules.
    pub alerts: AlertsConfig,
    /// Trade loading.
    pub load: LoadConfig,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Loads `.env`, then every layer from the default file and the process
    /// environment, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`] with an explicit file path (without or with
    /// extension).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or validation fails.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::build(file, &vars)
    }

    /// Builds the configuration from a file and an explicit variable map.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or validation fails.
    pub fn build(file: Option<&Path>, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let structured: HashMap<String, String> = vars
            .iter()
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let legacy = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let recipients = legacy("ALERT_EMAIL_RECIPIENTS").map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        });

        let settings = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(structured)),
            )
            .set_override_option("store.base_url", legacy("SUPABASE_URL"))?
            .set_override_option("store.api_key", legacy("SUPABASE_KEY"))?
            .set_override_option("smtp.server", legacy("SMTP_SERVER"))?
            .set_override_option("smtp.port", legacy("SMTP_PORT"))?
            .set_override_option("smtp.username", legacy("SMTP_USERNAME"))?
            .set_override_option("smtp.password", legacy("SMTP_PASSWORD"))?
            .set_override_option("smtp.recipients", recipients)?
            .build()?;

        let app: Self = settings.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Parses a TOML document without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed or validation fails.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        let app: Self = settings.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.telemetry.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "telemetry.level",
                format!(
                    "'{}' is not one of trace, debug, info, warn, error",
                    self.telemetry.level
                ),
            ));
        }
        if self.load.page_size == 0 {
            return Err(ConfigError::invalid("load.page_size", "must be at least 1"));
        }
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::invalid("store.timeout_ms", "must be at least 1"));
        }
        if self.aggregator.top_fails == 0 {
            return Err(ConfigError::invalid("aggregator.top_fails", "must be at least 1"));
        }
        if self.smtp.is_configured() {
            if self.smtp.port == 0 {
                return Err(ConfigError::invalid("smtp.port", "must be between 1 and 65535"));
            }
            if self.smtp.recipients.is_empty() {
                return Err(ConfigError::invalid(
                    "smtp.recipients",
                    "at least one recipient is required when a relay is set",
                ));
            }
        }
        self.alerts.limits.validate()?;
        Ok(())
    }

    /// Checks that the store URL and key are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingStore` if either is blank.
    pub fn require_store(&self) -> Result<&RestStoreConfig, ConfigError> {
        if self.store.base_url.trim().is_empty() || self.store.api_key.trim().is_empty() {
            return Err(ConfigError::MissingStore);
        }
        Ok(&self.store)
    }
}
