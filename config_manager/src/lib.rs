use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Helius enhanced-transactions API configuration
    pub helius: HeliusConfig,

    /// Web server configuration
    pub api: ApiConfig,

    /// Report generation configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeliusConfig {
    /// Helius API key. May be left empty: every fetch then yields an empty
    /// transaction sequence and reports render as "no activity".
    pub api_key: String,

    /// Helius API base URL
    pub api_base_url: String,

    /// Maximum number of transactions fetched per wallet request
    pub transaction_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Maximum attempts per request (transient failures only)
    pub max_retry_attempts: u32,

    /// Delay between retry attempts in milliseconds
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server bind host
    pub host: String,

    /// Server bind port
    pub port: u16,

    /// Open the local browser on the index page after startup
    pub open_browser: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory that receives rendered per-wallet report files
    pub output_dir: String,

    /// Fixed SOL to fiat conversion rate used for the approximate values
    /// shown in reports. An acknowledged approximation, not a market quote.
    pub sol_fiat_rate: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            helius: HeliusConfig {
                api_key: "".to_string(), // Must be set in config file or PNL__HELIUS__API_KEY
                api_base_url: "https://api.helius.xyz/v0".to_string(),
                transaction_limit: 100,
                request_timeout_seconds: 30,
                max_retry_attempts: 3,
                retry_delay_ms: 250,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                open_browser: true,
            },
            report: ReportConfig {
                output_dir: "Output".to_string(),
                sol_fiat_rate: 200.0,
            },
        }
    }
}

impl HeliusConfig {
    /// Validate Helius configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Helius API base URL cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.transaction_limit == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Transaction limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ReportConfig {
    /// Validate report configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "Report output directory cannot be empty".to_string(),
            ));
        }

        if !self.sol_fiat_rate.is_finite() || self.sol_fiat_rate < 0.0 {
            return Err(ConfigurationError::InvalidValue(format!(
                "SOL fiat rate must be a non-negative number, got {}",
                self.sol_fiat_rate
            )));
        }

        Ok(())
    }
}

impl SystemConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config_builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&SystemConfig::default())?);

        // Add config file if it exists
        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        // Add environment variables with prefix
        config_builder = config_builder.add_source(
            Environment::with_prefix("PNL")
                .try_parsing(true)
                .separator("__"),
        );

        let config = config_builder.build()?;
        let system_config: SystemConfig = config.try_deserialize()?;

        // Validate configuration
        system_config.validate()?;

        Ok(system_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.helius.validate()?;
        self.report.validate()?;

        if self.api.port == 0 {
            return Err(ConfigurationError::InvalidValue(
                "API port cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}
