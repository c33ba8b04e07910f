//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and default log filters
//! - `mail` - SMTP relay / mock transport selection and credentials
//! - `otp` - Code validity window and dispatch timeout
//! - `server` - HTTP server and CORS configuration

pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use config::ConfigError;
pub use environment::Environment;
pub use mail::{MailConfig, MailProvider};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Prefix for layered environment overrides, e.g. `FINTRACK__MAIL__SMTP_HOST`
pub const ENV_PREFIX: &str = "FINTRACK";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Mail transport configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// OTP timing configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from plain environment variables
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            mail: MailConfig::from_env(),
            otp: OtpConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }

    /// Layer an optional TOML file and `FINTRACK__*` variables over [`AppConfig::from_env`]
    ///
    /// When `path` is `None` the environment's default file name
    /// (e.g. `config.production.toml`) is tried; a missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = Self::from_env();
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(base.environment.config_file()).required(false),
        };

        Config::builder()
            .add_source(Config::try_from(&base)?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?
            .try_deserialize()
    }
}
