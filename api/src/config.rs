use std::env;
use std::path::PathBuf;

use ft_shared::config::{AppConfig, ConfigError};

/// Variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "FINTRACK_CONFIG";

/// Load the server configuration
///
/// Plain environment variables form the base layer. A TOML file (the one
/// named by `FINTRACK_CONFIG`, otherwise the environment's default file if
/// present) and `FINTRACK__*` overrides are layered on top.
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
    AppConfig::load(path.as_deref())
}
