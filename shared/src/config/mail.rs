//! Mail transport configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Which mail transport backs the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Authenticated SMTP relay
    Smtp,
    /// Logs messages instead of sending them
    #[default]
    Mock,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "mock" => Ok(MailProvider::Mock),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// SMTP relay settings. Credentials are supplied externally.
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Transport selection
    #[serde(default)]
    pub provider: MailProvider,
    /// Relay host name (STARTTLS)
    #[serde(default)]
    pub smtp_host: String,
    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Relay user
    #[serde(default)]
    pub smtp_username: String,
    /// Relay password
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address; falls back to the relay user when empty
    #[serde(default)]
    pub from_address: String,
    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("provider", &self.provider)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::new(),
            from_name: default_from_name(),
        }
    }
}

impl MailConfig {
    /// Load mail settings from the process environment
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env::var("MAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            smtp_host: env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: env::var("MAIL_FROM_ADDRESS").unwrap_or_default(),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or(defaults.from_name),
        }
    }

    /// Address used in the `From` header
    pub fn sender_address(&self) -> &str {
        if self.from_address.is_empty() {
            &self.smtp_username
        } else {
            &self.from_address
        }
    }

    /// Whether enough is configured to talk to a relay
    pub fn has_credentials(&self) -> bool {
        !self.smtp_host.is_empty() && !self.smtp_username.is_empty() && !self.smtp_password.is_empty()
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    String::from("FinTrack")
}
