//! Mail Transport Module
//!
//! Implementations of [`MailTransport`] used by the OTP email dispatcher.
//!
//! - **SMTP**: STARTTLS relay authenticated with externally supplied
//!   credentials
//! - **Mock**: logs messages instead of sending them; used in development
//!   and tests

use std::sync::Arc;

use ft_core::services::dispatch::MailTransport;
use ft_shared::config::{Environment, MailConfig, MailProvider};

use crate::InfrastructureError;

pub mod mock_mail;
pub mod smtp;

pub use mock_mail::MockMailTransport;
pub use smtp::SmtpMailTransport;

#[cfg(test)]
mod tests;

/// Create a mail transport based on configuration
///
/// An SMTP provider with incomplete settings is a configuration error; it
/// never falls back to the mock transport. The mock transport is refused in
/// production, where it would acknowledge codes that are never delivered.
pub fn create_mail_transport(
    config: &MailConfig,
    environment: Environment,
) -> Result<Arc<dyn MailTransport>, InfrastructureError> {
    match config.provider {
        MailProvider::Mock if environment.is_production() => Err(InfrastructureError::Config(
            "mock mail transport is not allowed in production, set MAIL_PROVIDER=smtp".to_string(),
        )),
        MailProvider::Mock => {
            tracing::warn!("Using mock mail transport, verification emails will not be delivered");
            Ok(Arc::new(MockMailTransport::new()))
        }
        MailProvider::Smtp => {
            let transport = SmtpMailTransport::new(config)?;
            Ok(Arc::new(transport))
        }
    }
}
