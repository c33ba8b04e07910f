//! Traits for mail transport integration and code dispatch

use async_trait::async_trait;

use crate::errors::{DispatchError, TransportError};

use super::types::OutgoingEmail;

/// Trait for mail transport integration (SMTP relay, mock, ...)
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a single message
    async fn send_mail(&self, message: &OutgoingEmail) -> Result<(), TransportError>;
    /// Short name used in logs
    fn provider_name(&self) -> &str;
}

/// Anything able to deliver a verification code to an email address
///
/// Implemented in-process by [`super::OtpEmailDispatcher`] and remotely by
/// the RPC client in the infrastructure crate.
#[async_trait]
pub trait OtpDispatch: Send + Sync {
    async fn dispatch(&self, email: &str, code: &str) -> Result<(), DispatchError>;
}
