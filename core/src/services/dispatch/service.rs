//! Email dispatcher implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::timeout;

use ft_shared::utils::mask::mask_email;

use crate::domain::entities::VerificationRequest;
use crate::errors::DispatchError;

use super::config::DispatcherConfig;
use super::template::{render_html, render_text};
use super::traits::{MailTransport, OtpDispatch};
use super::types::OutgoingEmail;

/// Sends verification codes by email through a [`MailTransport`]
pub struct OtpEmailDispatcher<T: MailTransport + ?Sized> {
    transport: Arc<T>,
    config: DispatcherConfig,
}

impl<T: MailTransport + ?Sized> Clone for OtpEmailDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
        }
    }
}

impl<T: MailTransport + ?Sized> OtpEmailDispatcher<T> {
    pub fn new(transport: Arc<T>, config: DispatcherConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Validate the request and deliver the code
    ///
    /// Invalid input never reaches the transport. Valid input results in
    /// exactly one transport call, bounded by the configured send timeout.
    pub async fn dispatch(&self, email: &str, code: &str) -> Result<(), DispatchError> {
        let request = match VerificationRequest::new(email, code) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(email),
                    reason = e.message(),
                    event = "otp_dispatch_rejected",
                    "Rejected verification email request"
                );
                return Err(e);
            }
        };

        let message = self.render(&request);
        let masked = mask_email(request.recipient_email());

        match timeout(self.config.send_timeout, self.transport.send_mail(&message)).await {
            Ok(Ok(())) => {
                tracing::info!(
                    email = %masked,
                    provider = self.transport.provider_name(),
                    event = "otp_dispatched",
                    "Verification email sent"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!(
                    email = %masked,
                    provider = self.transport.provider_name(),
                    error = %e,
                    event = "otp_dispatch_failed",
                    "Failed to send verification email"
                );
                Err(DispatchError::delivery_failed())
            }
            Err(_) => {
                tracing::error!(
                    email = %masked,
                    provider = self.transport.provider_name(),
                    timeout_secs = self.config.send_timeout.as_secs(),
                    event = "otp_dispatch_timeout",
                    "Timed out sending verification email"
                );
                Err(DispatchError::delivery_failed())
            }
        }
    }

    fn render(&self, request: &VerificationRequest) -> OutgoingEmail {
        OutgoingEmail {
            to: request.recipient_email().to_string(),
            subject: self.config.subject.clone(),
            html_body: render_html(request.code(), self.config.expiry_minutes),
            text_body: render_text(request.code(), self.config.expiry_minutes),
        }
    }
}

#[async_trait]
impl<T: MailTransport + ?Sized> OtpDispatch for OtpEmailDispatcher<T> {
    async fn dispatch(&self, email: &str, code: &str) -> Result<(), DispatchError> {
        OtpEmailDispatcher::dispatch(self, email, code).await
    }
}
