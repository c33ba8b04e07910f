//! SMTP Relay Transport
//!
//! Sends verification emails through an authenticated STARTTLS relay.
//! Relay credentials come from configuration and never appear in logs.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, error};

use ft_core::errors::TransportError;
use ft_core::services::dispatch::{MailTransport, OutgoingEmail};
use ft_shared::config::otp::MAX_DISPATCH_TIMEOUT_SECONDS;
use ft_shared::config::MailConfig;
use ft_shared::utils::mask::mask_email;

use crate::InfrastructureError;

/// SMTP relay transport
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    host: String,
}

impl SmtpMailTransport {
    /// Build a transport for the configured relay
    ///
    /// No connection is opened until the first message is sent.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "SMTP_HOST, SMTP_USERNAME and SMTP_PASSWORD must be set for the smtp provider"
                    .to_string(),
            ));
        }

        let address: Address = config.sender_address().parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid sender address: {}", e))
        })?;
        let sender = Mailbox::new(Some(config.from_name.clone()), address);

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Smtp(format!("Failed to create SMTP transport: {}", e)))?
            .credentials(credentials)
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(MAX_DISPATCH_TIMEOUT_SECONDS)))
            .build();

        debug!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP mail transport initialized"
        );

        Ok(Self {
            transport,
            sender,
            host: config.smtp_host.clone(),
        })
    }

    /// Assemble a multipart (plain text + HTML) message
    pub fn build_message(&self, email: &OutgoingEmail) -> Result<Message, TransportError> {
        let recipient: Mailbox = email
            .to
            .parse()
            .map_err(|e| TransportError::InvalidMessage(format!("Invalid recipient: {}", e)))?;

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|e| TransportError::InvalidMessage(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send_mail(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let message = self.build_message(email)?;

        match self.transport.send(message).await {
            Ok(_) => {
                debug!(
                    to = %mask_email(&email.to),
                    host = %self.host,
                    "Email accepted by SMTP relay"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    to = %mask_email(&email.to),
                    host = %self.host,
                    error = %e,
                    "SMTP relay refused or failed"
                );
                if e.is_permanent() {
                    Err(TransportError::Rejected(e.to_string()))
                } else {
                    Err(TransportError::Connection(e.to_string()))
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        "smtp"
    }
}
