use ft_core::errors::TransportError;
use ft_core::services::dispatch::{MailTransport, OutgoingEmail};
use ft_shared::config::{MailConfig, MailProvider};

use crate::mail::SmtpMailTransport;
use crate::InfrastructureError;

fn smtp_config() -> MailConfig {
    MailConfig {
        provider: MailProvider::Smtp,
        smtp_host: "smtp.example.com".to_string(),
        smtp_port: 587,
        smtp_username: "mailer@example.com".to_string(),
        smtp_password: "app-password".to_string(),
        from_address: String::new(),
        from_name: "FinTrack".to_string(),
    }
}

fn email(to: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Your FinTrack verification code".to_string(),
        html_body: "<p>Your code is 042917</p>".to_string(),
        text_body: "Your FinTrack verification code is 042917.".to_string(),
    }
}

#[test]
fn test_new_requires_credentials() {
    let config = MailConfig {
        smtp_password: String::new(),
        ..smtp_config()
    };
    assert!(matches!(
        SmtpMailTransport::new(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_new_rejects_bad_sender() {
    let config = MailConfig {
        from_address: "not an address".to_string(),
        ..smtp_config()
    };
    assert!(matches!(
        SmtpMailTransport::new(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_build_message_uses_relay_user_as_sender() {
    let transport = SmtpMailTransport::new(&smtp_config()).unwrap();
    assert_eq!(transport.provider_name(), "smtp");

    let message = transport.build_message(&email("someone@example.com")).unwrap();
    let envelope = message.envelope();
    assert_eq!(
        envelope.from().map(|a| a.to_string()),
        Some("mailer@example.com".to_string())
    );
    assert_eq!(envelope.to()[0].to_string(), "someone@example.com");

    let raw = String::from_utf8(message.formatted()).unwrap();
    assert!(raw.contains("Subject: Your FinTrack verification code"));
    assert!(raw.contains("multipart/alternative"));
}

#[tokio::test]
async fn test_invalid_recipient_fails_before_connecting() {
    let transport = SmtpMailTransport::new(&smtp_config()).unwrap();

    let result = transport.send_mail(&email("not-an-address")).await;
    assert!(matches!(result, Err(TransportError::InvalidMessage(_))));
}
