use ft_core::errors::TransportError;
use ft_core::services::dispatch::{MailTransport, OutgoingEmail};
use ft_shared::config::{Environment, MailConfig, MailProvider};

use crate::mail::{create_mail_transport, MockMailTransport};
use crate::InfrastructureError;

fn email(to: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Your FinTrack verification code".to_string(),
        html_body: "<p>042917</p>".to_string(),
        text_body: "Your FinTrack verification code is 042917.".to_string(),
    }
}

#[test]
fn test_mock_records_messages() {
    let transport = MockMailTransport::recording(false);

    tokio_test::block_on(transport.send_mail(&email("a@b.co"))).unwrap();
    tokio_test::block_on(transport.send_mail(&email("c@d.co"))).unwrap();

    assert_eq!(transport.message_count(), 2);
    assert_eq!(transport.sent_messages().len(), 2);
    assert_eq!(transport.last_message().unwrap().to, "c@d.co");
    assert_eq!(transport.provider_name(), "mock");
}

#[test]
fn test_mock_clones_share_outbox() {
    let transport = MockMailTransport::recording(false);
    let clone = transport.clone();

    tokio_test::block_on(clone.send_mail(&email("a@b.co"))).unwrap();
    assert_eq!(transport.message_count(), 1);
    assert_eq!(transport.last_message().unwrap().to, "a@b.co");
}

#[test]
fn test_mock_without_recording_keeps_no_messages() {
    let transport = MockMailTransport::with_options(false, false);

    tokio_test::block_on(transport.send_mail(&email("a@b.co"))).unwrap();

    assert_eq!(transport.message_count(), 1);
    assert!(transport.sent_messages().is_empty());
    assert!(transport.last_message().is_none());
}

#[test]
fn test_mock_simulated_failure() {
    let mut transport = MockMailTransport::with_options(false, false);
    transport.set_simulate_failure(true);

    let result = tokio_test::block_on(transport.send_mail(&email("a@b.co")));
    assert!(matches!(result, Err(TransportError::Connection(_))));
    assert_eq!(transport.message_count(), 0);
}

#[test]
fn test_factory_defaults_to_mock() {
    let transport =
        create_mail_transport(&MailConfig::default(), Environment::Development).unwrap();
    assert_eq!(transport.provider_name(), "mock");
}

#[test]
fn test_factory_rejects_mock_in_production() {
    let result = create_mail_transport(&MailConfig::default(), Environment::Production);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_factory_rejects_incomplete_smtp_config() {
    let config = MailConfig {
        provider: MailProvider::Smtp,
        smtp_host: "smtp.example.com".to_string(),
        ..Default::default()
    };
    assert!(create_mail_transport(&config, Environment::Development).is_err());
}
