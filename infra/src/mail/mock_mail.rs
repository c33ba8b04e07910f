//! Mock Mail Transport
//!
//! Logs verification emails instead of sending them. Used in development
//! and by tests that need to inspect what would have been delivered. Only a
//! transport built with [`MockMailTransport::recording`] keeps an outbox.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use ft_core::errors::TransportError;
use ft_core::services::dispatch::{MailTransport, OutgoingEmail};
use ft_shared::utils::mask::mask_email;

/// Mock mail transport for development and testing
///
/// - Tracks message count
/// - Keeps accepted messages in an outbox when built with `recording`
/// - Optionally prints messages to the console
/// - Can simulate relay failures
#[derive(Clone)]
pub struct MockMailTransport {
    message_count: Arc<AtomicU64>,
    outbox: Option<Arc<Mutex<Vec<OutgoingEmail>>>>,
    simulate_failure: bool,
    console_output: bool,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock transport with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: None,
            simulate_failure,
            console_output,
        }
    }

    /// Quiet transport that keeps every accepted message for inspection
    pub fn recording(simulate_failure: bool) -> Self {
        Self {
            outbox: Some(Arc::new(Mutex::new(Vec::new()))),
            ..Self::with_options(false, simulate_failure)
        }
    }

    /// Total number of messages accepted
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Copy of every recorded message, oldest first. Empty unless recording.
    pub fn sent_messages(&self) -> Vec<OutgoingEmail> {
        self.outbox
            .as_ref()
            .map(|outbox| outbox.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .unwrap_or_default()
    }

    pub fn last_message(&self) -> Option<OutgoingEmail> {
        self.outbox.as_ref().and_then(|outbox| {
            outbox
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        })
    }

    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for MockMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send_mail(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        if self.simulate_failure {
            warn!(
                to = %mask_email(&email.to),
                "Mock mail transport simulating failure"
            );
            return Err(TransportError::Connection(
                "Simulated mail relay failure".to_string(),
            ));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(outbox) = &self.outbox {
            outbox
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(email.clone());
        }

        if self.console_output {
            println!("\n========== MOCK EMAIL ==========");
            println!("To: {}", email.to);
            println!("Subject: {}", email.subject);
            println!("{}", email.text_body);
            println!("================================\n");
        }

        info!(
            to = %mask_email(&email.to),
            count = count,
            "Mock email recorded"
        );
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
