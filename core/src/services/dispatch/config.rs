//! Configuration for the email dispatcher

use std::time::Duration;

use ft_shared::config::OtpConfig;

/// Default subject line of verification emails
pub const DEFAULT_SUBJECT: &str = "Your FinTrack verification code";

/// Configuration for the email dispatcher
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Subject line of every verification email
    pub subject: String,
    /// Minutes quoted in the "expires in N minutes" statement
    pub expiry_minutes: u64,
    /// Upper bound on a single transport call
    pub send_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::from_otp_config(&OtpConfig::default())
    }
}

impl DispatcherConfig {
    pub fn from_otp_config(otp: &OtpConfig) -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            expiry_minutes: otp.ttl_minutes(),
            send_timeout: otp.dispatch_timeout(),
        }
    }

    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }
}
