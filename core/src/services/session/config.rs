//! Configuration for verification sessions

use std::time::Duration;

use ft_shared::config::OtpConfig;

/// Countdown period
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for verification sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Validity window of each issued code
    pub code_ttl: Duration,
    /// Countdown step; always [`TICK_INTERVAL`] since `remaining_seconds`
    /// drops by one per tick
    pub(crate) tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_otp_config(&OtpConfig::default())
    }
}

impl SessionConfig {
    pub fn from_otp_config(otp: &OtpConfig) -> Self {
        Self {
            code_ttl: otp.code_ttl(),
            tick_interval: TICK_INTERVAL,
        }
    }

    pub fn with_code_ttl(mut self, code_ttl: Duration) -> Self {
        self.code_ttl = code_ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_step_is_one_second() {
        let config = SessionConfig::default().with_code_ttl(Duration::from_secs(90));
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.code_ttl, Duration::from_secs(90));
    }

    #[test]
    fn test_from_otp_config_uses_configured_ttl() {
        let otp = OtpConfig {
            code_ttl_seconds: 120,
            ..Default::default()
        };
        let config = SessionConfig::from_otp_config(&otp);
        assert_eq!(config.code_ttl, Duration::from_secs(120));
        assert_eq!(config.tick_interval, TICK_INTERVAL);
    }
}
