//! One-time passcode timing configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Validity window of an issued code
pub const DEFAULT_CODE_TTL_SECONDS: u64 = 300;

/// Longest validity window a configuration may request (one day)
pub const MAX_CODE_TTL_SECONDS: u64 = 86_400;

/// Upper bound for a single dispatch call, network included
pub const MAX_DISPATCH_TIMEOUT_SECONDS: u64 = 30;

/// Timing knobs shared by the dispatcher and client sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds an issued code stays valid
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,

    /// Seconds before an in-flight dispatch is abandoned
    #[serde(default = "default_dispatch_timeout_seconds")]
    pub dispatch_timeout_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            dispatch_timeout_seconds: MAX_DISPATCH_TIMEOUT_SECONDS,
        }
    }
}

impl OtpConfig {
    /// Load from `OTP_CODE_TTL_SECONDS` / `OTP_DISPATCH_TIMEOUT_SECONDS`
    pub fn from_env() -> Self {
        Self {
            code_ttl_seconds: env::var("OTP_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_CODE_TTL_SECONDS),
            dispatch_timeout_seconds: env::var("OTP_DISPATCH_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_DISPATCH_TIMEOUT_SECONDS),
        }
    }

    /// Code validity, clamped to `1..=86400` seconds
    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(self.code_ttl_seconds.clamp(1, MAX_CODE_TTL_SECONDS))
    }

    /// Dispatch timeout, clamped to `1..=30` seconds
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(
            self.dispatch_timeout_seconds
                .clamp(1, MAX_DISPATCH_TIMEOUT_SECONDS),
        )
    }

    /// Whole minutes shown in the email body ("expires in N minutes")
    pub fn ttl_minutes(&self) -> u64 {
        self.code_ttl().as_secs().div_ceil(60).max(1)
    }
}

fn default_code_ttl_seconds() -> u64 {
    DEFAULT_CODE_TTL_SECONDS
}

fn default_dispatch_timeout_seconds() -> u64 {
    MAX_DISPATCH_TIMEOUT_SECONDS
}
