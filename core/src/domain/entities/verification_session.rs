//! Client-side state of one in-progress email verification.
//!
//! The entity is a plain state machine driven by explicit timestamps; the
//! session controller in `services::session` owns the clock, the dispatcher
//! and the countdown task.
//!
//! ```text
//! Pending --6 digits--> Verifying --match--> Verified
//!    ^                      |
//!    +------- Failed <------+ mismatch (input cleared, code kept)
//!
//! Pending/Verifying --ttl elapsed--> Expired --resend--> Pending
//! ```

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::Serialize;

use ft_shared::config::otp::MAX_CODE_TTL_SECONDS;
use ft_shared::utils::mask::mask_email;
pub use ft_shared::utils::validation::OTP_CODE_LENGTH as CODE_LENGTH;

use crate::errors::SessionError;

/// Attempt state of a verification session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptState {
    /// Code issued, awaiting input
    Pending,
    /// Six digits entered, comparing
    Verifying,
    /// Terminal success
    Verified,
    /// Validity window elapsed; only a resend restarts the cycle
    Expired,
    /// Comparison mismatch; immediately returns to `Pending`
    Failed,
}

impl AttemptState {
    /// States in which an issued code is outstanding
    pub fn is_active(&self) -> bool {
        matches!(self, AttemptState::Pending | AttemptState::Verifying)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Verified | AttemptState::Expired)
    }
}

/// Result of the most recent comparison or expiry, kept for UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    Verified,
    Mismatch,
    Expired,
}

/// Read-only snapshot handed to the UI after every event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub masked_email: String,
    pub state: AttemptState,
    pub entered_code: String,
    pub remaining_seconds: u64,
    pub failed_attempts: u32,
    pub last_outcome: Option<AttemptOutcome>,
    pub dispatching: bool,
    pub can_resend: bool,
}

/// State of a single verification attempt
#[derive(Debug, Clone)]
pub struct VerificationSession {
    email: String,
    issued_code: Option<String>,
    entered_code: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    attempt_state: AttemptState,
    remaining_seconds: u64,
    failed_attempts: u32,
    last_outcome: Option<AttemptOutcome>,
}

// Bounded so the expiry timestamp cannot overflow.
fn window_seconds(ttl: std::time::Duration) -> u64 {
    ttl.as_secs().min(MAX_CODE_TTL_SECONDS)
}

impl VerificationSession {
    /// Create a session for a code that was just dispatched
    pub fn issue(
        email: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: std::time::Duration,
    ) -> Self {
        let ttl_seconds = window_seconds(ttl);
        Self {
            email: email.into(),
            issued_code: Some(code.into()),
            entered_code: String::with_capacity(CODE_LENGTH),
            issued_at: now,
            expires_at: now + Duration::seconds(ttl_seconds as i64),
            attempt_state: AttemptState::Pending,
            remaining_seconds: ttl_seconds,
            failed_attempts: 0,
            last_outcome: None,
        }
    }

    /// Replace the outstanding code after a successful resend
    ///
    /// The previous code stops being accepted, input is cleared and the
    /// validity window restarts at `now`.
    pub fn reissue(
        &mut self,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: std::time::Duration,
    ) -> Result<(), SessionError> {
        if self.attempt_state == AttemptState::Verified {
            return Err(SessionError::AlreadyVerified);
        }

        let ttl_seconds = window_seconds(ttl);
        self.issued_code = Some(code.into());
        self.entered_code.clear();
        self.issued_at = now;
        self.expires_at = now + Duration::seconds(ttl_seconds as i64);
        self.attempt_state = AttemptState::Pending;
        self.remaining_seconds = ttl_seconds;
        self.last_outcome = None;
        Ok(())
    }

    /// Append a digit; the sixth digit triggers the comparison
    ///
    /// Returns `false` when the digit was ignored (not an ASCII digit, buffer
    /// full, or the session is not awaiting input).
    pub fn enter_digit(&mut self, digit: char, now: DateTime<Utc>) -> bool {
        if self.attempt_state != AttemptState::Pending
            || !digit.is_ascii_digit()
            || self.entered_code.len() >= CODE_LENGTH
        {
            return false;
        }

        self.entered_code.push(digit);
        self.last_outcome = None;

        if self.entered_code.len() == CODE_LENGTH {
            self.attempt_state = AttemptState::Verifying;
            self.compare(now);
        }
        true
    }

    /// Remove the last digit, leaving `Verifying` if needed
    pub fn backspace(&mut self) -> bool {
        if !self.attempt_state.is_active() {
            return false;
        }

        let removed = self.entered_code.pop().is_some();
        self.attempt_state = AttemptState::Pending;
        removed
    }

    /// One countdown step
    ///
    /// Returns `false` once the session no longer needs ticking.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if !self.attempt_state.is_active() {
            return false;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 || now >= self.expires_at {
            self.expire();
            return false;
        }
        true
    }

    /// Force the session into `Expired`, dropping the outstanding code
    pub fn expire(&mut self) {
        if !self.attempt_state.is_active() {
            return;
        }

        self.attempt_state = AttemptState::Expired;
        self.issued_code = None;
        self.entered_code.clear();
        self.remaining_seconds = 0;
        self.last_outcome = Some(AttemptOutcome::Expired);
    }

    // Expiry takes precedence over a matching code.
    fn compare(&mut self, now: DateTime<Utc>) {
        if now >= self.expires_at {
            self.expire();
            return;
        }

        let matches = self
            .issued_code
            .as_deref()
            .is_some_and(|issued| codes_match(issued, &self.entered_code));

        if matches {
            self.attempt_state = AttemptState::Verified;
            self.issued_code = None;
            self.last_outcome = Some(AttemptOutcome::Verified);
        } else {
            self.attempt_state = AttemptState::Failed;
            self.failed_attempts += 1;
            self.last_outcome = Some(AttemptOutcome::Mismatch);
            self.entered_code.clear();
            self.attempt_state = AttemptState::Pending;
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn issued_code(&self) -> Option<&str> {
        self.issued_code.as_deref()
    }

    pub fn entered_code(&self) -> &str {
        &self.entered_code
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn state(&self) -> AttemptState {
        self.attempt_state
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn last_outcome(&self) -> Option<AttemptOutcome> {
        self.last_outcome
    }

    /// Snapshot for display; `dispatching` is owned by the session controller
    pub fn view(&self, dispatching: bool) -> SessionView {
        SessionView {
            masked_email: mask_email(&self.email),
            state: self.attempt_state,
            entered_code: self.entered_code.clone(),
            remaining_seconds: self.remaining_seconds,
            failed_attempts: self.failed_attempts,
            last_outcome: self.last_outcome,
            dispatching,
            can_resend: !dispatching && self.attempt_state != AttemptState::Verified,
        }
    }
}

fn codes_match(issued: &str, entered: &str) -> bool {
    issued.len() == entered.len() && constant_time_eq(issued.as_bytes(), entered.as_bytes())
}
