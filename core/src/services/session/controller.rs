//! Verification session controller
//!
//! Owns one [`VerificationSession`] and everything around it: code
//! generation, dispatch, the countdown task and teardown. All mutations go
//! through a single `std::sync::Mutex`, which is never held across an
//! `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use ft_shared::utils::mask::mask_email;

use crate::domain::entities::{AttemptOutcome, AttemptState, SessionView, VerificationSession};
use crate::errors::SessionError;
use crate::services::dispatch::OtpDispatch;

use super::clock::{Clock, SystemClock};
use super::code::generate_otp_code;
use super::config::SessionConfig;

struct Slot {
    state: VerificationSession,
    dispatching: bool,
    torn_down: bool,
    // Bumped on every reissue; a countdown task only acts on its own generation.
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

impl Slot {
    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the dispatching flag if a resend future is dropped mid-flight
struct DispatchGuard {
    slot: Arc<Mutex<Slot>>,
    armed: bool,
}

impl DispatchGuard {
    fn finish(mut self, slot: &mut Slot) {
        slot.dispatching = false;
        self.armed = false;
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        if self.armed {
            lock(&self.slot).dispatching = false;
        }
    }
}

/// An email verification in progress
///
/// Created by [`OtpVerificationSession::start`] once the first code has been
/// delivered. Dropping the session tears it down.
pub struct OtpVerificationSession<D: OtpDispatch + ?Sized, K: Clock = SystemClock> {
    email: String,
    dispatcher: Arc<D>,
    clock: Arc<K>,
    config: SessionConfig,
    slot: Arc<Mutex<Slot>>,
}

impl<D: OtpDispatch + ?Sized, K: Clock> OtpVerificationSession<D, K> {
    /// Generate a code, dispatch it and start the countdown
    ///
    /// On dispatch failure no session exists and the error is returned.
    /// Dropping the returned future before it resolves abandons the attempt.
    pub async fn start(
        email: impl Into<String>,
        dispatcher: Arc<D>,
        clock: Arc<K>,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let email = email.into();
        let code = generate_otp_code();

        dispatcher.dispatch(&email, &code).await?;

        let state = VerificationSession::issue(email.clone(), code, clock.now(), config.code_ttl);
        let slot = Arc::new(Mutex::new(Slot {
            state,
            dispatching: false,
            torn_down: false,
            generation: 0,
            ticker: None,
        }));

        let session = Self {
            email,
            dispatcher,
            clock,
            config,
            slot,
        };
        {
            let mut slot = lock(&session.slot);
            slot.ticker = Some(session.spawn_ticker(0));
        }

        tracing::info!(
            email = %mask_email(&session.email),
            ttl_secs = session.config.code_ttl.as_secs(),
            event = "otp_session_started",
            "Verification session started"
        );
        Ok(session)
    }

    /// Send a fresh code, invalidating the outstanding one
    ///
    /// Rejected while another dispatch is in flight, after verification and
    /// after teardown. On failure the current state is left untouched. A
    /// result that arrives after teardown is discarded.
    pub async fn resend(&self) -> Result<SessionView, SessionError> {
        let guard = {
            let mut slot = lock(&self.slot);
            if slot.torn_down {
                return Err(SessionError::TornDown);
            }
            if slot.dispatching {
                return Err(SessionError::DispatchInProgress);
            }
            if slot.state.state() == AttemptState::Verified {
                return Err(SessionError::AlreadyVerified);
            }
            slot.dispatching = true;
            DispatchGuard {
                slot: Arc::clone(&self.slot),
                armed: true,
            }
        };

        let code = generate_otp_code();
        let result = self.dispatcher.dispatch(&self.email, &code).await;

        let mut slot = lock(&self.slot);
        guard.finish(&mut slot);

        if slot.torn_down {
            tracing::debug!(
                email = %mask_email(&self.email),
                event = "otp_resend_discarded",
                "Dispatch finished after teardown, result discarded"
            );
            return Err(SessionError::TornDown);
        }

        if let Err(e) = result {
            tracing::warn!(
                email = %mask_email(&self.email),
                error = %e,
                event = "otp_resend_failed",
                "Failed to resend verification code"
            );
            return Err(e.into());
        }

        slot.state.reissue(code, self.clock.now(), self.config.code_ttl)?;
        slot.generation += 1;
        slot.stop_ticker();
        let generation = slot.generation;
        slot.ticker = Some(self.spawn_ticker(generation));

        tracing::info!(
            email = %mask_email(&self.email),
            event = "otp_resent",
            "Verification code resent"
        );
        Ok(slot.state.view(slot.dispatching))
    }

    /// Feed one character of user input
    ///
    /// Non-digits, input beyond six digits and input outside `Pending` are
    /// ignored. The sixth digit triggers the comparison.
    pub fn on_digit_entered(&self, digit: char) -> SessionView {
        let mut slot = lock(&self.slot);
        if slot.torn_down {
            return slot.state.view(slot.dispatching);
        }

        let now = self.clock.now();
        if slot.state.enter_digit(digit, now) {
            self.log_outcome(&slot);
            if slot.state.state().is_terminal() {
                slot.stop_ticker();
            }
        }
        slot.state.view(slot.dispatching)
    }

    /// Remove the last entered digit
    pub fn on_backspace(&self) -> SessionView {
        let mut slot = lock(&self.slot);
        if !slot.torn_down {
            slot.state.backspace();
        }
        slot.state.view(slot.dispatching)
    }

    /// Current snapshot
    pub fn view(&self) -> SessionView {
        let slot = lock(&self.slot);
        slot.state.view(slot.dispatching)
    }

    pub fn state(&self) -> AttemptState {
        lock(&self.slot).state.state()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_torn_down(&self) -> bool {
        lock(&self.slot).torn_down
    }

    /// Stop the countdown and ignore any further events
    ///
    /// Idempotent. Once this returns no tick will mutate the session and any
    /// in-flight dispatch result will be discarded.
    pub fn teardown(&self) {
        let mut slot = lock(&self.slot);
        if slot.torn_down {
            return;
        }
        slot.torn_down = true;
        slot.stop_ticker();

        tracing::debug!(
            email = %mask_email(&self.email),
            event = "otp_session_torn_down",
            "Verification session torn down"
        );
    }

    fn log_outcome(&self, slot: &Slot) {
        let email = mask_email(&self.email);
        match slot.state.last_outcome() {
            Some(AttemptOutcome::Verified) => {
                tracing::info!(email = %email, event = "otp_verified", "Email verified");
            }
            Some(AttemptOutcome::Mismatch) => {
                tracing::info!(
                    email = %email,
                    failed_attempts = slot.state.failed_attempts(),
                    event = "otp_mismatch",
                    "Entered code does not match"
                );
            }
            Some(AttemptOutcome::Expired) => {
                tracing::info!(email = %email, event = "otp_expired", "Code expired before entry");
            }
            None => {}
        }
    }

    fn spawn_ticker(&self, generation: u64) -> JoinHandle<()> {
        let slot = Arc::clone(&self.slot);
        let clock = Arc::clone(&self.clock);
        let period = self.config.tick_interval;
        let email = mask_email(&self.email);
        let first_tick = Instant::now() + period;

        tokio::spawn(async move {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let mut slot = lock(&slot);
                if slot.torn_down || slot.generation != generation {
                    break;
                }
                if !slot.state.tick(clock.now()) {
                    if slot.state.state() == AttemptState::Expired {
                        tracing::info!(
                            email = %email,
                            event = "otp_expired",
                            "Verification code expired"
                        );
                    }
                    break;
                }
            }
        })
    }
}

impl<D: OtpDispatch + ?Sized, K: Clock> Drop for OtpVerificationSession<D, K> {
    fn drop(&mut self) {
        self.teardown();
    }
}
