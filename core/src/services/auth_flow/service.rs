//! Auth flow implementation

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use ft_shared::utils::mask::mask_email;
use ft_shared::utils::validation::is_valid_email;

use crate::domain::entities::AttemptState;
use crate::errors::{AuthFlowError, DispatchError};
use crate::services::dispatch::OtpDispatch;
use crate::services::session::{Clock, OtpVerificationSession, SessionConfig, SystemClock};

use super::traits::AuthProvider;

/// Why a verification session was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    Signup,
    PasswordReset,
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationPurpose::Signup => write!(f, "signup"),
            VerificationPurpose::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// A running verification session tagged with its purpose
pub struct PendingVerification<D: OtpDispatch + ?Sized, K: Clock = SystemClock> {
    purpose: VerificationPurpose,
    session: OtpVerificationSession<D, K>,
}

impl<D: OtpDispatch + ?Sized, K: Clock> PendingVerification<D, K> {
    pub fn purpose(&self) -> VerificationPurpose {
        self.purpose
    }

    pub fn session(&self) -> &OtpVerificationSession<D, K> {
        &self.session
    }

    pub fn into_session(self) -> OtpVerificationSession<D, K> {
        self.session
    }
}

/// Drives signup and password-reset verification
pub struct AuthFlow<P: AuthProvider + ?Sized, D: OtpDispatch + ?Sized, K: Clock = SystemClock> {
    provider: Arc<P>,
    dispatcher: Arc<D>,
    clock: Arc<K>,
    config: SessionConfig,
}

impl<P: AuthProvider + ?Sized, D: OtpDispatch + ?Sized, K: Clock> AuthFlow<P, D, K> {
    pub fn new(provider: Arc<P>, dispatcher: Arc<D>, clock: Arc<K>, config: SessionConfig) -> Self {
        Self {
            provider,
            dispatcher,
            clock,
            config,
        }
    }

    /// Create the account, then start a signup verification
    ///
    /// A malformed email is rejected before the provider is contacted.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PendingVerification<D, K>, AuthFlowError> {
        if !is_valid_email(email) {
            return Err(DispatchError::bad_email().into());
        }

        self.provider
            .create_account(email, password)
            .await
            .map_err(|e| {
                tracing::warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "account_creation_failed",
                    "Failed to create account"
                );
                AuthFlowError::Provider(e)
            })?;

        tracing::info!(
            email = %mask_email(email),
            event = "account_created",
            "Account created, starting email verification"
        );
        self.begin_verification(email, VerificationPurpose::Signup).await
    }

    /// Start a verification session for an existing account
    pub async fn begin_verification(
        &self,
        email: &str,
        purpose: VerificationPurpose,
    ) -> Result<PendingVerification<D, K>, AuthFlowError> {
        let session = OtpVerificationSession::start(
            email,
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.clock),
            self.config,
        )
        .await?;

        tracing::info!(
            email = %mask_email(email),
            purpose = %purpose,
            event = "verification_started",
            "Email verification started"
        );
        Ok(PendingVerification { purpose, session })
    }

    /// Finish a verification
    ///
    /// The session must be `Verified`. Signup verifications promote the
    /// account; password-reset verifications only confirm ownership.
    pub async fn complete(&self, pending: &PendingVerification<D, K>) -> Result<(), AuthFlowError> {
        let session = pending.session();
        if session.state() != AttemptState::Verified {
            return Err(AuthFlowError::NotVerified);
        }

        if pending.purpose == VerificationPurpose::Signup {
            self.provider
                .mark_email_verified(session.email())
                .await
                .map_err(AuthFlowError::Provider)?;
        }

        tracing::info!(
            email = %mask_email(session.email()),
            purpose = %pending.purpose,
            event = "verification_completed",
            "Email verification completed"
        );
        Ok(())
    }

    pub async fn is_verified(&self, email: &str) -> Result<bool, AuthFlowError> {
        self.provider
            .is_email_verified(email)
            .await
            .map_err(AuthFlowError::Provider)
    }

    /// Fall back to the provider's own verification email
    pub async fn request_provider_verification(&self, email: &str) -> Result<(), AuthFlowError> {
        self.provider
            .send_verification_email(email)
            .await
            .map_err(AuthFlowError::Provider)
    }
}
