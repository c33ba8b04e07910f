//! Validated `(recipient, code)` pair for one dispatch call.

use ft_shared::utils::validation::{is_valid_email, is_valid_otp_code};

use crate::errors::DispatchError;

/// A verification email request that passed input validation
///
/// Constructed per RPC call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    recipient_email: String,
    code: String,
}

impl VerificationRequest {
    /// Validate and build a request
    ///
    /// The email is checked before the code, so a request with both fields
    /// malformed reports `bad email`.
    pub fn new(
        recipient_email: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        let recipient_email = recipient_email.into();
        let code = code.into();

        if !is_valid_email(&recipient_email) {
            return Err(DispatchError::bad_email());
        }
        if !is_valid_otp_code(&code) {
            return Err(DispatchError::bad_code());
        }

        Ok(Self {
            recipient_email,
            code,
        })
    }

    pub fn recipient_email(&self) -> &str {
        &self.recipient_email
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}
