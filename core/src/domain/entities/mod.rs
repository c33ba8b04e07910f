//! Domain entities for email verification.

pub mod verification_request;
pub mod verification_session;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use verification_request::VerificationRequest;
pub use verification_session::{
    AttemptOutcome, AttemptState, SessionView, VerificationSession, CODE_LENGTH,
};
