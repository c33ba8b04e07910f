//! Account registration and email verification flow
//!
//! Owns the link between an account provider and verification sessions:
//! registration starts a session, and a verified signup session promotes the
//! account through [`AuthProvider::mark_email_verified`].

mod service;
mod traits;


pub use service::{AuthFlow, PendingVerification, VerificationPurpose};
pub use traits::AuthProvider;
