//! Traits for account provider integration

use async_trait::async_trait;

/// Account backend capability
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account for an email/password pair
    async fn create_account(&self, email: &str, password: &str) -> Result<(), String>;
    /// Ask the provider to send its own verification email
    async fn send_verification_email(&self, email: &str) -> Result<(), String>;
    /// Whether the provider already considers the email verified
    async fn is_email_verified(&self, email: &str) -> Result<bool, String>;
    /// Record a successful OTP verification against the account
    async fn mark_email_verified(&self, email: &str) -> Result<(), String>;
}
