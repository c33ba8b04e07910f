//! Message type handed to mail transports

use serde::Serialize;

/// A rendered verification email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    /// Recipient address
    pub to: String,
    pub subject: String,
    /// HTML alternative
    pub html_body: String,
    /// Plain-text alternative for clients without HTML support
    pub text_body: String,
}
