//! # Infrastructure Layer
//!
//! Concrete implementations of the capabilities defined in `ft_core`:
//!
//! - **Mail**: SMTP relay transport (lettre) and a mock transport for
//!   development
//! - **RPC**: HTTP client that lets a client-side verification session call
//!   the dispatch endpoint of a remote API server

// Re-export core types for convenience
pub use ft_core::errors::*;

/// Mail transport module
pub mod mail;

/// Dispatch RPC client module
pub mod rpc;

pub use mail::{create_mail_transport, MockMailTransport, SmtpMailTransport};
pub use rpc::HttpOtpDispatcher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SMTP transport construction error
    #[error("SMTP error: {0}")]
    Smtp(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
