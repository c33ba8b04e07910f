//! Shared utilities and common types for the FinTrack server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (server, mail transport, OTP timing, CORS)
//! - RPC response bodies
//! - Utility functions (email/code validation, email masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, Environment, MailConfig, MailProvider, OtpConfig, ServerConfig,
};
pub use types::{HealthResponse, HealthStatus, RpcErrorBody, RpcSuccess, SendOtpRequest};
pub use utils::{mask, validation};
