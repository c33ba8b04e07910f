//! # FinTrack Core
//!
//! Core business logic for email one-time passcode (OTP) verification.
//! This crate contains the domain entities, the server-side email dispatcher,
//! the client-side verification session state machine, the auth flow that
//! owns sessions, and the error types shared by all of them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
