//! Domain layer containing verification entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
