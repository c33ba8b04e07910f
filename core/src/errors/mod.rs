//! Domain-specific error types and error handling.

mod types;

pub use types::{
    AuthFlowError, DispatchError, SessionError, TransportError, INTERNAL, INVALID_ARGUMENT,
};
