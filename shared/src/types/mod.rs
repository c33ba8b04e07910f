//! Type definitions shared between the API server and its clients

pub mod request;
pub mod response;

pub use request::SendOtpRequest;
pub use response::{HealthResponse, HealthStatus, RpcErrorBody, RpcSuccess};
