//! RPC request bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/otp/send`
///
/// Missing fields deserialize as empty strings so they fail the same
/// validation as malformed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

impl SendOtpRequest {
    pub fn new(email: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            otp: otp.into(),
        }
    }
}
