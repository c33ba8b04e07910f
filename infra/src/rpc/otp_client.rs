//! HTTP implementation of [`OtpDispatch`]
//!
//! Lets a client-side verification session deliver codes through the
//! `POST /api/v1/otp/send` endpoint of a remote API server.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

use ft_core::errors::DispatchError;
use ft_core::services::dispatch::OtpDispatch;
use ft_shared::config::otp::MAX_DISPATCH_TIMEOUT_SECONDS;
use ft_shared::types::{RpcErrorBody, SendOtpRequest};
use ft_shared::utils::mask::mask_email;

use crate::InfrastructureError;

/// Path of the dispatch endpoint, relative to the server base URL
pub const SEND_OTP_PATH: &str = "/api/v1/otp/send";

/// Dispatches codes over HTTP
#[derive(Clone)]
pub struct HttpOtpDispatcher {
    client: Client,
    endpoint: String,
}

impl HttpOtpDispatcher {
    /// Create a dispatcher for the server at `base_url`
    ///
    /// Requests time out after 30 seconds.
    pub fn new(base_url: &str) -> Result<Self, InfrastructureError> {
        Self::with_timeout(base_url, Duration::from_secs(MAX_DISPATCH_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, InfrastructureError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "OTP service base URL must not be empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url, SEND_OTP_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OtpDispatch for HttpOtpDispatcher {
    async fn dispatch(&self, email: &str, code: &str) -> Result<(), DispatchError> {
        let masked = mask_email(email);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendOtpRequest::new(email, code))
            .send()
            .await
            .map_err(|e| {
                error!(
                    email = %masked,
                    timeout = e.is_timeout(),
                    error = %e,
                    "OTP dispatch request failed"
                );
                DispatchError::delivery_failed()
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(email = %masked, "OTP dispatch accepted");
            return Ok(());
        }

        match response.json::<RpcErrorBody>().await {
            Ok(body) => {
                warn!(
                    email = %masked,
                    status = status.as_u16(),
                    code = %body.code,
                    "OTP dispatch rejected"
                );
                Err(DispatchError::from_wire(&body.code, body.message))
            }
            Err(e) => {
                error!(
                    email = %masked,
                    status = status.as_u16(),
                    error = %e,
                    "Unreadable OTP dispatch error response"
                );
                Err(DispatchError::delivery_failed())
            }
        }
    }
}
