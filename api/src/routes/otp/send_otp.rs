use actix_web::{web, HttpResponse};
use std::sync::Arc;

use ft_core::services::dispatch::{MailTransport, OtpEmailDispatcher};
use ft_shared::types::{RpcSuccess, SendOtpRequest};
use ft_shared::utils::mask::mask_email;

use crate::handlers::error::dispatch_error_response;

/// Application state that holds shared services
pub struct AppState<T: MailTransport + ?Sized> {
    pub dispatcher: Arc<OtpEmailDispatcher<T>>,
}

impl<T: MailTransport + ?Sized> AppState<T> {
    pub fn new(dispatcher: OtpEmailDispatcher<T>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

/// Handler for POST /api/v1/otp/send
///
/// Emails a caller-generated verification code.
///
/// # Request Body
///
/// ```json
/// { "email": "someone@example.com", "otp": "042917" }
/// ```
///
/// # Response
///
/// - `200 { "success": true }`
/// - `400 { "code": "invalid-argument", "message": "bad email" | "bad code" }`
/// - `500 { "code": "internal", "message": "failed to send verification email" }`
pub async fn send_otp<T>(
    state: web::Data<AppState<T>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    T: MailTransport + ?Sized + 'static,
{
    let SendOtpRequest { email, otp } = request.into_inner();

    log::info!("Processing send_otp request for email: {}", mask_email(&email));

    match state.dispatcher.dispatch(&email, &otp).await {
        Ok(()) => HttpResponse::Ok().json(RpcSuccess::ok()),
        Err(e) => {
            log::warn!(
                "send_otp failed for email {}: {} ({})",
                mask_email(&email),
                e.code(),
                e.message()
            );
            dispatch_error_response(&e)
        }
    }
}
