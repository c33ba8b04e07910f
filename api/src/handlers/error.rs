//! Mapping of dispatch errors onto HTTP responses
//!
//! Every failure body has the shape `{ "code": ..., "message": ... }`.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};

use ft_core::errors::{DispatchError, INVALID_ARGUMENT};
use ft_shared::types::RpcErrorBody;

/// Wire code of the 404 fallback
pub const NOT_FOUND: &str = "not-found";

/// `InvalidArgument` -> 400, `Internal` -> 500
pub fn dispatch_error_response(error: &DispatchError) -> HttpResponse {
    let body = RpcErrorBody::new(error.code(), error.message());
    match error {
        DispatchError::InvalidArgument(_) => HttpResponse::BadRequest().json(body),
        DispatchError::Internal(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Error handler for `web::JsonConfig`: unparsable bodies are invalid arguments
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed request body: {}", error);

    let response = HttpResponse::BadRequest().json(RpcErrorBody::new(
        INVALID_ARGUMENT,
        "malformed request body",
    ));
    InternalError::from_response(error, response).into()
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(RpcErrorBody::new(
        NOT_FOUND,
        "The requested resource was not found",
    ))
}
