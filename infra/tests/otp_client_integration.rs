//! Integration tests for the dispatch RPC client against a mock HTTP server

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ft_core::errors::{DispatchError, SessionError};
use ft_core::services::dispatch::OtpDispatch;
use ft_core::services::session::{ManualClock, OtpVerificationSession, SessionConfig};
use ft_core::AttemptState;
use ft_infra::rpc::{HttpOtpDispatcher, SEND_OTP_PATH};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn test_dispatch_success() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_OTP_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "email": "a@b.co", "otp": "042917" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = HttpOtpDispatcher::new(&server.uri()).unwrap();
    assert_eq!(dispatcher.dispatch("a@b.co", "042917").await, Ok(()));
}

#[tokio::test]
async fn test_invalid_argument_is_mapped_back() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_OTP_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "code": "invalid-argument", "message": "bad email" })),
        )
        .mount(&server)
        .await;

    let dispatcher = HttpOtpDispatcher::new(&server.uri()).unwrap();
    assert_eq!(
        dispatcher.dispatch("nope", "123456").await,
        Err(DispatchError::InvalidArgument("bad email".to_string()))
    );
}

#[tokio::test]
async fn test_internal_error_is_mapped_back() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_OTP_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            json!({ "code": "internal", "message": "failed to send verification email" }),
        ))
        .mount(&server)
        .await;

    let dispatcher = HttpOtpDispatcher::new(&server.uri()).unwrap();
    assert_eq!(
        dispatcher.dispatch("a@b.co", "123456").await,
        Err(DispatchError::delivery_failed())
    );
}

#[tokio::test]
async fn test_unreadable_error_body_is_internal() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_OTP_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let dispatcher = HttpOtpDispatcher::new(&server.uri()).unwrap();
    let result = dispatcher.dispatch("a@b.co", "123456").await;
    assert_eq!(result, Err(DispatchError::delivery_failed()));
}

#[tokio::test]
async fn test_slow_server_times_out_as_internal() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_OTP_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let dispatcher =
        HttpOtpDispatcher::with_timeout(&server.uri(), Duration::from_millis(200)).unwrap();
    assert_eq!(
        dispatcher.dispatch("a@b.co", "123456").await,
        Err(DispatchError::delivery_failed())
    );
}

#[tokio::test]
async fn test_unreachable_server_is_internal() {
    init_tracing();
    // Nothing listens on the discard port
    let dispatcher = HttpOtpDispatcher::new("http://127.0.0.1:9").unwrap();
    assert_eq!(
        dispatcher.dispatch("a@b.co", "123456").await,
        Err(DispatchError::delivery_failed())
    );
}

#[test]
fn test_endpoint_joins_base_url() {
    let dispatcher = HttpOtpDispatcher::new("https://api.example.com/").unwrap();
    assert_eq!(dispatcher.endpoint(), "https://api.example.com/api/v1/otp/send");
    assert!(HttpOtpDispatcher::new("").is_err());
}

#[tokio::test]
async fn test_session_over_rpc() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_OTP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(2)
        .mount(&server)
        .await;

    let dispatcher = Arc::new(HttpOtpDispatcher::new(&server.uri()).unwrap());
    let session = OtpVerificationSession::start(
        "someone@example.com",
        dispatcher,
        Arc::new(ManualClock::default()),
        SessionConfig::default(),
    )
    .await
    .unwrap();
    assert_eq!(session.state(), AttemptState::Pending);

    let view = session.resend().await.unwrap();
    assert_eq!(view.state, AttemptState::Pending);

    // The code travels in the request body
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let code = body["otp"].as_str().unwrap().to_string();
    for digit in code.chars() {
        session.on_digit_entered(digit);
    }
    assert_eq!(session.state(), AttemptState::Verified);
    assert_eq!(session.resend().await.err(), Some(SessionError::AlreadyVerified));
}
