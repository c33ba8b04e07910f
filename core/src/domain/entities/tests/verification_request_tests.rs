//! Unit tests for verification request validation

use crate::domain::entities::VerificationRequest;
use crate::errors::DispatchError;

#[test]
fn test_valid_request() {
    let request = VerificationRequest::new("user@example.com", "123456").unwrap();
    assert_eq!(request.recipient_email(), "user@example.com");
    assert_eq!(request.code(), "123456");
}

#[test]
fn test_leading_zero_code_is_valid() {
    assert!(VerificationRequest::new("user@example.com", "000042").is_ok());
}

#[test]
fn test_malformed_emails() {
    for email in ["not-an-email", "user@example", "@example.com", "user@", ""] {
        assert_eq!(
            VerificationRequest::new(email, "123456"),
            Err(DispatchError::bad_email()),
            "expected bad email for {:?}",
            email
        );
    }
}

#[test]
fn test_malformed_codes() {
    for code in ["12345", "1234567", "12a456", "", "12 456", "１２３４５６"] {
        assert_eq!(
            VerificationRequest::new("user@example.com", code),
            Err(DispatchError::bad_code()),
            "expected bad code for {:?}",
            code
        );
    }
}

#[test]
fn test_email_is_checked_first() {
    assert_eq!(
        VerificationRequest::new("nope", "x"),
        Err(DispatchError::bad_email())
    );
}
