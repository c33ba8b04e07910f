//! Unit tests for the verification session state machine

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::time::Duration as StdDuration;

use crate::domain::entities::{AttemptOutcome, AttemptState, VerificationSession};
use crate::errors::SessionError;

const TTL: StdDuration = StdDuration::from_secs(300);

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn session() -> VerificationSession {
    VerificationSession::issue("someone@example.com", "123456", t0(), TTL)
}

fn enter(session: &mut VerificationSession, digits: &str, now: DateTime<Utc>) {
    for digit in digits.chars() {
        session.enter_digit(digit, now);
    }
}

#[test]
fn test_issue_starts_pending() {
    let session = session();
    assert_eq!(session.state(), AttemptState::Pending);
    assert_eq!(session.issued_code(), Some("123456"));
    assert_eq!(session.entered_code(), "");
    assert_eq!(session.expires_at(), t0() + Duration::seconds(300));
    assert_eq!(session.remaining_seconds(), 300);
}

#[test]
fn test_correct_code_verifies() {
    let mut session = session();
    enter(&mut session, "123456", t0() + Duration::seconds(30));

    assert_eq!(session.state(), AttemptState::Verified);
    assert_eq!(session.issued_code(), None);
    assert_eq!(session.last_outcome(), Some(AttemptOutcome::Verified));
}

#[test]
fn test_wrong_code_returns_to_pending() {
    let mut session = session();
    enter(&mut session, "654321", t0() + Duration::seconds(30));

    assert_eq!(session.state(), AttemptState::Pending);
    assert_eq!(session.entered_code(), "");
    assert_eq!(session.issued_code(), Some("123456"));
    assert_eq!(session.failed_attempts(), 1);
    assert_eq!(session.last_outcome(), Some(AttemptOutcome::Mismatch));

    // The same code stays valid for another try
    enter(&mut session, "123456", t0() + Duration::seconds(40));
    assert_eq!(session.state(), AttemptState::Verified);
}

#[test]
fn test_expiry_takes_precedence_over_match() {
    let mut session = session();
    enter(&mut session, "123456", t0() + Duration::seconds(301));

    assert_eq!(session.state(), AttemptState::Expired);
    assert_eq!(session.issued_code(), None);
    assert_eq!(session.last_outcome(), Some(AttemptOutcome::Expired));
}

#[test]
fn test_expired_exactly_at_deadline() {
    let mut session = session();
    enter(&mut session, "123456", t0() + Duration::seconds(300));
    assert_eq!(session.state(), AttemptState::Expired);
}

#[test]
fn test_mismatch_after_deadline_is_expired() {
    let mut session = session();
    enter(&mut session, "000000", t0() + Duration::seconds(400));
    assert_eq!(session.state(), AttemptState::Expired);
    assert_eq!(session.failed_attempts(), 0);
}

#[test]
fn test_non_digits_are_ignored() {
    let mut session = session();
    assert!(!session.enter_digit('a', t0()));
    assert!(!session.enter_digit(' ', t0()));
    assert!(!session.enter_digit('٣', t0()));
    assert!(session.enter_digit('1', t0()));
    assert_eq!(session.entered_code(), "1");
}

#[test]
fn test_input_never_exceeds_six_digits() {
    let mut session = session();
    enter(&mut session, "1234", t0());
    assert_eq!(session.entered_code().len(), 4);

    // Verified sessions accept no more input
    enter(&mut session, "56", t0());
    assert!(!session.enter_digit('7', t0()));
    assert!(session.entered_code().len() <= 6);
}

#[test]
fn test_backspace() {
    let mut session = session();
    enter(&mut session, "123", t0());
    assert!(session.backspace());
    assert_eq!(session.entered_code(), "12");

    session.backspace();
    session.backspace();
    assert!(!session.backspace());
    assert_eq!(session.state(), AttemptState::Pending);
}

#[test]
fn test_backspace_ignored_after_terminal_state() {
    let mut session = session();
    session.expire();
    assert!(!session.backspace());
    assert_eq!(session.state(), AttemptState::Expired);
}

#[test]
fn test_tick_counts_down_and_expires() {
    let mut session = VerificationSession::issue("someone@example.com", "123456", t0(), StdDuration::from_secs(3));

    assert!(session.tick(t0() + Duration::seconds(1)));
    assert_eq!(session.remaining_seconds(), 2);
    assert!(session.tick(t0() + Duration::seconds(2)));
    assert!(!session.tick(t0() + Duration::seconds(3)));

    assert_eq!(session.state(), AttemptState::Expired);
    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(session.issued_code(), None);
}

#[test]
fn test_tick_expires_when_clock_passes_deadline() {
    let mut session = session();
    assert!(!session.tick(t0() + Duration::seconds(305)));
    assert_eq!(session.state(), AttemptState::Expired);
}

#[test]
fn test_tick_does_nothing_after_verified() {
    let mut session = session();
    enter(&mut session, "123456", t0());
    let remaining = session.remaining_seconds();

    assert!(!session.tick(t0() + Duration::seconds(1)));
    assert_eq!(session.state(), AttemptState::Verified);
    assert_eq!(session.remaining_seconds(), remaining);
}

#[test]
fn test_reissue_invalidates_previous_code() {
    let mut session = session();
    enter(&mut session, "12", t0());
    let later = t0() + Duration::seconds(120);

    session.reissue("999999", later, TTL).unwrap();

    assert_eq!(session.state(), AttemptState::Pending);
    assert_eq!(session.issued_code(), Some("999999"));
    assert_eq!(session.entered_code(), "");
    assert_eq!(session.expires_at(), later + Duration::seconds(300));
    assert_eq!(session.remaining_seconds(), 300);

    enter(&mut session, "123456", later);
    assert_eq!(session.state(), AttemptState::Pending);
    assert_eq!(session.last_outcome(), Some(AttemptOutcome::Mismatch));
}

#[test]
fn test_reissue_restarts_expired_session() {
    let mut session = session();
    session.expire();

    let later = t0() + Duration::seconds(600);
    session.reissue("222222", later, TTL).unwrap();
    enter(&mut session, "222222", later + Duration::seconds(10));
    assert_eq!(session.state(), AttemptState::Verified);
}

#[test]
fn test_reissue_rejected_after_verified() {
    let mut session = session();
    enter(&mut session, "123456", t0());
    assert_eq!(
        session.reissue("000000", t0(), TTL),
        Err(SessionError::AlreadyVerified)
    );
}

#[test]
fn test_issued_code_only_while_active() {
    let mut session = session();
    assert!(session.state().is_active() && session.issued_code().is_some());

    session.expire();
    assert!(!session.state().is_active());
    assert!(session.issued_code().is_none());
}

#[test]
fn test_view_masks_email() {
    let session = session();
    let view = session.view(false);
    assert_eq!(view.masked_email, "so***ne@example.com");
    assert_eq!(view.state, AttemptState::Pending);
    assert!(view.can_resend);

    let view = session.view(true);
    assert!(view.dispatching);
    assert!(!view.can_resend);
}

#[test]
fn test_issue_bounds_oversized_ttl() {
    let mut session =
        VerificationSession::issue("someone@example.com", "123456", t0(), StdDuration::from_secs(u64::MAX));
    assert_eq!(session.remaining_seconds(), 86_400);
    assert_eq!(session.expires_at(), t0() + Duration::days(1));

    session
        .reissue("654321", t0(), StdDuration::from_secs(u64::MAX))
        .unwrap();
    assert_eq!(session.remaining_seconds(), 86_400);
}
