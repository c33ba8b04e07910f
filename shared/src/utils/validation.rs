//! Input validation for verification requests

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a one-time passcode
pub const OTP_CODE_LENGTH: usize = 6;

// local-part "@" domain, where the domain has at least one dot and no empty labels
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is valid")
});

static OTP_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("otp pattern is valid"));

/// Check if an email address has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check if a code is exactly six ASCII digits
pub fn is_valid_otp_code(code: &str) -> bool {
    OTP_CODE_REGEX.is_match(code)
}
