//! Client-side OTP verification sessions
//!
//! A session generates a code, asks an [`OtpDispatch`](super::dispatch::OtpDispatch)
//! to deliver it, then collects the user's digits against a one-second
//! countdown until the code is verified or expires.

mod clock;
mod code;
mod config;
mod controller;


pub use clock::{Clock, ManualClock, SystemClock};
pub use code::generate_otp_code;
pub use config::SessionConfig;
pub use controller::OtpVerificationSession;
