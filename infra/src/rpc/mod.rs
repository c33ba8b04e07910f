//! Client for the OTP dispatch RPC

mod otp_client;

pub use otp_client::{HttpOtpDispatcher, SEND_OTP_PATH};
