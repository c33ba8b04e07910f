pub mod send_otp;

pub use send_otp::{send_otp, AppState};
