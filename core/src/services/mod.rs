//! Business services containing domain logic and use cases.

pub mod auth_flow;
pub mod dispatch;
pub mod session;

// Re-export commonly used types
pub use auth_flow::{AuthFlow, AuthProvider, PendingVerification, VerificationPurpose};
pub use dispatch::{DispatcherConfig, MailTransport, OtpDispatch, OtpEmailDispatcher, OutgoingEmail};
pub use session::{
    generate_otp_code, Clock, ManualClock, OtpVerificationSession, SessionConfig, SystemClock,
};
