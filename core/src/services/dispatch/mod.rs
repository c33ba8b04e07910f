//! Server-side delivery of one-time passcodes by email
//!
//! The dispatcher validates `(recipient, code)`, renders a fixed HTML
//! message and hands it to a [`MailTransport`] exactly once. It keeps no
//! state between calls and can be shared freely across request handlers.

mod config;
mod service;
mod template;
mod traits;
mod types;


pub use config::DispatcherConfig;
pub use service::OtpEmailDispatcher;
pub use template::{render_html, render_text};
pub use traits::{MailTransport, OtpDispatch};
pub use types::OutgoingEmail;
