pub mod error;

pub use error::{dispatch_error_response, json_error_handler, not_found};
