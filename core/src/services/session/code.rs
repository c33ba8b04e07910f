//! Verification code generation

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::CODE_LENGTH;

/// Generate a uniformly random six-digit code from the OS CSPRNG
///
/// Leading zeros are kept, so every value in `000000..=999999` is possible.
pub fn generate_otp_code() -> String {
    let code: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = CODE_LENGTH)
}
