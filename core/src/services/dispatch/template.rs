//! Fixed verification email body

/// Human-readable expiry statement, e.g. "expires in 5 minutes"
fn expiry_statement(expiry_minutes: u64) -> String {
    if expiry_minutes == 1 {
        "expires in 1 minute".to_string()
    } else {
        format!("expires in {} minutes", expiry_minutes)
    }
}

/// Render the HTML body
///
/// `code` must already be validated as six ASCII digits, so it needs no
/// escaping.
pub fn render_html(code: &str, expiry_minutes: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #1f2933; background: #f5f7fa; padding: 24px;">
    <div style="max-width: 480px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 32px;">
      <h2 style="margin-top: 0;">Verify your email</h2>
      <p>Use the code below to finish verifying your FinTrack account.</p>
      <p style="font-size: 32px; font-weight: bold; letter-spacing: 8px; text-align: center; margin: 24px 0;">{code}</p>
      <p>This code {expiry}.</p>
      <p style="color: #7b8794; font-size: 12px;">If you did not request this code, you can safely ignore this email.</p>
    </div>
  </body>
</html>
"#,
        code = code,
        expiry = expiry_statement(expiry_minutes),
    )
}

/// Render the plain-text alternative
pub fn render_text(code: &str, expiry_minutes: u64) -> String {
    format!(
        "Your FinTrack verification code is {}.\nThis code {}.\n\nIf you did not request this code, you can safely ignore this email.\n",
        code,
        expiry_statement(expiry_minutes),
    )
}
