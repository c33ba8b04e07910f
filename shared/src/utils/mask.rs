//! Display masking for email addresses
//!
//! Masking is cosmetic: it keeps full addresses out of screens and logs,
//! it is not an access control.

const MASK: &str = "***";

/// Mask the local part of an email address for display
///
/// The domain is kept as is. A local part of up to two characters is shown
/// unmodified; longer ones keep their first two characters followed by `***`,
/// and local parts longer than four characters also keep their last two.
///
/// ```
/// use ft_shared::utils::mask::mask_email;
///
/// assert_eq!(mask_email("ab@x.com"), "ab@x.com");
/// assert_eq!(mask_email("abc@x.com"), "ab***@x.com");
/// assert_eq!(mask_email("abcdef@x.com"), "ab***ef@x.com");
/// ```
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return email.to_string();
    };

    let chars: Vec<char> = local.chars().collect();
    if chars.len() <= 2 {
        return email.to_string();
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = if chars.len() > 4 {
        chars[chars.len() - 2..].iter().collect()
    } else {
        String::new()
    };

    format!("{head}{MASK}{tail}@{domain}")
}
