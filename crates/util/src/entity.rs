//! Shape checks for confirmed entities.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").expect("valid email pattern")
});

/// Whether `text` has the shape of an email address.
///
/// Only the full text is matched; surrounding punctuation makes it fail.
///
/// # Example
/// ```rust
/// use mentions_util::entity::looks_like_email;
///
/// assert!(looks_like_email("user1@example.com"));
/// assert!(!looks_like_email("@user1"));
/// ```
pub fn looks_like_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}
