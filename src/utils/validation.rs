//! Input validators shared across the toolkit

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

/// Check if a string is a valid http(s) URL
pub fn is_valid_url(input: &str) -> bool {
    match url::Url::parse(input) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Check if a string is a valid email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check if a string parses as JSON
pub fn is_valid_json(data: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(data).is_ok()
}
