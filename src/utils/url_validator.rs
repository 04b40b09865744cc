//! Target URL validation.
//!
//! A target must be an absolute URL that parses under the WHATWG URL grammar.
//! The submitted string is stored as-is, so it must also be usable verbatim
//! as a `Location` header: the URL parser silently drops tabs and newlines
//! and trims surrounding spaces, which would let such input through unchanged.

use url::Url;

/// Errors that can occur during target URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Target URL is empty")]
    Empty,

    #[error("Target URL contains control characters or surrounding whitespace")]
    UnsafeCharacters,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Parses `input` as an absolute URL.
///
/// Relative references (`/path`, `example.com`) fail because they carry no
/// scheme. Any scheme the URL grammar accepts is allowed.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input,
/// [`UrlValidationError::UnsafeCharacters`] for input with control characters
/// or leading/trailing whitespace, and [`UrlValidationError::InvalidFormat`]
/// when parsing fails.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com/page?x=1").is_ok());
/// assert!(validate_target_url("not a url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.trim() != input || input.chars().any(char::is_control) {
        return Err(UrlValidationError::UnsafeCharacters);
    }

    Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))
}
