//! Long URL validation.
//!
//! The shortener stores the caller's URL unchanged; this module only decides
//! whether it is acceptable.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is a well-formed absolute HTTP(S) URL.
///
/// Rejects `javascript:`, `data:`, `file:` and other non-web schemes.
///
/// # Errors
///
/// Returns the first rule the input violates.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/path?q=1").is_ok());
/// assert_eq!(validate_long_url(""), Err(UrlValidationError::Empty));
/// assert_eq!(
///     validate_long_url("ftp://example.com"),
///     Err(UrlValidationError::UnsupportedProtocol)
/// );
/// ```
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
