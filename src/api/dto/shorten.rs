//! DTOs for the shorten and resolve endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Short key shape: a letter, then five letters or digits.
static CUSTOM_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]{5}$").expect("valid custom key regex"));

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(length(min = 1, message = "Long URL cannot be empty"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional caller-chosen short key.
    #[validate(regex(
        path = *CUSTOM_KEY_REGEX,
        message = "Custom key must be 6 alphanumeric characters and start with a letter"
    ))]
    pub custom_key: Option<String>,
}

/// A created short key assignment.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_key: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, custom_key: Option<&str>) -> ShortenRequest {
        ShortenRequest {
            url: url.to_string(),
            custom_key: custom_key.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("https://example.com", None).validate().is_ok());
        assert!(request("https://example.com", Some("abcdef")).validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let errors = request("not a url", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_invalid_custom_key() {
        for key in ["abc", "1abcde", "abcdefg", "ab_cde"] {
            let errors = request("https://example.com", Some(key))
                .validate()
                .unwrap_err();
            assert!(errors.field_errors().contains_key("custom_key"), "{key}");
        }
    }

    #[test]
    fn test_deserialize_without_custom_key() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{ "url": "https://example.com" }"#).unwrap();
        assert_eq!(req.url, "https://example.com");
        assert!(req.custom_key.is_none());
    }
}
