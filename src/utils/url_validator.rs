//! Target URL validation
//!
//! Only absolute http(s) URLs are accepted as redirect targets.

use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    ControlCharacter,
    UnsupportedScheme(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Bad request: url cannot be empty"),
            Self::ControlCharacter => write!(f, "Bad request: url contains control characters"),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "Bad request: unsupported url scheme '{}', only http and https are allowed",
                scheme
            ),
            Self::MissingHost => write!(f, "Bad request: url has no host"),
            Self::InvalidFormat(msg) => write!(f, "Bad request: invalid url ({})", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// Validate a redirect target.
///
/// `javascript:`, `data:`, `file:` and friends all fail the scheme check.
/// The trimmed input is stored and later sent verbatim as `Location`, so
/// control characters are rejected before parsing.
pub fn validate_url(raw: &str) -> Result<Url, UrlValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_url("  https://example.com  ").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_url("   "), Err(UrlValidationError::EmptyUrl));
    }

    #[test]
    fn test_rejects_embedded_control_characters() {
        for raw in [
            "https://exa\r\nmple.com/x",
            "https://example.com/\tpath",
            "https://example.com/a\u{7f}b",
            "https://example.com/\0",
        ] {
            assert_eq!(
                validate_url(raw),
                Err(UrlValidationError::ControlCharacter),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for raw in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com",
        ] {
            assert!(
                matches!(
                    validate_url(raw),
                    Err(UrlValidationError::UnsupportedScheme(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }
}
