//! Short code generation

use uuid::Uuid;

/// Length of a generated short code
pub const GENERATED_CODE_LEN: usize = 32;

/// Longest short code accepted on the redirect path
pub const MAX_CODE_LEN: usize = 128;

/// Source of fresh short codes
pub trait CodeGenerator: Send + Sync {
    fn new_key(&self) -> String;
}

/// Random UUID v4 rendered as 32 lowercase hex characters.
///
/// Non-sequential, fixed length and path-safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCodeGenerator;

impl CodeGenerator for UuidCodeGenerator {
    fn new_key(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Whether `code` could be a short code: 1..=128 chars of `[A-Za-z0-9_-]`
#[inline]
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_key_shape() {
        let key = UuidCodeGenerator.new_key();
        assert_eq!(key.len(), GENERATED_CODE_LEN);
        assert!(key.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        assert!(is_valid_short_code(&key));
    }

    #[test]
    fn test_generated_keys_do_not_repeat() {
        let generator = UuidCodeGenerator;
        let keys: HashSet<String> = (0..100_000).map(|_| generator.new_key()).collect();
        assert_eq!(keys.len(), 100_000);
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("abc123"));
        assert!(is_valid_short_code("with-dash_and_underscore"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("a/b"));
        assert!(!is_valid_short_code("<script>"));
        assert!(!is_valid_short_code(&"a".repeat(MAX_CODE_LEN + 1)));
    }
}
