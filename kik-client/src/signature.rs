//! Webhook signature computation and verification.
//!
//! Kik signs every webhook delivery with HMAC-SHA1 over the raw request body,
//! keyed with the bot's API key, and sends the hex digest in
//! [`headers::SIGNATURE`].

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the lowercase hex HMAC-SHA1 of `body` keyed with `api_key`.
pub fn compute_signature(body: &[u8], api_key: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(api_key.as_bytes()).expect("HMAC can take any size key");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a claimed signature against the raw request body.
///
/// The comparison is case-sensitive and covers the full digest. Any mismatch,
/// including malformed input, is simply `false`.
pub fn verify_signature(signature: &str, body: &[u8], api_key: &str) -> bool {
    constant_time_compare(signature, &compute_signature(body, api_key))
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

/// Header names used by Kik webhook deliveries
pub mod headers {
    /// Hex HMAC-SHA1 of the body
    pub const SIGNATURE: &str = "X-Kik-Signature";

    /// Username of the bot the delivery is addressed to
    pub const USERNAME: &str = "X-Kik-Username";
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SIGNATURE: &str = "5112055c05f944f85755efc5cd8970e194e9f45b";

    #[test]
    fn test_known_digest() {
        assert_eq!(compute_signature(b"hello", "secret"), HELLO_SIGNATURE);
    }

    #[test]
    fn test_verify_known_digest() {
        assert!(verify_signature(HELLO_SIGNATURE, b"hello", "secret"));
        assert!(!verify_signature("not-a-signature", b"hello", "secret"));
        assert!(!verify_signature("", b"hello", "secret"));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let upper = HELLO_SIGNATURE.to_uppercase();
        assert!(!verify_signature(&upper, b"hello", "secret"));
    }

    #[test]
    fn test_single_character_flip_fails() {
        let body = br#"{"messages":[{"type":"text","body":"hi"}]}"#;
        let signature = compute_signature(body, "api-key");
        assert!(verify_signature(&signature, body, "api-key"));

        for i in 0..signature.len() {
            let mut flipped: Vec<u8> = signature.bytes().collect();
            flipped[i] = if flipped[i] == b'0' { b'1' } else { b'0' };
            let flipped = String::from_utf8(flipped).unwrap();
            assert!(!verify_signature(&flipped, body, "api-key"), "position {i}");
        }
    }

    #[test]
    fn test_wrong_key_or_body_fails() {
        let signature = compute_signature(b"payload", "key-one");
        assert!(!verify_signature(&signature, b"payload", "key-two"));
        assert!(!verify_signature(&signature, b"payload!", "key-one"));
    }

    #[test]
    fn test_truncated_signature_fails() {
        assert!(!verify_signature(&HELLO_SIGNATURE[..39], b"hello", "secret"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "ab"));
        assert!(!constant_time_compare("", "a"));
    }
}
