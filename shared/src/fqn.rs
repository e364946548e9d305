//! Fully-qualified name helpers
//!
//! FQNs are interpolated into URL paths, so every reserved character
//! (including `/`, `?`, `#`, spaces and quotes) must be percent-encoded first.

use std::borrow::Cow;

/// Percent-encode an FQN for use as a single URL path segment
pub fn encode_fqn(fqn: &str) -> Cow<'_, str> {
    urlencoding::encode(fqn)
}

/// Reverse [`encode_fqn`]
pub fn decode_fqn(segment: &str) -> Result<Cow<'_, str>, std::string::FromUtf8Error> {
    urlencoding::decode(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fqn_is_kept_readable() {
        assert_eq!(encode_fqn("s3_prod.sales.transactions"), "s3_prod.sales.transactions");
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let encoded = encode_fqn("s3 prod.\"sales/2024\".tx?#%");
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('?'));
        assert!(!encoded.contains('#'));
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('"'));
        assert_eq!(encoded, "s3%20prod.%22sales%2F2024%22.tx%3F%23%25");
    }

    #[test]
    fn test_round_trip() {
        let names = [
            "service.bucket.folder",
            "s3 prod.\"sales.data\".transactions",
            "gcs.raw/landing.2024-01-01",
            "minio.data lake.ünïcødé.表",
            "a+b=c&d.e;f,g@h",
            "100%.done",
        ];

        for name in names {
            let encoded = encode_fqn(name);
            assert_eq!(decode_fqn(&encoded).unwrap(), name, "round trip failed for {}", name);
        }
    }
}
