//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key from an endpoint and its query parameters.
///
/// Parameters are sorted by name (then value) before hashing, so two
/// parameter lists holding the same pairs in a different order map to the
/// same entry.
pub fn cache_key(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.as_bytes());
    hasher.update(b"?");

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort();

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_ignores_param_order() {
        let key1 = cache_key("/refugees", &[("limit", "10"), ("skip", "0")]);
        let key2 = cache_key("/refugees", &[("skip", "0"), ("limit", "10")]);

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_endpoints() {
        let key1 = cache_key("/visas", &[]);
        let key2 = cache_key("/overstays", &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_values() {
        let key1 = cache_key("/visas", &[("status", "active")]);
        let key2 = cache_key("/visas", &[("status", "expired")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_params_not_confused_with_path() {
        let key1 = cache_key("/visas", &[("a", "1")]);
        let key2 = cache_key("/visas?a=1&", &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_is_hex_sha256() {
        let key = cache_key("/users/me", &[]);
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
