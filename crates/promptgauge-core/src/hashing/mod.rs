//! Prompt normalization and cache-key fingerprinting.
//!
//! Cache identity is the SHA-256 of the whitespace-normalized prompt plus the
//! model id, so keys are stable across process restarts and backing stores.

use sha2::{Digest, Sha256};

/// Trims surrounding whitespace and collapses internal runs to single spaces.
///
/// Prompts that differ only in whitespace share a fingerprint.
#[inline]
pub fn normalize_prompt(prompt: &str) -> String {
    prompt.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase hex SHA-256 of the normalized prompt.
#[inline]
pub fn fingerprint_prompt(prompt: &str) -> String {
    sha256_hex(normalize_prompt(prompt).as_bytes())
}

/// Cache key for a scored prompt: `prompt_score:{fingerprint}:{model}`.
#[inline]
pub fn cache_key(prompt: &str, model: &str) -> String {
    format!("prompt_score:{}:{}", fingerprint_prompt(prompt), model)
}

#[inline]
fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses() {
        assert_eq!(normalize_prompt("  hello  world  "), "hello world");
        assert_eq!(normalize_prompt("a\n\tb   c"), "a b c");
        assert_eq!(normalize_prompt("already normal"), "already normal");
    }

    #[test]
    fn test_normalize_empty_variants() {
        assert_eq!(normalize_prompt(""), "");
        assert_eq!(normalize_prompt("   \n\t "), "");
    }

    #[test]
    fn test_fingerprint_determinism() {
        let prompt = "What is the capital of France?";

        let hash1 = fingerprint_prompt(prompt);
        let hash2 = fingerprint_prompt(prompt);

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let hash = fingerprint_prompt("test");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_whitespace_insensitive() {
        assert_eq!(
            fingerprint_prompt("  hello  world  "),
            fingerprint_prompt("hello world")
        );
    }

    #[test]
    fn test_fingerprint_uniqueness() {
        let prompts = [
            "What is the capital of France?",
            "What is the capital of Germany?",
            "what is the capital of france?",
        ];

        let hashes: Vec<_> = prompts.iter().map(|p| fingerprint_prompt(p)).collect();
        let unique: std::collections::HashSet<_> = hashes.iter().collect();

        assert_eq!(unique.len(), prompts.len());
    }

    #[test]
    fn test_cache_key_shape() {
        let key = cache_key("hello world", "gpt-4o-mini");
        assert!(key.starts_with("prompt_score:"));
        assert!(key.ends_with(":gpt-4o-mini"));
    }

    #[test]
    fn test_cache_key_shared_by_normalized_prompts() {
        assert_eq!(
            cache_key("  hello  world  ", "gpt-4o-mini"),
            cache_key("hello world", "gpt-4o-mini")
        );
    }

    #[test]
    fn test_cache_key_model_sensitivity() {
        assert_ne!(
            cache_key("hello world", "gpt-4o-mini"),
            cache_key("hello world", "gpt-4o")
        );
    }
}
