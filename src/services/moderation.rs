//! Pure moderation helpers used by the confession pipeline.

use regex::Regex;
use std::sync::OnceLock;

/// Messages matching this pattern are queued for review instead of being
/// auto-approved: URLs, bare www hosts, and @-handles are the usual spam.
fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)https?://|www\.|@").expect("Invalid regex pattern defined in code")
    })
}

#[must_use]
pub fn contains_link(message: &str) -> bool {
    link_regex().is_match(message)
}

/// Case-insensitive substring match against the denylist. The list is stored
/// lowercase, so only the message needs folding.
#[must_use]
pub fn find_prohibited_word<'a>(message: &str, words: &'a [String]) -> Option<&'a str> {
    let lower = message.to_lowercase();
    words
        .iter()
        .find(|w| !w.is_empty() && lower.contains(w.as_str()))
        .map(String::as_str)
}

/// Cosine similarity between two embedding vectors. Returns 0.0 for
/// mismatched lengths or zero vectors so callers never divide by zero.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_link() {
        assert!(contains_link("visit https://example.com now"));
        assert!(contains_link("visit http://example.com now"));
        assert!(contains_link("check www.example.com"));
        assert!(contains_link("dm me @someone"));
        assert!(contains_link("mail me at me@example.com"));
        assert!(!contains_link("a perfectly normal confession"));
        assert!(!contains_link("wwwhat is going on"));
    }

    #[test]
    fn test_find_prohibited_word() {
        let words = vec!["goblok".to_string(), "anjing".to_string()];

        assert_eq!(
            find_prohibited_word("this is a GOBLOK message", &words),
            Some("goblok")
        );
        assert_eq!(
            find_prohibited_word("embedded: xanjingx", &words),
            Some("anjing")
        );
        assert_eq!(find_prohibited_word("all friendly here", &words), None);
        assert_eq!(find_prohibited_word("anything", &[]), None);
    }

    #[test]
    fn test_empty_denylist_entry_is_ignored() {
        let words = vec![String::new()];
        assert_eq!(find_prohibited_word("hello", &words), None);
    }

    #[test]
    fn test_cosine_similarity() {
        let a = [1.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [0.0, 1.0, 0.0];

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &c).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
