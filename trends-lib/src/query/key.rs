//! Cache key derivation

use sha2::Digest;
use sha2::Sha256;

use super::Timeframe;

const KIND_INTEREST: &str = "interest";
const KIND_RELATED: &str = "related";

/// Hex SHA-256 digest identifying a cached provider result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of an interest-over-time query.
    ///
    /// Keywords are sorted case-sensitively so input order does not matter.
    pub fn for_interest(keywords: &[String], country: &str, timeframe: &Timeframe) -> Self {
        let mut sorted: Vec<&str> = keywords.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let timeframe = timeframe.to_string();
        let mut parts = vec![KIND_INTEREST];
        parts.extend(sorted);
        parts.push(country);
        parts.push(&timeframe);
        Self::digest(&parts)
    }

    /// Key of a related-queries lookup.
    pub fn for_related(keyword: &str, country: &str) -> Self {
        Self::digest(&[KIND_RELATED, keyword, country])
    }

    /// Hashes each part behind its byte length, so no keyword content can
    /// shift a part boundary.
    fn digest(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn timeframe() -> Timeframe {
        Timeframe::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_ignores_keyword_order() {
        let a = CacheKey::for_interest(&strings(&["cat", "dog"]), "FR", &timeframe());
        let b = CacheKey::for_interest(&strings(&["dog", "cat"]), "FR", &timeframe());
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let a = CacheKey::for_interest(&strings(&["Cat"]), "FR", &timeframe());
        let b = CacheKey::for_interest(&strings(&["cat"]), "FR", &timeframe());
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_separates_parts() {
        let joined = CacheKey::for_interest(&strings(&["cat dog"]), "FR", &timeframe());
        let split = CacheKey::for_interest(&strings(&["cat", "dog"]), "FR", &timeframe());
        assert_ne!(joined, split);

        let fr = CacheKey::for_interest(&strings(&["cat"]), "FR", &timeframe());
        let us = CacheKey::for_interest(&strings(&["cat"]), "US", &timeframe());
        assert_ne!(fr, us);
    }

    #[test]
    fn test_key_resists_embedded_separators() {
        let embedded = CacheKey::for_interest(&strings(&["a\u{1f}b"]), "FR", &timeframe());
        let split = CacheKey::for_interest(&strings(&["a", "b"]), "FR", &timeframe());
        assert_ne!(embedded, split);

        let shifted = CacheKey::for_interest(&strings(&["cat\u{1f}FR"]), "", &timeframe());
        let plain = CacheKey::for_interest(&strings(&["cat"]), "FR\u{1f}", &timeframe());
        assert_ne!(shifted, plain);
    }

    #[test]
    fn test_related_key_differs_from_interest() {
        let related = CacheKey::for_related("cat", "FR");
        let interest = CacheKey::for_interest(&strings(&["cat"]), "FR", &timeframe());
        assert_ne!(related, interest);
        assert_eq!(related, CacheKey::for_related("cat", "FR"));
    }
}
