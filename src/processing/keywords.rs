//! Requested keyword set

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lowercased, trimmed, deduplicated keywords in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Parse a comma-separated list. Blank entries are dropped, so an empty
    /// input yields an empty set.
    pub fn parse(input: &str) -> Self {
        Self::from_iter(input.split(','))
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let keywords = iter
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.clone()))
            .collect();
        Self { keywords }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_lowercases_and_dedups() {
        let set = KeywordSet::parse(" Python, java ,PYTHON,  Team ");
        assert_eq!(set.as_slice(), &["python", "java", "team"]);
    }

    #[test]
    fn test_empty_entries_dropped() {
        assert!(KeywordSet::parse("").is_empty());
        assert!(KeywordSet::parse(" , ,").is_empty());
        assert_eq!(KeywordSet::parse("rust,").len(), 1);
    }

    #[test]
    fn test_multi_word_keyword_kept_whole() {
        let set = KeywordSet::parse("machine learning, sql");
        assert_eq!(set.as_slice(), &["machine learning", "sql"]);
    }
}
