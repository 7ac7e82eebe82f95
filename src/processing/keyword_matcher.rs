//! Keyword search over normalized text

use crate::error::{Result, SkillSyncError};
use crate::processing::keywords::KeywordSet;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Containment anywhere in the text; "java" is found inside "javascript"
    #[default]
    Substring,
    /// Occurrence must start and end on token boundaries
    WholeWord,
}

/// Matches one keyword set against many documents
pub struct KeywordMatcher {
    automaton: Option<AhoCorasick>,
    keywords: Vec<String>,
    mode: MatchMode,
}

impl KeywordMatcher {
    pub fn new(keywords: &KeywordSet, mode: MatchMode) -> Result<Self> {
        let keywords = keywords.as_slice().to_vec();
        let automaton = if keywords.is_empty() {
            None
        } else {
            // Standard semantics are required for overlapping search, so that a
            // keyword nested in another ("java" in "javascript") is still found.
            let automaton = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&keywords)
                .map_err(|e| SkillSyncError::Matcher(format!("Failed to build keyword matcher: {}", e)))?;
            Some(automaton)
        };

        Ok(Self {
            automaton,
            keywords,
            mode,
        })
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Keywords present in `text`, each once, in keyword-set order
    pub fn find_matches(&self, text: &str) -> Vec<String> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        let mut found = vec![false; self.keywords.len()];
        for mat in automaton.find_overlapping_iter(text) {
            let id = mat.pattern().as_usize();
            if found[id] {
                continue;
            }
            if self.mode == MatchMode::WholeWord && !on_token_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            found[id] = true;
        }

        self.keywords
            .iter()
            .zip(found)
            .filter_map(|(keyword, hit)| hit.then(|| keyword.clone()))
            .collect()
    }

    /// Keywords not present in `text`
    pub fn find_missing(&self, text: &str) -> Vec<String> {
        let matched = self.find_matches(text);
        self.keywords
            .iter()
            .filter(|k| !matched.contains(k))
            .cloned()
            .collect()
    }
}

fn on_token_boundary(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let starts_clean = start == 0 || bytes[start - 1].is_ascii_whitespace();
    let ends_clean = end == bytes.len() || bytes[end].is_ascii_whitespace();
    starts_clean && ends_clean
}

/// One-shot keyword search
pub fn search_keywords(text: &str, keywords: &KeywordSet, mode: MatchMode) -> Result<Vec<String>> {
    Ok(KeywordMatcher::new(keywords, mode)?.find_matches(text))
}
