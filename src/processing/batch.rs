//! Batch scoring of documents against one keyword set

use crate::error::Result;
use crate::processing::document::Document;
use crate::processing::keyword_matcher::{KeywordMatcher, MatchMode};
use crate::processing::keywords::KeywordSet;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::scoring::matching_percentage;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What to do when a document cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Fail the whole batch with the first read error
    #[default]
    Abort,
    /// Record the document as skipped and continue
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub document_name: String,
    pub matched_count: usize,
    pub percentage: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub document_name: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub document_name: String,
    pub reason: String,
}

/// Results in processing order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub rows: Vec<MatchResult>,
    pub best_match: Option<BestMatch>,
    pub skipped: Vec<SkippedDocument>,
    pub keyword_count: usize,
}

impl ResultTable {
    /// Rows whose percentage is at least `min_percentage`
    pub fn filter(&self, min_percentage: f64) -> Vec<&MatchResult> {
        self.rows
            .iter()
            .filter(|row| row.percentage >= min_percentage)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, replacing the best match only on a strictly higher score
    fn push(&mut self, row: MatchResult) {
        let current = self.best_match.as_ref().map_or(0.0, |b| b.percentage);
        if row.percentage > current {
            self.best_match = Some(BestMatch {
                document_name: row.document_name.clone(),
                percentage: row.percentage,
            });
        }
        self.rows.push(row);
    }
}

pub struct BatchScorer {
    normalizer: Arc<TextNormalizer>,
    mode: MatchMode,
    policy: FailurePolicy,
}

impl Default for BatchScorer {
    fn default() -> Self {
        Self::new(Arc::new(TextNormalizer::default()))
    }
}

impl BatchScorer {
    pub fn new(normalizer: Arc<TextNormalizer>) -> Self {
        Self {
            normalizer,
            mode: MatchMode::Substring,
            policy: FailurePolicy::Abort,
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn score_documents(&self, documents: &[Document], keywords: &KeywordSet) -> Result<ResultTable> {
        self.score_documents_with(documents, keywords, |_, _| {})
    }

    /// Score every document in order, calling `on_scored` after each one
    pub fn score_documents_with<F>(
        &self,
        documents: &[Document],
        keywords: &KeywordSet,
        mut on_scored: F,
    ) -> Result<ResultTable>
    where
        F: FnMut(usize, &Document),
    {
        let matcher = KeywordMatcher::new(keywords, self.mode)?;
        let mut table = ResultTable {
            keyword_count: keywords.len(),
            ..ResultTable::default()
        };

        info!(
            "Scoring {} document(s) against {} keyword(s) ({:?} matching)",
            documents.len(),
            keywords.len(),
            self.mode
        );

        for (index, document) in documents.iter().enumerate() {
            match document.text() {
                Ok(text) => table.push(self.score_one(&document.name, &text, &matcher)),
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!("Skipping {}: {}", document.name, e);
                        table.skipped.push(SkippedDocument {
                            document_name: document.name.clone(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
            on_scored(index + 1, document);
        }

        Ok(table)
    }

    fn score_one(&self, name: &str, text: &str, matcher: &KeywordMatcher) -> MatchResult {
        let normalized = self.normalizer.normalize(text);
        let matched_keywords = matcher.find_matches(&normalized);
        let missing_keywords = matcher.find_missing(&normalized);
        let percentage = matching_percentage(&matched_keywords, matcher.keyword_count());

        debug!("{}: {}/{} keywords, {:.2}%", name, matched_keywords.len(), matcher.keyword_count(), percentage);

        MatchResult {
            document_name: name.to_string(),
            matched_count: matched_keywords.len(),
            percentage,
            matched_keywords,
            missing_keywords,
        }
    }
}

/// Score documents with the bundled English model and substring matching
pub fn score_documents(documents: &[Document], keywords: &KeywordSet) -> Result<ResultTable> {
    BatchScorer::default().score_documents(documents, keywords)
}

/// Percentage for a single text, normalized with the bundled English model
pub fn score_text(text: &str, keywords: &KeywordSet) -> Result<f64> {
    let table = score_documents(&[Document::from_text("text", text)], keywords)?;
    Ok(table.rows.first().map_or(0.0, |row| row.percentage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::FileType;
    use crate::processing::scoring::round2;

    fn doc(name: &str, text: &str) -> Document {
        Document::from_text(name, text)
    }

    #[test]
    fn test_scenario_two_of_three() {
        let keywords = KeywordSet::parse("python, java, team");
        let table = score_documents(&[doc("a.txt", "Python developing, with strong teams.")], &keywords).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.matched_keywords, vec!["python", "team"]);
        assert_eq!(row.missing_keywords, vec!["java"]);
        assert_eq!(row.matched_count, 2);
        assert_eq!(round2(row.percentage), 66.67);
    }

    #[test]
    fn test_score_properties() {
        let text = "Senior Python engineer building distributed systems with Rust";
        assert_eq!(score_text(text, &KeywordSet::default()).unwrap(), 0.0);
        assert_eq!(score_text(text, &KeywordSet::parse("python, rust")).unwrap(), 100.0);
        assert_eq!(
            score_text(text, &KeywordSet::parse("Python")).unwrap(),
            score_text(text, &KeywordSet::parse("python")).unwrap()
        );
        assert_eq!(
            score_text(text, &KeywordSet::parse("rust, rust")).unwrap(),
            score_text(text, &KeywordSet::parse("rust")).unwrap()
        );
        for keywords in ["go, haskell", "python, cobol, fortran", "system"] {
            let pct = score_text(text, &KeywordSet::parse(keywords)).unwrap();
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn test_possessive_form_still_matches() {
        let python = KeywordSet::parse("python");
        assert_eq!(score_text("Python's ecosystem", &python).unwrap(), 100.0);
        assert_eq!(score_text("Python\u{2019}s ecosystem", &python).unwrap(), 100.0);
    }

    #[test]
    fn test_filter_is_inclusive() {
        let keywords = KeywordSet::parse("python, java, scala, rust, sql, docker");
        let table = score_documents(
            &[
                doc("low.txt", "python java"),
                doc("exact.txt", "python java scala"),
                doc("high.txt", "python java scala rust sql"),
            ],
            &keywords,
        )
        .unwrap();

        let kept: Vec<&str> = table.filter(50.0).iter().map(|r| r.document_name.as_str()).collect();
        assert_eq!(kept, vec!["exact.txt", "high.txt"]);
        assert_eq!(round2(table.rows[0].percentage), 33.33);
    }

    #[test]
    fn test_first_document_wins_ties() {
        let keywords = KeywordSet::parse("python, java, scala, rust, sql");
        let table = score_documents(
            &[
                doc("first.txt", "python java scala rust"),
                doc("second.txt", "python java scala sql"),
            ],
            &keywords,
        )
        .unwrap();

        let best = table.best_match.unwrap();
        assert_eq!(best.document_name, "first.txt");
        assert_eq!(best.percentage, 80.0);
    }

    #[test]
    fn test_no_best_match_when_all_zero() {
        let table = score_documents(&[doc("a.txt", "gardening")], &KeywordSet::parse("rust")).unwrap();
        assert!(table.best_match.is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_failure_policies() {
        let documents = vec![
            doc("good.txt", "rust"),
            Document::new("broken.docx", FileType::Docx, b"not a zip".to_vec()),
        ];
        let keywords = KeywordSet::parse("rust");

        assert!(BatchScorer::default().score_documents(&documents, &keywords).is_err());

        let table = BatchScorer::default()
            .with_policy(FailurePolicy::Skip)
            .score_documents(&documents, &keywords)
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped.len(), 1);
        assert_eq!(table.skipped[0].document_name, "broken.docx");
    }

    #[test]
    fn test_whole_word_mode_and_progress_callback() {
        let scorer = BatchScorer::default().with_mode(MatchMode::WholeWord);
        let mut seen = Vec::new();
        let table = scorer
            .score_documents_with(
                &[doc("a.txt", "javascript"), doc("b.txt", "java")],
                &KeywordSet::parse("java"),
                |done, d| seen.push((done, d.name.clone())),
            )
            .unwrap();

        assert_eq!(table.rows[0].percentage, 0.0);
        assert_eq!(table.rows[1].percentage, 100.0);
        assert_eq!(seen, vec![(1, "a.txt".to_string()), (2, "b.txt".to_string())]);
    }
}
