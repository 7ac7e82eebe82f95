//! Report assembled from a scored result table

use crate::processing::batch::{BestMatch, MatchResult, ResultTable, SkippedDocument};
use crate::processing::keyword_matcher::MatchMode;
use crate::processing::keywords::KeywordSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,

    /// Requested keywords after normalization of the input
    pub keywords: Vec<String>,

    /// Inclusive threshold applied to `rows`
    pub min_percentage: u8,

    /// Rows meeting the threshold, in processing order
    pub rows: Vec<MatchResult>,

    /// Rows under the threshold, kept for detailed output
    pub below_threshold: Vec<MatchResult>,

    /// Best match over all scored documents, regardless of the threshold
    pub best_match: Option<BestMatch>,

    pub skipped: Vec<SkippedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub linguistic_model: String,
    pub match_mode: MatchMode,
    pub documents_scored: usize,
}

impl MatchReport {
    pub fn new(
        table: &ResultTable,
        keywords: &KeywordSet,
        min_percentage: u8,
        match_mode: MatchMode,
        linguistic_model: &str,
    ) -> Self {
        let threshold = f64::from(min_percentage);
        let (rows, below_threshold): (Vec<MatchResult>, Vec<MatchResult>) = table
            .rows
            .iter()
            .cloned()
            .partition(|row| row.percentage >= threshold);

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                linguistic_model: linguistic_model.to_string(),
                match_mode,
                documents_scored: table.len(),
            },
            keywords: keywords.as_slice().to_vec(),
            min_percentage,
            rows,
            below_threshold,
            best_match: table.best_match.clone(),
            skipped: table.skipped.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::batch::score_documents;
    use crate::processing::document::Document;

    #[test]
    fn test_report_splits_rows_on_threshold() {
        let keywords = KeywordSet::parse("python, java");
        let table = score_documents(
            &[
                Document::from_text("a.txt", "python"),
                Document::from_text("b.txt", "rust"),
                Document::from_text("c.txt", "python java"),
            ],
            &keywords,
        )
        .unwrap();

        let report = MatchReport::new(&table, &keywords, 50, MatchMode::Substring, "english-rules");
        let kept: Vec<&str> = report.rows.iter().map(|r| r.document_name.as_str()).collect();
        assert_eq!(kept, vec!["a.txt", "c.txt"]);
        assert_eq!(report.below_threshold.len(), 1);
        assert_eq!(report.metadata.documents_scored, 3);
        assert_eq!(report.best_match.unwrap().document_name, "c.txt");
    }
}
