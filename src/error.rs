//! Error handling for the skill sync tool

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillSyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document read error: {0}")]
    DocumentRead(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Keyword matcher error: {0}")]
    Matcher(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, SkillSyncError>;
