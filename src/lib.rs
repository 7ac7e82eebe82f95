//! Skill sync library: score resumes against a keyword list

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, SkillSyncError};
pub use config::Config;
pub use processing::batch::{score_documents, BatchScorer, ResultTable};
