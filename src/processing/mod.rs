//! Text processing and scoring pipeline

pub mod document;
pub mod linguistics;
pub mod normalizer;
pub mod keywords;
pub mod keyword_matcher;
pub mod scoring;
pub mod batch;
