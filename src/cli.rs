//! CLI interface for the skill sync tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-sync")]
#[command(about = "Score resumes against a keyword list and find the best match")]
#[command(long_about = "Extract text from resumes, normalize it to lemmas, and report the share of requested keywords each resume contains")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match resumes against keywords
    Match {
        /// Resume files (DOCX, PDF, TXT, MD); repeat for several resumes
        #[arg(short, long = "resume", required = true, num_args = 1..)]
        resumes: Vec<PathBuf>,

        /// Keywords separated by commas
        #[arg(short, long)]
        keywords: String,

        /// Minimum matching percentage (0-100) for the filtered table
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        min_percentage: Option<u8>,

        /// Output format: console, json, csv, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Only count keywords found on word boundaries
        #[arg(long)]
        whole_word: bool,

        /// Skip unreadable resumes instead of failing the batch
        #[arg(long)]
        skip_unreadable: bool,

        /// Show missing keywords and rows below the threshold
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "matching.min_percentage")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, csv, markdown, html", format)),
    }
}
