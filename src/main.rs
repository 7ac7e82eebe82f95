//! skill-sync: score resumes against a keyword list

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use skill_sync::cli::{self, Cli, Commands, ConfigAction};
use skill_sync::config::{Config, OutputFormat};
use skill_sync::error::{Result, SkillSyncError};
use skill_sync::input::InputManager;
use skill_sync::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use skill_sync::output::MatchReport;
use skill_sync::processing::batch::{BatchScorer, FailurePolicy};
use skill_sync::processing::keyword_matcher::MatchMode;
use skill_sync::processing::keywords::KeywordSet;
use skill_sync::processing::linguistics::EnglishModel;
use skill_sync::processing::normalizer::TextNormalizer;
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            resumes,
            keywords,
            min_percentage,
            output,
            save,
            whole_word,
            skip_unreadable,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(SkillSyncError::InvalidInput)?,
                None => config.output.format,
            };
            let min_percentage = min_percentage.unwrap_or(config.matching.min_percentage);
            let mode = if whole_word { MatchMode::WholeWord } else { config.matching.mode };
            let policy = if skip_unreadable { FailurePolicy::Skip } else { config.processing.on_error };
            let detailed = detailed || config.output.detailed;

            let keywords = KeywordSet::parse(&keywords);
            if keywords.is_empty() {
                warn!("No keywords given; every resume will score 0%");
            }

            let mut manager = InputManager::new().with_cache(config.processing.enable_caching);
            let (documents, unreadable) = manager.load_documents_with_policy(&resumes, policy).await?;

            // The model is built once and shared by every document in the batch.
            let normalizer = Arc::new(TextNormalizer::new(Arc::new(EnglishModel::new())));
            let scorer = BatchScorer::new(Arc::clone(&normalizer))
                .with_mode(mode)
                .with_policy(policy);

            let progress = if output_format == OutputFormat::Console && save.is_none() {
                ProgressBar::new(documents.len() as u64)
            } else {
                ProgressBar::hidden()
            };
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| SkillSyncError::OutputFormatting(e.to_string()))?
                    .progress_chars("=> "),
            );

            let mut table = scorer.score_documents_with(&documents, &keywords, |done, document| {
                progress.set_position(done as u64);
                progress.set_message(document.name.clone());
            })?;
            progress.finish_and_clear();
            let mut skipped = unreadable;
            skipped.append(&mut table.skipped);
            table.skipped = skipped;

            info!(
                "Scored {} resume(s); {} meet the {}% threshold",
                table.len(),
                table.filter(f64::from(min_percentage)).len(),
                min_percentage
            );

            let report = MatchReport::new(&table, &keywords, min_percentage, mode, normalizer.model_name());
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, config.output.pretty_json);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_save_path(&target, &output_format);
                    save_report_to_file(&rendered, &path)?;
                    info!("Results saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| SkillSyncError::Configuration(e.to_string()))?;
                    println!("# {}\n{}", config_path.display(), content);
                }
                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(config_path)?;
                    println!("Configuration reset to defaults");
                }
                Some(ConfigAction::Set { key, value }) => {
                    let mut config = config;
                    config.set_value(&key, &value)?;
                    config.save_to(config_path)?;
                    println!("Set {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}
