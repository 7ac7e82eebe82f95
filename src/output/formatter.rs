//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{Result, SkillSyncError};
use crate::output::report::MatchReport;
use crate::processing::batch::MatchResult;
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Column headers of the exported table
pub const CSV_HEADERS: [&str; 3] = ["Resume", "Matching Percentage", "Matched Keywords"];

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// CSV export of the filtered table
pub struct CsvFormatter;

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Coordinates the individual formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Skill Sync Results</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #e3f2fd; }
        .container { background: white; padding: 30px; border-radius: 10px; box-shadow: 0 4px 8px rgba(0,0,0,0.1); }
        h1 { text-align: center; }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 8px; border-bottom: 1px solid #e9ecef; text-align: left; }
        .score-high { color: #28a745; font-weight: bold; }
        .score-mid { color: #b8860b; font-weight: bold; }
        .score-low { color: #dc3545; font-weight: bold; }
        .best { margin-top: 20px; padding: 15px; background: #f8f9fa; border-left: 4px solid #007acc; }
    </style>
    {% endif %}
</head>
<body>
<div class="container">
    <h1>Results</h1>
    <p>Keywords: {{ keywords }} | Minimum matching percentage: {{ min_percentage }}%</p>
    <table>
        <thead><tr><th>Resume</th><th>Matching Percentage</th><th>Matched Keywords</th></tr></thead>
        <tbody>
        {% for row in rows %}
            <tr><td>{{ row.name }}</td><td class="{{ row.score_class }}">{{ row.percentage }}%</td><td>{{ row.matched }}</td></tr>
        {% endfor %}
        </tbody>
    </table>
    {% if !has_rows %}<p>No resume meets the minimum matching percentage.</p>{% endif %}
    <div class="best">
        <h2>Best Matching Resume</h2>
        {% if has_best %}
        <p>The resume with the highest matching percentage is: <strong>{{ best_name }}</strong></p>
        <p>Matching Percentage: <strong>{{ best_percentage }}%</strong></p>
        {% else %}
        <p>No resume matched any keyword.</p>
        {% endif %}
    </div>
    <p><small>Generated {{ generated_at }} by skill-sync v{{ version }}</small></p>
</div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    keywords: String,
    min_percentage: u8,
    rows: Vec<HtmlRow>,
    has_rows: bool,
    has_best: bool,
    best_name: String,
    best_percentage: String,
    generated_at: String,
    version: String,
}

struct HtmlRow {
    name: String,
    percentage: String,
    matched: String,
    score_class: &'static str,
}

fn joined_keywords(row: &MatchResult) -> String {
    row.matched_keywords.join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn score_color(percentage: f64) -> Color {
        match percentage {
            p if p >= 75.0 => Color::Green,
            p if p >= 50.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_row(&self, row: &MatchResult) -> String {
        let pct = format!("{:>6.2}%", row.percentage);
        let mut line = format!(
            "  {}  {}  {}\n",
            self.colorize(&pct, Self::score_color(row.percentage)),
            row.document_name,
            joined_keywords(row)
        );
        if self.detailed && !row.missing_keywords.is_empty() {
            line.push_str(&format!(
                "           missing: {}\n",
                self.colorize(&row.missing_keywords.join(", "), Color::BrightBlack)
            ));
        }
        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESULTS"));
        output.push_str(&format!(
            "Keywords ({}): {}\nMinimum matching percentage: {}%\n\n",
            report.keywords.len(),
            report.keywords.join(", "),
            report.min_percentage
        ));

        if report.rows.is_empty() {
            output.push_str("  No resume meets the minimum matching percentage.\n");
        }
        for row in &report.rows {
            output.push_str(&self.format_row(row));
        }

        if self.detailed && !report.below_threshold.is_empty() {
            output.push_str(&self.format_header("Below threshold"));
            for row in &report.below_threshold {
                output.push_str(&self.format_row(row));
            }
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped"));
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  {}: {}\n",
                    skipped.document_name,
                    self.colorize(&skipped.reason, Color::Red)
                ));
            }
        }

        output.push_str(&self.format_header("Best Matching Resume"));
        match &report.best_match {
            Some(best) => output.push_str(&format!(
                "The resume with the highest matching percentage is: {}\nMatching Percentage: {}\n",
                self.colorize(&best.document_name, Color::Cyan),
                self.colorize(&format!("{:.2}%", best.percentage), Self::score_color(best.percentage))
            )),
            None => output.push_str("No resume matched any keyword.\n"),
        }

        if self.detailed {
            output.push_str(&format!(
                "\nGenerated: {} | Model: {} | Matching: {:?}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.linguistic_model,
                report.metadata.match_mode
            ));
        }

        Ok(output)
    }

}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for row in &report.rows {
            writer.write_record([
                row.document_name.clone(),
                format!("{:.2}", row.percentage),
                joined_keywords(row),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| SkillSyncError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| SkillSyncError::OutputFormatting(format!("CSV is not valid UTF-8: {}", e)))
    }

}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut md = String::from("# Results\n\n");
        md.push_str(&format!(
            "**Keywords:** {}  \n**Minimum matching percentage:** {}%\n\n",
            report.keywords.join(", "),
            report.min_percentage
        ));

        md.push_str(&format!("| {} |\n|---|---:|---|\n", CSV_HEADERS.join(" | ")));
        for row in &report.rows {
            md.push_str(&format!(
                "| {} | {:.2}% | {} |\n",
                Self::escape_cell(&row.document_name),
                row.percentage,
                Self::escape_cell(&joined_keywords(row))
            ));
        }

        md.push_str("\n## Best Matching Resume\n\n");
        match &report.best_match {
            Some(best) => md.push_str(&format!(
                "The resume with the highest matching percentage is: **{}**  \nMatching Percentage: **{:.2}%**\n",
                best.document_name, best.percentage
            )),
            None => md.push_str("No resume matched any keyword.\n"),
        }

        if !report.skipped.is_empty() {
            md.push_str("\n## Skipped\n\n");
            for skipped in &report.skipped {
                md.push_str(&format!("- `{}`: {}\n", skipped.document_name, skipped.reason));
            }
        }

        if self.include_metadata {
            md.push_str(&format!(
                "\n---\n*Generated {} by skill-sync v{} ({} model, {:?} matching)*\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.tool_version,
                report.metadata.linguistic_model,
                report.metadata.match_mode
            ));
        }

        Ok(md)
    }

}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let rows = report
            .rows
            .iter()
            .map(|row| HtmlRow {
                name: row.document_name.clone(),
                percentage: format!("{:.2}", row.percentage),
                matched: joined_keywords(row),
                score_class: match row.percentage {
                    p if p >= 75.0 => "score-high",
                    p if p >= 50.0 => "score-mid",
                    _ => "score-low",
                },
            })
            .collect::<Vec<_>>();

        HtmlTemplate {
            include_styles: self.include_styles,
            keywords: report.keywords.join(", "),
            min_percentage: report.min_percentage,
            has_rows: !rows.is_empty(),
            rows,
            has_best: report.best_match.is_some(),
            best_name: report.best_match.as_ref().map(|b| b.document_name.clone()).unwrap_or_default(),
            best_percentage: report
                .best_match
                .as_ref()
                .map(|b| format!("{:.2}", b.percentage))
                .unwrap_or_default(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: report.metadata.tool_version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| SkillSyncError::OutputFormatting(e.to_string()))
    }

}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            csv_formatter: CsvFormatter,
            markdown_formatter: MarkdownFormatter::new(detailed),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// A directory target gets a suggested file name for the chosen format
pub fn resolve_save_path(target: &Path, format: &OutputFormat) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, false))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("filtered_results{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("filtered_results{}.json", timestamp_suffix),
        OutputFormat::Csv => format!("filtered_results{}.csv", timestamp_suffix),
        OutputFormat::Markdown => format!("filtered_results{}.md", timestamp_suffix),
        OutputFormat::Html => format!("filtered_results{}.html", timestamp_suffix),
    }
}
