//! Text extraction from various file formats

use crate::error::{Result, SkillSyncError};
use crate::input::file_detector::FileType;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    /// Extract plain text from the raw bytes of a document
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Word-processor documents: body paragraphs joined by single spaces
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| {
            SkillSyncError::DocumentRead(format!("Failed to read DOCX container: {:?}", e))
        })?;

        // Only top-level paragraphs; table cells are not body paragraphs.
        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join(" "))
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&para.children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            SkillSyncError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| SkillSyncError::DocumentRead(format!("Text file is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");

        let clean_text = HTML_TAG.replace_all(&text, "");
        // Entities go last so escaped angle brackets survive tag stripping.
        let clean_text = clean_text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Route a document to the extractor for its file type
pub fn extract_text(file_type: FileType, bytes: &[u8]) -> Result<String> {
    match file_type {
        FileType::Docx => DocxExtractor.extract(bytes),
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Unknown => Err(SkillSyncError::UnsupportedFormat(
            "Cannot extract text from an unknown file type".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{BreakType, Docx, Hyperlink, HyperlinkType, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_docx_paragraphs_are_space_joined_in_order() {
        let bytes = build_docx(&["Jane Doe", "Python developer", "Strong teams"]);
        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Jane Doe Python developer Strong teams");
    }

    #[test]
    fn test_docx_runs_are_concatenated() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("Rust"))
            .add_run(Run::new().add_text("acean"));
        let mut buffer = Cursor::new(Vec::new());
        Docx::new().add_paragraph(para).build().pack(&mut buffer).unwrap();

        let text = DocxExtractor.extract(&buffer.into_inner()).unwrap();
        assert_eq!(text, "Rustacean");
    }

    #[test]
    fn test_docx_hyperlinks_tabs_breaks_and_empty_paragraphs() {
        let link = Hyperlink::new("https://github.com", HyperlinkType::External)
            .add_run(Run::new().add_text("GitHub"));
        let mut buffer = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("See")).add_hyperlink(link))
            .add_paragraph(Paragraph::new().add_run(
                Run::new()
                    .add_text("a")
                    .add_tab()
                    .add_text("b")
                    .add_break(BreakType::TextWrapping)
                    .add_text("c"),
            ))
            .add_paragraph(Paragraph::new())
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("end")))
            .build()
            .pack(&mut buffer)
            .unwrap();

        let text = DocxExtractor.extract(&buffer.into_inner()).unwrap();
        assert_eq!(text, "SeeGitHub a\tb\nc  end");
    }

    #[test]
    fn test_malformed_docx_is_an_error() {
        let result = DocxExtractor.extract(b"definitely not a zip archive");
        assert!(matches!(result, Err(SkillSyncError::DocumentRead(_))));
    }

    #[test]
    fn test_markdown_is_stripped() {
        let text = MarkdownExtractor
            .extract(b"# Jane Doe\n\n**Skills**: Rust & Python\n\n- Kubernetes\n- Docker")
            .unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Rust & Python"));
        assert!(text.contains("Kubernetes"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_invalid_utf8_text_is_an_error() {
        assert!(PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(matches!(
            extract_text(FileType::Unknown, b"abc"),
            Err(SkillSyncError::UnsupportedFormat(_))
        ));
    }
}
