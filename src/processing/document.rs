//! Uploaded documents held in memory

use crate::error::Result;
use crate::input::file_detector::FileType;
use crate::input::text_extractor;

/// A resume read fully into memory, identified by its file name
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub file_type: FileType,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, file_type: FileType, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_type,
            bytes,
        }
    }

    /// Convenience constructor for text that is already plain
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, FileType::Text, text.into().into_bytes())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Extract the document's plain text; malformed containers are reported, not masked
    pub fn text(&self) -> Result<String> {
        text_extractor::extract_text(self.file_type, &self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let doc = Document::from_text("cv.txt", "Rust developer");
        assert_eq!(doc.file_type, FileType::Text);
        assert_eq!(doc.size(), 14);
        assert_eq!(doc.text().unwrap(), "Rust developer");
    }

    #[test]
    fn test_unknown_type_fails_extraction() {
        let doc = Document::new("cv.odt", FileType::Unknown, vec![1, 2, 3]);
        assert!(doc.text().is_err());
    }
}
