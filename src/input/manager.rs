//! Input manager for loading resume files

use crate::error::{Result, SkillSyncError};
use crate::input::file_detector::FileType;
use crate::processing::batch::{FailurePolicy, SkippedDocument};
use crate::processing::document::Document;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, Document>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a file into memory once, keyed by its path
    pub async fn load_document(&mut self, path: &Path) -> Result<Document> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                debug!("Using cached document for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SkillSyncError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_type = self.detect_file_type(path)?;
        if file_type == FileType::Unknown {
            return Err(SkillSyncError::UnsupportedFormat(format!(
                "Unsupported file type for: {}. Allowed: {}",
                path.display(),
                FileType::supported_extensions().join(", ")
            )));
        }

        info!("Reading {:?} document: {}", file_type, path.display());
        let bytes = fs::read(path).await?;

        let document = Document::new(document_name(path), file_type, bytes);
        debug!("Loaded {} ({} bytes)", document.name, document.size());

        if self.enable_cache {
            self.cache.insert(path_str, document.clone());
        }

        Ok(document)
    }

    /// Load every path in order, failing on the first unreadable file
    pub async fn load_documents(&mut self, paths: &[impl AsRef<Path>]) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            documents.push(self.load_document(path.as_ref()).await?);
        }
        Ok(documents)
    }

    /// Load every path in order. Under `FailurePolicy::Skip`, files that cannot
    /// be opened are returned as skipped instead of failing the batch.
    pub async fn load_documents_with_policy(
        &mut self,
        paths: &[impl AsRef<Path>],
        policy: FailurePolicy,
    ) -> Result<(Vec<Document>, Vec<SkippedDocument>)> {
        let mut documents = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for path in paths {
            let path = path.as_ref();
            match self.load_document(path).await {
                Ok(document) => documents.push(document),
                Err(e) if policy == FailurePolicy::Skip => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped.push(SkippedDocument {
                        document_name: document_name(path),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok((documents, skipped))
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| SkillSyncError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Name shown for a file in results: its file name, or the full path when it has none
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
