use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pdf_summarizer_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) from the rest of
/// the workspace.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut text = String::new();
        let mut page_count = 0usize;

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            // Block/line walk: every line ends with '\n'
            for block in text_page.blocks() {
                for line in block.lines() {
                    text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
                    text.push('\n');
                }
            }
            page_count += 1;
        }

        tracing::debug!(path = %path.display(), pages = page_count, "extracted PDF text");
        Ok(text.trim().to_string())
    }
}
