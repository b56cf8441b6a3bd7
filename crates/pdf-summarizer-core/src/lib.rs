use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

pub mod export;
pub mod inference;
pub mod models;
pub mod stats;

// Re-export for convenience
pub use export::{ExportError, export_text};
pub use inference::{
    DEFAULT_ENDPOINT, InferenceBackend, InferenceError, OllamaClient, SUMMARY_SENTINEL,
    build_prompt, summarize,
};
pub use models::{ModelError, ModelManager, listing_contains};
pub use stats::SummaryStats;

/// Language model used for summarization.
///
/// The set is closed: the UI cycles through these and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelChoice {
    #[default]
    Llama3,
    Gemma,
    Mistral,
}

impl ModelChoice {
    pub fn all() -> &'static [ModelChoice] {
        &[ModelChoice::Llama3, ModelChoice::Gemma, ModelChoice::Mistral]
    }

    /// Model name as understood by the inference server.
    pub fn id(self) -> &'static str {
        match self {
            Self::Llama3 => "llama3",
            Self::Gemma => "gemma",
            Self::Mistral => "mistral",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Llama3 => "Llama 3",
            Self::Gemma => "Gemma",
            Self::Mistral => "Mistral",
        }
    }

    /// The next model in selection order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Llama3 => Self::Gemma,
            Self::Gemma => Self::Mistral,
            Self::Mistral => Self::Llama3,
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown model '{0}' (expected one of: llama3, gemma, mistral)")]
pub struct UnknownModel(pub String);

impl FromStr for ModelChoice {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelChoice::all()
            .iter()
            .copied()
            .find(|m| m.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// Text extracted from one loaded PDF.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// One summarize action. Built by the UI, consumed once by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub text: String,
    pub sentence_count: u32,
    pub model: ModelChoice,
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementations return the text of every page concatenated in page order,
/// with leading and trailing whitespace stripped from the final result.
pub trait PdfBackend: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
