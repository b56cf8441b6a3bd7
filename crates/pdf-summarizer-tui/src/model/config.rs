use pdf_summarizer_core::{DEFAULT_ENDPOINT, ModelChoice};

use crate::theme::ThemeMode;

/// Settings resolved from defaults, config file, environment and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Inference server host, base URL or full `/api/generate` URL.
    pub endpoint: String,
    pub model: ModelChoice,
    /// Pre-filled sentence count; `None` leaves the length field empty.
    pub sentences: Option<u32>,
    /// Request timeout in seconds. 0 = wait forever.
    pub timeout_secs: u64,
    /// Model-management CLI used for `list` and `pull`.
    pub ollama_bin: String,
    pub check_models: bool,
    pub theme: ThemeMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: ModelChoice::default(),
            sentences: None,
            timeout_secs: 0,
            ollama_bin: "ollama".to_string(),
            check_models: true,
            theme: ThemeMode::default(),
        }
    }
}
