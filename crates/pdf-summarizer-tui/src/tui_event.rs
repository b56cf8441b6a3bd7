use pdf_summarizer_core::{ModelChoice, SummaryRequest};

/// Commands sent from the TUI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Summarize one document. The request is consumed by the worker.
    Summarize { request: SummaryRequest },
    /// Check whether a model is present in the local model listing.
    CheckModel { model: ModelChoice },
    /// Download a model.
    PullModel { model: ModelChoice },
}

/// Events flowing from backend tasks to the TUI. Each command yields exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// The summarize call finished. Failures arrive as the summary sentinel.
    SummaryComplete { summary: String },
    /// Model listing finished. `Err` carries the reason the listing could not run.
    ModelChecked {
        model: ModelChoice,
        result: Result<bool, String>,
    },
    /// Model download finished.
    PullComplete {
        model: ModelChoice,
        result: Result<(), String>,
    },
}
