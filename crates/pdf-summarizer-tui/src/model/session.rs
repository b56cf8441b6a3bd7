use std::time::{Duration, Instant};

use pdf_summarizer_core::Document;
use pdf_summarizer_core::stats::with_stats;

/// Where the window is in the load → summarize cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No document text.
    Idle,
    /// Document text present; summarize allowed.
    DocumentLoaded,
    /// A summarize request is in flight; load and summarize are disabled.
    Summarizing,
}

/// Document and display state owned by the controller.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub document: Option<Document>,
    /// Text shown in the display area (extracted text, or summary + statistics).
    pub display: String,
    /// Whether `display` holds a summary of the current document.
    pub has_summary: bool,
    started: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            document: None,
            display: String::new(),
            has_summary: false,
            started: None,
        }
    }
}

impl Session {
    pub fn can_load(&self) -> bool {
        self.phase != Phase::Summarizing
    }

    pub fn can_summarize(&self) -> bool {
        self.phase == Phase::DocumentLoaded
    }

    pub fn can_export(&self) -> bool {
        self.has_summary && !self.display.trim().is_empty()
    }

    /// Document text, or `""` when nothing is loaded.
    pub fn document_text(&self) -> &str {
        self.document.as_ref().map(|d| d.text.as_str()).unwrap_or("")
    }

    /// Replace the document wholesale. A document without text leaves the session idle.
    pub fn load(&mut self, document: Document) {
        self.display = document.text.clone();
        self.has_summary = false;
        if document.is_empty() {
            self.document = None;
            self.phase = Phase::Idle;
        } else {
            self.document = Some(document);
            self.phase = Phase::DocumentLoaded;
        }
    }

    pub fn begin_summary(&mut self) {
        self.phase = Phase::Summarizing;
        self.started = Some(Instant::now());
    }

    /// Undo [`Session::begin_summary`] when the request never reached the worker.
    pub fn abort_summary(&mut self) {
        self.phase = Phase::DocumentLoaded;
        self.started = None;
    }

    /// Apply a finished summary: display becomes summary + statistics block.
    ///
    /// Returns the time spent summarizing.
    pub fn finish_summary(&mut self, summary: &str) -> Duration {
        self.display = with_stats(self.document_text(), summary);
        self.has_summary = true;
        self.phase = if self.document.is_some() {
            Phase::DocumentLoaded
        } else {
            Phase::Idle
        };
        self.started
            .take()
            .map(|s| s.elapsed())
            .unwrap_or_default()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}
