use super::{App, Notice, PullPrompt};
use crate::model::session::Phase;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::SummaryComplete { summary } => {
                if self.phase() != Phase::Summarizing {
                    tracing::warn!("summary arrived with no request in flight; dropped");
                    return;
                }
                let elapsed = self.session.finish_summary(&summary);
                self.scroll = 0;
                self.status = Some(format!("Done in {:.2} seconds", elapsed.as_secs_f64()));
                tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    chars = summary.len(),
                    "summary displayed"
                );
            }
            BackendEvent::ModelChecked { model, result } => {
                // The user may have cycled past this model while the listing ran
                if model != self.model || self.pulling == Some(model) {
                    tracing::debug!(model = model.id(), "stale model check ignored");
                    return;
                }
                match result {
                    Ok(true) => {
                        tracing::debug!(model = model.id(), "model installed");
                    }
                    Ok(false) => {
                        self.pull_prompt = Some(PullPrompt {
                            model,
                            warning: None,
                        });
                    }
                    Err(error) => {
                        self.pull_prompt = Some(PullPrompt {
                            model,
                            warning: Some(error),
                        });
                    }
                }
            }
            BackendEvent::PullComplete { model, result } => {
                if self.pulling == Some(model) {
                    self.pulling = None;
                }
                self.push_notice(match result {
                    Ok(()) => Notice::info(
                        "Model Ready",
                        format!("Model '{}' downloaded successfully.", model.id()),
                    ),
                    Err(error) => Notice::error(
                        "Download Failed",
                        format!("Failed to pull model '{}': {}", model.id(), error),
                    ),
                });
            }
        }
    }
}
