use pdf_summarizer_core::{ExportError, SummaryRequest, export_text};

use super::{App, InputMode, Notice, Screen, parse_sentence_count};
use crate::action::Action;
use crate::model::session::Phase;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Default export destination offered in the path dialog.
const DEFAULT_EXPORT_NAME: &str = "summary";

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(10);
                return false;
            }
            Action::None => return false,
            _ => {}
        }

        // Quit confirmation modal: q (or y) confirms, Esc (or n) cancels
        if self.confirm_quit {
            match action {
                Action::Quit | Action::Yes => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack | Action::No => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        if self.show_help {
            if matches!(
                action,
                Action::ToggleHelp | Action::NavigateBack | Action::DrillIn | Action::Quit
            ) {
                self.show_help = false;
            }
            return false;
        }

        if self.notice.is_some() {
            match action {
                Action::DrillIn
                | Action::NavigateBack
                | Action::Confirm
                | Action::Cancel
                | Action::Yes
                | Action::No => self.dismiss_notice(),
                Action::Quit => self.request_quit(),
                _ => {}
            }
            return self.should_quit;
        }

        if self.pull_prompt.is_some() {
            self.handle_pull_prompt_action(action);
            return self.should_quit;
        }

        if self.export_state.active {
            self.handle_export_action(action);
            return self.should_quit;
        }

        if self.input_mode == InputMode::LengthInput {
            self.handle_length_action(action);
            return self.should_quit;
        }

        match self.screen {
            Screen::FilePicker => self.handle_file_picker_action(action),
            Screen::Main => self.handle_main_action(action),
        }
        self.should_quit
    }

    /// Text-entry modes quit immediately (Ctrl+C); elsewhere quitting asks first.
    fn request_quit(&mut self) {
        if self.input_mode == InputMode::Normal {
            self.confirm_quit = true;
        } else {
            self.should_quit = true;
        }
    }

    fn handle_main_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.request_quit(),
            Action::LoadPdf => {
                if self.session.can_load() {
                    self.file_picker.refresh_entries();
                    self.screen = Screen::FilePicker;
                } else {
                    tracing::debug!("load ignored while summarizing");
                }
            }
            Action::EditLength => {
                self.length_backup = self.length_input.clone();
                self.input_mode = InputMode::LengthInput;
            }
            Action::CycleModel => {
                self.model = self.model.next();
                tracing::info!(model = self.model.id(), "model selected");
                self.request_model_check();
            }
            Action::Summarize => self.start_summary(),
            Action::Export => self.begin_export(),
            Action::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                self.theme = Theme::for_mode(self.theme_mode);
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::MoveDown => self.scroll_by(1),
            Action::MoveUp => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(self.visible_rows.max(1) as i64),
            Action::PageUp => self.scroll_by(-(self.visible_rows.max(1) as i64)),
            Action::GoTop => self.scroll = 0,
            Action::GoBottom => self.scroll = self.max_scroll(),
            _ => {}
        }
    }

    fn max_scroll(&self) -> u16 {
        let max = self.display_rows.saturating_sub(self.visible_rows);
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i64) {
        let next = (i64::from(self.scroll) + delta).clamp(0, i64::from(self.max_scroll()));
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    fn handle_length_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.request_quit(),
            Action::TextInput(c) => self.length_input.push(c),
            Action::Backspace => {
                self.length_input.pop();
            }
            Action::Confirm => {
                self.input_mode = InputMode::Normal;
            }
            Action::Cancel => {
                self.length_input = std::mem::take(&mut self.length_backup);
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_pull_prompt_action(&mut self, action: Action) {
        match action {
            Action::Yes | Action::DrillIn | Action::TextInput('y' | 'Y') => self.start_pull(),
            Action::No | Action::NavigateBack | Action::Cancel | Action::TextInput('n' | 'N') => {
                if let Some(prompt) = self.pull_prompt.take() {
                    tracing::debug!(model = prompt.model.id(), "pull declined");
                }
            }
            Action::Quit => self.request_quit(),
            _ => {}
        }
    }

    fn start_pull(&mut self) {
        let Some(prompt) = self.pull_prompt.take() else {
            return;
        };
        let model = prompt.model;
        if self.send_command(BackendCommand::PullModel { model }) {
            tracing::info!(model = model.id(), "pull requested");
            self.pulling = Some(model);
        } else {
            self.push_notice(Notice::error(
                "Error",
                format!("Could not start download of '{}'.", model.id()),
            ));
        }
    }

    /// Validate inputs and hand a [`SummaryRequest`] to the worker.
    ///
    /// Rejected with a warning (and no command sent) unless a document is
    /// loaded and the length field holds a positive integer.
    pub fn start_summary(&mut self) {
        if self.phase() == Phase::Summarizing {
            tracing::debug!("summarize ignored while a request is in flight");
            return;
        }
        if !self.session.can_summarize() {
            self.push_notice(Notice::warning("No PDF", "Please load a PDF first."));
            return;
        }
        let Some(sentence_count) = parse_sentence_count(&self.length_input) else {
            self.push_notice(Notice::warning(
                "Invalid Length",
                "Please enter a valid number.",
            ));
            return;
        };

        let request = SummaryRequest {
            text: self.session.document_text().to_string(),
            sentence_count,
            model: self.model,
        };
        self.session.begin_summary();
        self.status = None;
        if !self.send_command(BackendCommand::Summarize { request }) {
            tracing::warn!("summarize command could not be delivered");
            self.session.abort_summary();
            self.push_notice(Notice::error("Error", "The summarizer backend is not running."));
        }
    }

    fn begin_export(&mut self) {
        if !self.session.can_export() {
            self.push_notice(Notice::warning(
                "Empty Summary",
                "There is no summary to export.",
            ));
            return;
        }
        self.export_state.active = true;
        self.export_state.buffer = DEFAULT_EXPORT_NAME.to_string();
        self.input_mode = InputMode::ExportPath;
    }

    fn close_export(&mut self) {
        self.export_state.active = false;
        self.input_mode = InputMode::Normal;
    }

    fn handle_export_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.request_quit(),
            Action::Cancel => self.close_export(),
            Action::TextInput(c) => self.export_state.buffer.push(c),
            Action::Backspace => {
                self.export_state.buffer.pop();
            }
            Action::Confirm => {
                let path = std::mem::take(&mut self.export_state.buffer);
                self.close_export();
                self.export_display(&path);
            }
            _ => {}
        }
    }

    /// Write the display text verbatim to `path`. The display is left untouched.
    pub fn export_display(&mut self, path: &str) {
        match export_text(path, &self.session.display) {
            Ok(written) => {
                self.status = Some(format!("Saved to {}", written.display()));
            }
            Err(ExportError::NoPath) => {
                tracing::debug!("export cancelled: empty path");
            }
            Err(ExportError::Empty) => {
                self.push_notice(Notice::warning(
                    "Empty Summary",
                    "There is no summary to export.",
                ));
            }
            Err(ExportError::Io { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "export failed");
                self.push_notice(Notice::error(
                    "Error",
                    format!("Failed to save file: {}", source),
                ));
            }
        }
    }
}
