mod backend;
mod update;
mod update_file_picker;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use pdf_summarizer_core::{Document, ModelChoice, PdfBackend};

use crate::model::config::RuntimeConfig;
use crate::model::session::{Phase, Session};
use crate::theme::{Theme, ThemeMode};
use crate::tui_event::BackendCommand;
use crate::view::export::ExportState;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Main,
    FilePicker,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Editing the sentence-count field.
    LengthInput,
    /// Typing the export destination.
    ExportPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message; blocks other input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Offer to download a model that the listing did not show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullPrompt {
    pub model: ModelChoice,
    /// Set when the listing itself failed.
    pub warning: Option<String>,
}

/// State for the file picker screen.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then PDFs).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl FilePickerState {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut state = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();
            let mut files = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden files/dirs
                if name.starts_with('.') {
                    continue;
                }

                if path.is_dir() {
                    dirs.push(FileEntry {
                        name,
                        path,
                        is_dir: true,
                    });
                } else if is_pdf_path(&path) {
                    files.push(FileEntry {
                        name,
                        path,
                        is_dir: false,
                    });
                }
            }

            dirs.sort_by_key(|e| e.name.to_lowercase());
            files.sort_by_key(|e| e.name.to_lowercase());

            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.cursor = 0;
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }

    pub fn current_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }
}

pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Parse the sentence-count field: ASCII digits only, and greater than zero.
pub fn parse_sentence_count(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().filter(|&n| n > 0)
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub session: Session,
    pub model: ModelChoice,
    /// Raw contents of the sentence-count field.
    pub length_input: String,
    /// Field contents before editing started (restored on cancel).
    pub(super) length_backup: String,
    pub input_mode: InputMode,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    /// One-line status shown under the controls (e.g. "Done in 3.21 seconds").
    pub status: Option<String>,
    /// Notice on screen; later ones wait in `pending_notices`.
    pub notice: Option<Notice>,
    pub pending_notices: VecDeque<Notice>,
    pub pull_prompt: Option<PullPrompt>,
    /// Model currently being downloaded, if any.
    pub pulling: Option<ModelChoice>,
    pub check_models: bool,
    pub export_state: ExportState,
    pub file_picker: FilePickerState,
    pub show_help: bool,
    pub confirm_quit: bool,
    pub should_quit: bool,
    pub tick: usize,
    /// Vertical scroll offset of the display area.
    pub scroll: u16,
    /// Height of the visible display area (set on resize, used for page up/down).
    pub visible_rows: usize,
    /// Wrapped line count of the display text, measured at the last draw.
    pub display_rows: usize,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    pdf_backend: Arc<dyn PdfBackend>,
}

impl App {
    pub fn new(config: &RuntimeConfig, pdf_backend: Arc<dyn PdfBackend>) -> Self {
        let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            screen: Screen::Main,
            session: Session::default(),
            model: config.model,
            length_input: config.sentences.map(|n| n.to_string()).unwrap_or_default(),
            length_backup: String::new(),
            input_mode: InputMode::Normal,
            theme_mode: config.theme,
            theme: Theme::for_mode(config.theme),
            status: None,
            notice: None,
            pending_notices: VecDeque::new(),
            pull_prompt: None,
            pulling: None,
            check_models: config.check_models,
            export_state: ExportState::default(),
            file_picker: FilePickerState::new(start_dir),
            show_help: false,
            confirm_quit: false,
            should_quit: false,
            tick: 0,
            scroll: 0,
            visible_rows: 20,
            display_rows: 0,
            backend_cmd_tx: None,
            pdf_backend,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// Show `notice`, or queue it behind the one already on screen.
    pub fn push_notice(&mut self, notice: Notice) {
        if self.notice.is_none() {
            self.notice = Some(notice);
        } else {
            self.pending_notices.push_back(notice);
        }
    }

    /// Close the current notice and bring up the next queued one.
    pub fn dismiss_notice(&mut self) {
        self.notice = self.pending_notices.pop_front();
    }

    /// Send a command to the backend. Returns false if no listener is attached.
    pub(super) fn send_command(&self, cmd: BackendCommand) -> bool {
        match &self.backend_cmd_tx {
            Some(tx) => tx.send(cmd).is_ok(),
            None => false,
        }
    }

    /// Extract `path` and make it the current document.
    ///
    /// Missing files and extraction failures raise a notice and leave the
    /// session as it was.
    pub fn load_document(&mut self, path: &Path) {
        if !self.session.can_load() {
            tracing::debug!("load ignored while summarizing");
            return;
        }
        if !path.is_file() {
            self.push_notice(Notice::warning(
                "No PDF",
                format!("File not found: {}", path.display()),
            ));
            return;
        }

        match self.pdf_backend.extract_text(path) {
            Ok(text) => {
                let document = Document {
                    path: path.to_path_buf(),
                    text,
                };
                let name = document.display_name();
                let empty = document.is_empty();
                tracing::info!(
                    path = %path.display(),
                    chars = document.text.len(),
                    "loaded PDF"
                );
                self.session.load(document);
                self.scroll = 0;
                if empty {
                    self.status = None;
                    self.push_notice(Notice::info(
                        "No Text",
                        format!("{} contains no extractable text.", name),
                    ));
                } else {
                    self.status = Some(format!("Loaded {}", name));
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "PDF extraction failed");
                self.push_notice(Notice::error(
                    "Error",
                    format!("Could not load {}: {}", path.display(), e),
                ));
            }
        }
    }

    /// Ask the backend whether the selected model is installed.
    pub fn request_model_check(&mut self) {
        if !self.check_models {
            return;
        }
        let model = self.model;
        if !self.send_command(BackendCommand::CheckModel { model }) {
            tracing::debug!(model = model.id(), "no backend attached; skipping model check");
        }
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        f.render_widget(
            ratatui::widgets::Block::default().style(self.theme.base_style()),
            area,
        );

        match self.screen {
            Screen::Main => crate::view::main::render_in(f, self, area),
            Screen::FilePicker => crate::view::file_picker::render_in(f, self, area),
        }

        if self.export_state.active {
            crate::view::export::render(f, self);
        }

        if let Some(prompt) = &self.pull_prompt {
            crate::view::notice::render_pull_prompt(f, &self.theme, prompt);
        }

        if let Some(notice) = &self.notice {
            crate::view::notice::render(f, &self.theme, notice);
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
