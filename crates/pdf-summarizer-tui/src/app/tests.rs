use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedReceiver;

use pdf_summarizer_core::stats::with_stats;
use pdf_summarizer_core::{BackendError, SUMMARY_SENTINEL};

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;

const TEXT: &str = "The quick brown fox jumps. It lands softly! Does it run? Yes.";

/// Extractor returning canned text, or an extraction error when `None`.
struct FakePdf(Option<&'static str>);

impl PdfBackend for FakePdf {
    fn extract_text(&self, _path: &Path) -> Result<String, BackendError> {
        self.0
            .map(str::to_string)
            .ok_or_else(|| BackendError::ExtractionError("broken xref table".into()))
    }
}

/// Create a minimal App for testing (no model checks, no backend attached).
fn test_app(pdf: FakePdf) -> App {
    let config = RuntimeConfig {
        check_models: false,
        ..RuntimeConfig::default()
    };
    App::new(&config, Arc::new(pdf))
}

/// Attach a command channel and return its receiving end.
fn attach(app: &mut App) -> UnboundedReceiver<BackendCommand> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    rx
}

/// A real file on disk for `load_document` to find; content is ignored by `FakePdf`.
fn pdf_on_disk(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("paper.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();
    path
}

fn loaded_app() -> (App, UnboundedReceiver<BackendCommand>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(FakePdf(Some(TEXT)));
    let rx = attach(&mut app);
    app.load_document(&pdf_on_disk(&dir));
    app.length_input = "2".into();
    (app, rx, dir)
}

fn notice_title(app: &App) -> Option<&str> {
    app.notice.as_ref().map(|n| n.title.as_str())
}

// ── Loading ─────────────────────────────────────────────────────

#[test]
fn load_shows_extracted_text() {
    let (app, _rx, _dir) = loaded_app();
    assert_eq!(app.phase(), Phase::DocumentLoaded);
    assert_eq!(app.session.display, TEXT);
    assert!(app.notice.is_none());
    assert_eq!(app.status.as_deref(), Some("Loaded paper.pdf"));
}

#[test]
fn missing_file_warns_and_keeps_state() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.load_document(Path::new("/definitely/not/here.pdf"));
    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(notice_title(&app), Some("No PDF"));
}

#[test]
fn extraction_failure_reports_error_and_keeps_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(FakePdf(None));
    app.session.load(Document {
        path: PathBuf::from("earlier.pdf"),
        text: "Earlier text.".into(),
    });

    app.load_document(&pdf_on_disk(&dir));

    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("broken xref table"));
    assert_eq!(app.phase(), Phase::DocumentLoaded);
    assert_eq!(app.session.document_text(), "Earlier text.");
}

#[test]
fn empty_document_is_rejected_without_sending_a_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(FakePdf(Some("")));
    let mut rx = attach(&mut app);

    app.load_document(&pdf_on_disk(&dir));
    assert_eq!(app.phase(), Phase::Idle);
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
    app.update(Action::DrillIn);

    app.length_input = "3".into();
    app.update(Action::Summarize);

    assert_eq!(notice_title(&app), Some("No PDF"));
    assert_eq!(app.notice.as_ref().unwrap().message, "Please load a PDF first.");
    assert!(rx.try_recv().is_err());
}

// ── Summary length ──────────────────────────────────────────────

#[test]
fn sentence_count_must_be_a_positive_integer() {
    assert_eq!(parse_sentence_count("5"), Some(5));
    assert_eq!(parse_sentence_count(" 12 "), Some(12));
    assert_eq!(parse_sentence_count(""), None);
    assert_eq!(parse_sentence_count("0"), None);
    assert_eq!(parse_sentence_count("-3"), None);
    assert_eq!(parse_sentence_count("+3"), None);
    assert_eq!(parse_sentence_count("2.5"), None);
    assert_eq!(parse_sentence_count("five"), None);
    assert_eq!(parse_sentence_count("\u{0663}"), None);
    assert_eq!(parse_sentence_count("99999999999"), None);
}

#[test]
fn invalid_length_warns_and_sends_nothing() {
    for input in ["", "abc", "0", "-1", "1.5"] {
        let (mut app, mut rx, _dir) = loaded_app();
        app.length_input = input.into();

        app.update(Action::Summarize);

        assert_eq!(notice_title(&app), Some("Invalid Length"), "input {input:?}");
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Please enter a valid number."
        );
        assert_eq!(app.phase(), Phase::DocumentLoaded);
        assert!(rx.try_recv().is_err(), "input {input:?} reached the worker");
    }
}

#[test]
fn length_field_editing_and_cancel() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.length_input = "4".into();

    app.update(Action::EditLength);
    assert_eq!(app.input_mode, InputMode::LengthInput);
    app.update(Action::Backspace);
    app.update(Action::TextInput('1'));
    app.update(Action::TextInput('0'));
    app.update(Action::Confirm);
    assert_eq!(app.length_input, "10");
    assert_eq!(app.input_mode, InputMode::Normal);

    app.update(Action::EditLength);
    app.update(Action::TextInput('7'));
    app.update(Action::Cancel);
    assert_eq!(app.length_input, "10");
}

// ── Summarizing ─────────────────────────────────────────────────

#[test]
fn summarize_sends_request_and_disables_controls() {
    let (mut app, mut rx, _dir) = loaded_app();
    app.model = ModelChoice::Mistral;

    app.update(Action::Summarize);

    match rx.try_recv() {
        Ok(BackendCommand::Summarize { request }) => {
            assert_eq!(request.text, TEXT);
            assert_eq!(request.sentence_count, 2);
            assert_eq!(request.model, ModelChoice::Mistral);
        }
        other => panic!("expected summarize command, got {other:?}"),
    }
    assert_eq!(app.phase(), Phase::Summarizing);
    assert!(!app.session.can_load());
    assert!(!app.session.can_summarize());

    // Load and summarize are ignored while the request is in flight
    app.update(Action::LoadPdf);
    assert_eq!(app.screen, Screen::Main);
    app.update(Action::Summarize);
    assert!(rx.try_recv().is_err());
    assert!(app.notice.is_none());
}

#[test]
fn completion_reenables_controls_and_shows_summary_with_stats() {
    let (mut app, _rx, _dir) = loaded_app();
    app.update(Action::Summarize);

    app.handle_backend_event(BackendEvent::SummaryComplete {
        summary: "A fox jumps.".into(),
    });

    assert_eq!(app.phase(), Phase::DocumentLoaded);
    assert!(app.session.can_load());
    assert!(app.session.can_summarize());
    assert!(app.session.can_export());
    assert_eq!(app.session.display, with_stats(TEXT, "A fox jumps."));

    let status = app.status.as_deref().unwrap();
    assert!(status.starts_with("Done in "), "{status}");
    assert!(status.ends_with(" seconds"), "{status}");
}

#[test]
fn inference_failure_displays_sentinel_with_stats() {
    let (mut app, _rx, _dir) = loaded_app();
    app.update(Action::Summarize);

    app.handle_backend_event(BackendEvent::SummaryComplete {
        summary: SUMMARY_SENTINEL.into(),
    });

    assert!(app.session.display.starts_with(SUMMARY_SENTINEL));
    assert_eq!(app.session.display, with_stats(TEXT, SUMMARY_SENTINEL));
}

#[test]
fn stray_completion_is_ignored() {
    let (mut app, _rx, _dir) = loaded_app();
    app.handle_backend_event(BackendEvent::SummaryComplete {
        summary: "Unrequested.".into(),
    });
    assert_eq!(app.session.display, TEXT);
    assert!(!app.session.has_summary);
}

#[test]
fn undeliverable_command_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.load_document(&pdf_on_disk(&dir));
    app.length_input = "3".into();

    app.update(Action::Summarize);

    assert_eq!(app.phase(), Phase::DocumentLoaded);
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));
}

// ── Export ──────────────────────────────────────────────────────

fn summarized_app() -> (App, tempfile::TempDir) {
    let (mut app, _rx, dir) = loaded_app();
    app.update(Action::Summarize);
    app.handle_backend_event(BackendEvent::SummaryComplete {
        summary: "A fox jumps.".into(),
    });
    (app, dir)
}

#[test]
fn export_without_summary_warns() {
    let (mut app, _rx, _dir) = loaded_app();
    app.update(Action::Export);
    assert!(!app.export_state.active);
    assert_eq!(notice_title(&app), Some("Empty Summary"));
    assert_eq!(
        app.notice.as_ref().unwrap().message,
        "There is no summary to export."
    );
}

#[test]
fn export_writes_display_verbatim() {
    let (mut app, dir) = summarized_app();
    let before = app.session.display.clone();

    app.update(Action::Export);
    assert!(app.export_state.active);
    assert_eq!(app.export_state.buffer, "summary");
    assert_eq!(app.input_mode, InputMode::ExportPath);

    app.export_state.buffer = dir.path().join("out").to_string_lossy().to_string();
    app.update(Action::Confirm);

    let written = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(written, before);
    assert_eq!(app.session.display, before);
    assert!(!app.export_state.active);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.status.as_deref().unwrap().starts_with("Saved to "));
}

#[test]
fn export_failure_shows_error_and_keeps_summary() {
    let (mut app, dir) = summarized_app();
    let before = app.session.display.clone();

    app.update(Action::Export);
    app.export_state.buffer = dir
        .path()
        .join("missing")
        .join("out")
        .to_string_lossy()
        .to_string();
    app.update(Action::Confirm);

    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Failed to save file: "));
    assert_eq!(app.session.display, before);
}

#[test]
fn export_cancel_closes_dialog() {
    let (mut app, _dir) = summarized_app();
    app.update(Action::Export);
    app.update(Action::TextInput('x'));
    app.update(Action::Cancel);
    assert!(!app.export_state.active);
    assert_eq!(app.input_mode, InputMode::Normal);
}

// ── Theme, models, modals ───────────────────────────────────────

#[test]
fn theme_toggle_switches_palette() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    assert_eq!(app.theme_mode, ThemeMode::Light);

    app.update(Action::ToggleTheme);
    assert_eq!(app.theme_mode, ThemeMode::Dark);
    assert_eq!(app.theme.background, Theme::dark().background);

    app.update(Action::ToggleTheme);
    assert_eq!(app.theme.background, Theme::light().background);
}

#[test]
fn cycling_model_requests_a_check() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.check_models = true;
    let mut rx = attach(&mut app);

    app.update(Action::CycleModel);

    assert_eq!(app.model, ModelChoice::Gemma);
    match rx.try_recv() {
        Ok(BackendCommand::CheckModel { model }) => assert_eq!(model, ModelChoice::Gemma),
        other => panic!("expected check command, got {other:?}"),
    }
}

#[test]
fn cycling_model_without_checks_sends_nothing() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    let mut rx = attach(&mut app);
    app.update(Action::CycleModel);
    assert_eq!(app.model, ModelChoice::Gemma);
    assert!(rx.try_recv().is_err());
}

#[test]
fn missing_model_prompt_then_pull() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    let mut rx = attach(&mut app);

    app.handle_backend_event(BackendEvent::ModelChecked {
        model: ModelChoice::Llama3,
        result: Ok(false),
    });
    assert_eq!(
        app.pull_prompt,
        Some(PullPrompt {
            model: ModelChoice::Llama3,
            warning: None
        })
    );

    app.update(Action::Yes);
    assert!(app.pull_prompt.is_none());
    assert_eq!(app.pulling, Some(ModelChoice::Llama3));
    match rx.try_recv() {
        Ok(BackendCommand::PullModel { model }) => assert_eq!(model, ModelChoice::Llama3),
        other => panic!("expected pull command, got {other:?}"),
    }

    app.handle_backend_event(BackendEvent::PullComplete {
        model: ModelChoice::Llama3,
        result: Ok(()),
    });
    assert!(app.pulling.is_none());
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
}

#[test]
fn failed_listing_prompts_with_warning_and_can_be_declined() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    let mut rx = attach(&mut app);

    app.handle_backend_event(BackendEvent::ModelChecked {
        model: ModelChoice::Llama3,
        result: Err("ollama: not found".into()),
    });
    let prompt = app.pull_prompt.as_ref().unwrap();
    assert_eq!(prompt.warning.as_deref(), Some("ollama: not found"));

    app.update(Action::No);
    assert!(app.pull_prompt.is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn stale_model_check_is_ignored() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.model = ModelChoice::Mistral;
    app.handle_backend_event(BackendEvent::ModelChecked {
        model: ModelChoice::Gemma,
        result: Ok(false),
    });
    assert!(app.pull_prompt.is_none());
}

#[test]
fn pull_failure_is_reported() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.pulling = Some(ModelChoice::Gemma);
    app.handle_backend_event(BackendEvent::PullComplete {
        model: ModelChoice::Gemma,
        result: Err("exit status: 1".into()),
    });
    assert!(app.pulling.is_none());
    let notice = app.notice.as_ref().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("gemma"));
}

#[test]
fn pull_result_waits_behind_an_open_notice() {
    let (mut app, dir) = summarized_app();
    app.update(Action::Export);
    app.export_state.buffer = dir
        .path()
        .join("missing")
        .join("out")
        .to_string_lossy()
        .to_string();
    app.update(Action::Confirm);
    assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));

    app.pulling = Some(ModelChoice::Gemma);
    app.handle_backend_event(BackendEvent::PullComplete {
        model: ModelChoice::Gemma,
        result: Ok(()),
    });
    assert!(app.pulling.is_none());
    assert!(
        app.notice
            .as_ref()
            .unwrap()
            .message
            .starts_with("Failed to save file: ")
    );

    app.update(Action::DrillIn);
    assert_eq!(notice_title(&app), Some("Model Ready"));
    app.update(Action::DrillIn);
    assert!(app.notice.is_none());
    assert!(app.pending_notices.is_empty());
}

#[test]
fn notice_blocks_other_input_until_dismissed() {
    let (mut app, mut rx, _dir) = loaded_app();
    app.notice = Some(Notice::warning("Heads up", "Something happened."));

    app.update(Action::Summarize);
    assert!(rx.try_recv().is_err());
    assert!(app.notice.is_some());

    app.update(Action::NavigateBack);
    assert!(app.notice.is_none());
    app.update(Action::Summarize);
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::Summarize { .. })));
}

#[test]
fn quit_requires_confirmation() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);

    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);

    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn load_pdf_opens_picker_and_esc_returns() {
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.update(Action::LoadPdf);
    assert_eq!(app.screen, Screen::FilePicker);
    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Main);
}

#[test]
fn picker_lists_directories_and_pdfs_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("papers")).unwrap();
    std::fs::write(dir.path().join("b.PDF"), b"x").unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let picker = FilePickerState::new(dir.path().to_path_buf());
    let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["..", "papers", "a.pdf", "b.PDF"]);
}

#[test]
fn picking_a_pdf_loads_it() {
    let dir = tempfile::tempdir().unwrap();
    pdf_on_disk(&dir);
    let mut app = test_app(FakePdf(Some(TEXT)));
    app.update(Action::LoadPdf);
    app.file_picker = FilePickerState::new(dir.path().to_path_buf());

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);

    assert_eq!(app.screen, Screen::Main);
    assert_eq!(app.phase(), Phase::DocumentLoaded);
    assert_eq!(app.session.display, TEXT);
}
