use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pdf_summarizer_core::{InferenceBackend, ModelChoice, ModelManager, OllamaClient, PdfBackend};
use pdf_summarizer_mupdf::MupdfBackend;

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod logging;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;
use model::config::RuntimeConfig;
use theme::ThemeMode;

/// PDF Summarizer: extract a PDF's text and summarize it with a local Ollama model.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PDF file to load at startup
    pdf_path: Option<PathBuf>,

    /// Model to summarize with: llama3, gemma or mistral
    #[arg(long)]
    model: Option<ModelChoice>,

    /// Pre-filled summary length in sentences
    #[arg(long)]
    sentences: Option<u32>,

    /// Ollama host, base URL or full /api/generate URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (0 = wait forever)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to the ollama executable used to list and pull models
    #[arg(long)]
    ollama_bin: Option<String>,

    /// Skip checking whether the selected model is installed
    #[arg(long)]
    no_model_check: bool,

    /// Color theme: light (default) or dark
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Resolve settings: CLI flags > env vars > config file > defaults.
fn resolve_config(args: &Args) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config_file::apply_to_runtime_config(&config_file::load_config(), &mut config);
    config_file::apply_env(&mut config, |key| std::env::var(key).ok());

    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(n) = args.sentences.filter(|&n| n > 0) {
        config.sentences = Some(n);
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    if let Some(bin) = &args.ollama_bin {
        config.ollama_bin = bin.clone();
    }
    if args.no_model_check {
        config.check_models = false;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = logging::init_logging(args.log_file.clone());

    let config = resolve_config(&args);
    tracing::info!(
        endpoint = %config.endpoint,
        model = config.model.id(),
        timeout_secs = config.timeout_secs,
        check_models = config.check_models,
        "configuration resolved"
    );

    let inference: Arc<dyn InferenceBackend> = Arc::new(
        OllamaClient::new(&config.endpoint).with_timeout(Duration::from_secs(config.timeout_secs)),
    );
    let manager = ModelManager::new(config.ollama_bin.clone());
    let pdf_backend: Arc<dyn PdfBackend> = Arc::new(MupdfBackend::new());

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(&config, pdf_backend);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    let listener = backend::spawn_listener(cmd_rx, event_tx, inference, manager, cancel.clone());

    if let Some(path) = &args.pdf_path {
        app.load_document(path);
    }
    app.request_model_check();

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt, &app.input_mode));
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            break;
        }
    }

    cancel.cancel();
    let _ = listener.await;
    tracing::info!("shutting down");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
