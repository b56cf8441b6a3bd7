use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "pdf_summarizer_tui=info,pdf_summarizer_core=info,pdf_summarizer_mupdf=info";
const LOG_FILE_NAME: &str = "pdf-summarizer.log";

/// Default log location: `<cache_dir>/pdf-summarizer/pdf-summarizer.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("pdf-summarizer").join(LOG_FILE_NAME))
}

/// Route `tracing` output to a file; the terminal belongs to the UI.
///
/// Returns the writer guard, which must live until shutdown so buffered lines
/// are flushed. Returns `None` (logging disabled) when no location is usable.
pub fn init_logging(log_file: Option<PathBuf>) -> Option<WorkerGuard> {
    let path = log_file.or_else(default_log_path)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name()?.to_owned();
    std::fs::create_dir_all(dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .ok()?;

    tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging started");
    Some(guard)
}
