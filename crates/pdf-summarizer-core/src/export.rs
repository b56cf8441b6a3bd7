//! Writing the displayed summary to a text file.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extension enforced on every exported file.
pub const EXPORT_EXTENSION: &str = ".txt";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("there is no summary to export")]
    Empty,
    #[error("no output path given")]
    NoPath,
    #[error("failed to save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append [`EXPORT_EXTENSION`] unless the path already has it (any case).
pub fn with_txt_extension(path: &str) -> PathBuf {
    let has_txt = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(&EXPORT_EXTENSION[1..]));
    if has_txt {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("{}{}", path, EXPORT_EXTENSION))
    }
}

/// Write `text` verbatim as UTF-8 to `path` (extension enforced).
///
/// Returns the path actually written.
pub fn export_text(path: &str, text: &str) -> Result<PathBuf, ExportError> {
    if text.trim().is_empty() {
        return Err(ExportError::Empty);
    }
    let path = path.trim();
    if path.is_empty() {
        return Err(ExportError::NoPath);
    }
    let target = with_txt_extension(path);
    write_file(&target, text)?;
    tracing::info!(path = %target.display(), bytes = text.len(), "exported summary");
    Ok(target)
}

fn write_file(target: &Path, text: &str) -> Result<(), ExportError> {
    std::fs::write(target, text.as_bytes()).map_err(|source| ExportError::Io {
        path: target.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_extension_only_when_missing() {
        assert_eq!(with_txt_extension("out"), PathBuf::from("out.txt"));
        assert_eq!(with_txt_extension("out.txt"), PathBuf::from("out.txt"));
        assert_eq!(with_txt_extension("notes.md"), PathBuf::from("notes.md.txt"));
    }

    #[test]
    fn existing_extension_is_matched_case_insensitively() {
        assert_eq!(with_txt_extension("notes.TXT"), PathBuf::from("notes.TXT"));
        assert_eq!(with_txt_extension("notes.Txt"), PathBuf::from("notes.Txt"));
        assert_eq!(with_txt_extension(".txt"), PathBuf::from(".txt.txt"));
    }

    #[test]
    fn round_trip_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("summary");
        let text = "Résumé: ünïcödé ✓.\n---\nWord Count: 10 \u{2192} 2 (80.0% shorter)\n";

        let written = export_text(base.to_str().unwrap(), text).unwrap();

        assert_eq!(written, dir.path().join("summary.txt"));
        assert_eq!(std::fs::read(&written).unwrap(), text.as_bytes());
    }

    #[test]
    fn blank_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("empty");
        let err = export_text(base.to_str().unwrap(), " \n\t").unwrap_err();
        assert!(matches!(err, ExportError::Empty));
        assert!(!dir.path().join("empty.txt").exists());
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing-dir").join("out");
        let err = export_text(bad.to_str().unwrap(), "text").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
