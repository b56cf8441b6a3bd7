use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::config::RuntimeConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
/// The file is only ever read; settings changed in the window are not written back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub inference: Option<InferenceConfig>,
    pub summary: Option<SummaryConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InferenceConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub ollama_bin: Option<String>,
    pub check_models: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryConfig {
    pub sentences: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/pdf-summarizer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdf-summarizer").join("config.toml"))
}

/// Load config by cascading CWD `.pdf-summarizer.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdf-summarizer.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), "loaded config file");
            Some(cfg)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bi = base.inference.unwrap_or_default();
    let oi = overlay.inference.unwrap_or_default();
    let bs = base.summary.unwrap_or_default();
    let os = overlay.summary.unwrap_or_default();
    let bd = base.display.unwrap_or_default();
    let od = overlay.display.unwrap_or_default();

    ConfigFile {
        inference: Some(InferenceConfig {
            endpoint: oi.endpoint.or(bi.endpoint),
            model: oi.model.or(bi.model),
            timeout_secs: oi.timeout_secs.or(bi.timeout_secs),
            ollama_bin: oi.ollama_bin.or(bi.ollama_bin),
            check_models: oi.check_models.or(bi.check_models),
        }),
        summary: Some(SummaryConfig {
            sentences: os.sentences.or(bs.sentences),
        }),
        display: Some(DisplayConfig {
            theme: od.theme.or(bd.theme),
        }),
    }
}

/// Fill a `RuntimeConfig` from the file config.
/// Only sets values that are present and valid; bad values are logged and skipped.
pub fn apply_to_runtime_config(file_cfg: &ConfigFile, cfg: &mut RuntimeConfig) {
    if let Some(inf) = &file_cfg.inference {
        if let Some(endpoint) = inf.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            cfg.endpoint = endpoint.to_string();
        }
        if let Some(model) = &inf.model {
            match model.parse() {
                Ok(m) => cfg.model = m,
                Err(e) => tracing::warn!(error = %e, "ignoring configured model"),
            }
        }
        if let Some(secs) = inf.timeout_secs {
            cfg.timeout_secs = secs;
        }
        if let Some(bin) = inf.ollama_bin.as_deref().filter(|b| !b.trim().is_empty()) {
            cfg.ollama_bin = bin.to_string();
        }
        if let Some(check) = inf.check_models {
            cfg.check_models = check;
        }
    }
    if let Some(n) = file_cfg.summary.as_ref().and_then(|s| s.sentences) {
        if n > 0 {
            cfg.sentences = Some(n);
        }
    }
    if let Some(theme) = file_cfg.display.as_ref().and_then(|d| d.theme.as_ref()) {
        match theme.parse() {
            Ok(t) => cfg.theme = t,
            Err(e) => tracing::warn!(error = %e, "ignoring configured theme"),
        }
    }
}

/// Apply environment overrides (`OLLAMA_HOST`, `PDF_SUMMARIZER_MODEL`) through `lookup`.
pub fn apply_env(cfg: &mut RuntimeConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("OLLAMA_HOST").filter(|h| !h.trim().is_empty()) {
        cfg.endpoint = host;
    }
    if let Some(model) = lookup("PDF_SUMMARIZER_MODEL") {
        match model.parse() {
            Ok(m) => cfg.model = m,
            Err(e) => tracing::warn!(error = %e, "ignoring PDF_SUMMARIZER_MODEL"),
        }
    }
}
