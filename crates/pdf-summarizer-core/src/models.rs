//! Local model management through the `ollama` command-line tool.

use std::process::Output;

use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program} {subcommand}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        subcommand: String,
        status: String,
        stderr: String,
    },
}

/// True when `model` appears anywhere in the listing output.
pub fn listing_contains(output: &str, model: &str) -> bool {
    output.contains(model)
}

/// Runs `list` and `pull` through the model-management CLI.
///
/// The child is killed when the awaiting future is dropped.
#[derive(Debug, Clone)]
pub struct ModelManager {
    program: String,
    /// Arguments placed before the subcommand (e.g. `["-c"]` for a shell shim).
    prefix_args: Vec<String>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new("ollama")
    }
}

impl ModelManager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Pass `args` ahead of every subcommand.
    pub fn with_prefix_args(mut self, args: Vec<String>) -> Self {
        self.prefix_args = args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, subcommand: &[&str]) -> Result<Output, ModelError> {
        Command::new(&self.program)
            .args(&self.prefix_args)
            .args(subcommand)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ModelError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    fn check_status(&self, subcommand: &str, output: &Output) -> Result<(), ModelError> {
        if output.status.success() {
            return Ok(());
        }
        Err(ModelError::Failed {
            program: self.program.clone(),
            subcommand: subcommand.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    /// Captured stdout of `<program> list`.
    pub async fn list(&self) -> Result<String, ModelError> {
        let output = self.run(&["list"]).await?;
        self.check_status("list", &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Whether `model` shows up in the installed-model listing.
    pub async fn is_installed(&self, model: &str) -> Result<bool, ModelError> {
        let listing = self.list().await?;
        let installed = listing_contains(&listing, model);
        tracing::debug!(model, installed, "checked model listing");
        Ok(installed)
    }

    /// Download `model`. Success is decided by the exit status alone.
    pub async fn pull(&self, model: &str) -> Result<(), ModelError> {
        tracing::info!(model, program = %self.program, "pulling model");
        let output = self.run(&["pull", model]).await?;
        self.check_status("pull", &output)
    }
}
