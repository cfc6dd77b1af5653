//! Guarded command surface mirroring the desktop shell's buttons:
//! load config, load report, generate, reset.
//!
//! File paths live in an explicit session value, never in ambient state.
//! Guard violations are reported, not crashes, and leave the session
//! untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::context::RunContext;
use crate::pipeline::processor::{ConfigProcessor, ProcessingError, ProcessingOutcome};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please load a logger configuration file first")]
    ConfigNotLoaded,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Observable session state, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    ConfigLoaded,
    ReportLoaded,
}

pub struct ViewerSession {
    config_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    processor: ConfigProcessor,
}

impl ViewerSession {
    pub fn new(processor: ConfigProcessor) -> Self {
        Self {
            config_path: None,
            report_path: None,
            output_dir: None,
            processor,
        }
    }

    /// Route artifacts somewhere other than the default output directory.
    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = Some(dir);
    }

    pub fn state(&self) -> SessionState {
        match (&self.config_path, &self.report_path) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::ConfigLoaded,
            (Some(_), Some(_)) => SessionState::ReportLoaded,
        }
    }

    /// Select the logger configuration file.
    pub fn load_config(&mut self, path: PathBuf) -> Result<(), SessionError> {
        validate_input_file(&path)?;
        tracing::info!(config = %path.display(), "Configuration loaded");
        self.config_path = Some(path);
        Ok(())
    }

    /// Select the End Visit Report. Rejected until a configuration is
    /// loaded.
    pub fn load_report(&mut self, path: PathBuf) -> Result<(), SessionError> {
        if self.config_path.is_none() {
            return Err(SessionError::ConfigNotLoaded);
        }
        validate_input_file(&path)?;
        tracing::info!(report = %path.display(), "End Visit Report loaded");
        self.report_path = Some(path);
        Ok(())
    }

    /// Run the pipeline. Rejected without a configuration; proceeds with
    /// an empty field set without a report. Blocking for the duration of
    /// the run.
    pub fn generate(&self) -> Result<ProcessingOutcome, SessionError> {
        let config_path = self
            .config_path
            .clone()
            .ok_or(SessionError::ConfigNotLoaded)?;

        let mut ctx = RunContext::new(config_path, self.report_path.clone());
        if let Some(dir) = &self.output_dir {
            ctx = ctx.with_output_dir(dir.clone());
        }

        Ok(self.processor.process(&ctx)?)
    }

    /// Clear both paths. Generated artifacts stay on disk.
    pub fn reset(&mut self) {
        self.config_path = None;
        self.report_path = None;
        tracing::info!("Session reset");
    }
}

fn validate_input_file(path: &Path) -> Result<(), SessionError> {
    if !path.exists() {
        return Err(SessionError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SessionError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}
