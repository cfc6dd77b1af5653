//! Pipeline orchestrator.
//!
//! Single entry point that drives a generation run:
//! validate inputs → scan report → merge → write XML → transform → render
//! → write PDF. The render collaborator is trait-injected so the pipeline
//! is testable without the real rendering stack.

use std::path::PathBuf;

use serde::Serialize;

use super::context::RunContext;
use super::extraction::{ExtractionError, ReportScanner};
use super::merge::{self, MergeError};
use super::render::{RenderEngine, RenderError, StyledPdfEngine};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced by a generation run. All are caught at the session/CLI
/// boundary and converted to user-facing messages; none crash the process.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Could not read configuration file {path}: {source}")]
    UnreadableConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Report extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Cannot write PDF {path}: {source}")]
    WritePdf {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Summary of a completed run, returned to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub merged_xml_path: PathBuf,
    pub pdf_path: PathBuf,
    /// Number of fields extracted from the End Visit Report.
    pub field_count: usize,
    /// Whether a report was part of this run.
    pub report_used: bool,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the extract → merge → render sequence for one run at a time.
/// Blocking and synchronous; no partial PDF is left behind on failure
/// because the PDF is written only after the renderer succeeds.
pub struct ConfigProcessor {
    scanner: ReportScanner,
    engine: Box<dyn RenderEngine + Send + Sync>,
}

impl ConfigProcessor {
    pub fn new(engine: Box<dyn RenderEngine + Send + Sync>) -> Self {
        Self {
            scanner: ReportScanner::new(),
            engine,
        }
    }

    /// Build a processor with the production render engine.
    pub fn bundled() -> Result<Self, ProcessingError> {
        Ok(Self::new(Box::new(StyledPdfEngine::bundled()?)))
    }

    /// Run the full pipeline for one context.
    pub fn process(&self, ctx: &RunContext) -> Result<ProcessingOutcome, ProcessingError> {
        if !ctx.config_path.is_file() {
            return Err(ProcessingError::ConfigNotFound(ctx.config_path.clone()));
        }

        // Step 1: scan the report, if one was loaded. Absence degrades to
        // an empty field set, not an error.
        let fields = match &ctx.report_path {
            Some(path) => self.scanner.scan_file(path)?,
            None => {
                tracing::info!("No End Visit Report loaded, proceeding with configuration only");
                Vec::new()
            }
        };

        // Step 2: read the original configuration export.
        let config_text = std::fs::read_to_string(&ctx.config_path).map_err(|source| {
            ProcessingError::UnreadableConfig {
                path: ctx.config_path.clone(),
                source,
            }
        })?;

        // Step 3: merge and write the combined document.
        let merged = merge::build_merged_document(&config_text, &fields);
        let merged_xml_path = merge::write_merged_document(ctx, &merged)?;

        // Step 4: two-stage render.
        let styled = self.engine.transform(&merged)?;
        let pdf_bytes = self.engine.render(&styled)?;

        let pdf_path = ctx.pdf_path();
        std::fs::write(&pdf_path, &pdf_bytes).map_err(|source| ProcessingError::WritePdf {
            path: pdf_path.clone(),
            source,
        })?;

        tracing::info!(
            config = %ctx.config_path.display(),
            pdf = %pdf_path.display(),
            fields = fields.len(),
            "Generation complete"
        );

        Ok(ProcessingOutcome {
            merged_xml_path,
            pdf_path,
            field_count: fields.len(),
            report_used: ctx.report_path.is_some(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
