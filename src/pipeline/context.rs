//! Per-run input paths and derived artifact paths.
//!
//! A `RunContext` is an explicit value passed through the pipeline — the
//! selected files never live in ambient state.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config;

/// The two user-selected input paths and the derived output location for
/// one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunContext {
    pub config_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl RunContext {
    /// Build a context with the default output directory.
    pub fn new(config_path: PathBuf, report_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            report_path,
            output_dir: config::output_dir(),
        }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Base name shared by all artifacts: the configuration file's stem.
    pub fn artifact_stem(&self) -> String {
        let stem = self
            .config_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("config");
        format!("{}{}", stem, config::ARTIFACT_SUFFIX)
    }

    /// Path of the merged XML document for this run.
    pub fn merged_xml_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xml", self.artifact_stem()))
    }

    /// Path of the rendered PDF for this run.
    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pdf", self.artifact_stem()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(config: &str) -> RunContext {
        RunContext::new(PathBuf::from(config), None).with_output_dir(PathBuf::from("/out"))
    }

    #[test]
    fn artifact_names_derive_from_config_stem() {
        let ctx = ctx("/data/Station_42.xml");
        assert_eq!(
            ctx.merged_xml_path(),
            Path::new("/out/Station_42_FTSConfigViewer.xml")
        );
        assert_eq!(
            ctx.pdf_path(),
            Path::new("/out/Station_42_FTSConfigViewer.pdf")
        );
    }

    #[test]
    fn original_extension_is_stripped() {
        let ctx = ctx("/data/export.cfg");
        assert_eq!(
            ctx.merged_xml_path(),
            Path::new("/out/export_FTSConfigViewer.xml")
        );
    }
}
