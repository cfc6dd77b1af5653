use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "FTSConfigViewer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Suffix appended to every artifact derived from a configuration file.
pub const ARTIFACT_SUFFIX: &str = "_FTSConfigViewer";

/// Environment variable that overrides the output directory.
pub const OUTPUT_DIR_ENV: &str = "FTS_VIEWER_OUTPUT_DIR";

/// Get the directory where merged documents and PDFs are written.
///
/// Resolution order: `FTS_VIEWER_OUTPUT_DIR`, then the platform cache
/// directory, then the system temp directory. The directory itself is
/// created lazily by the merge step on first write.
pub fn output_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME").replace('-', "_"))
}
