pub mod labels;
pub mod scanner;

pub use labels::*;
pub use scanner::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Could not read End Visit Report {path}: {source}")]
    UnreadableReport {
        path: PathBuf,
        source: std::io::Error,
    },
}
