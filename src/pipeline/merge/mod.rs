//! Builds the merged document: a synthetic `<XMLRoot>` wrapper holding the
//! extracted visit-report fields (if any) followed by the body of the
//! original configuration export.
//!
//! The first two lines of the configuration file are dropped — they are the
//! original XML declaration and stylesheet reference, superseded by the
//! wrapper's own declaration.

use std::path::PathBuf;

use quick_xml::escape::escape;
use thiserror::Error;

use super::context::RunContext;
use super::extraction::ReportField;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write merged document {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const ROOT_OPEN: &str = "<XMLRoot>";
const ROOT_CLOSE: &str = "</XMLRoot>";

/// Build the merged document text from the raw configuration file content
/// and the extracted fields. Pure string assembly — cannot fail.
///
/// Attribute order inside `<VisitReport>` is extraction order; with no
/// fields the element is omitted entirely. Attribute values are escaped so
/// an embedded `"` cannot break the document.
pub fn build_merged_document(config_text: &str, fields: &[ReportField]) -> String {
    let mut doc = String::with_capacity(config_text.len() + 256);
    doc.push_str(XML_DECLARATION);
    doc.push_str(ROOT_OPEN);

    if !fields.is_empty() {
        doc.push_str("<VisitReport ");
        for field in fields {
            doc.push_str(&field.name);
            doc.push_str("=\"");
            doc.push_str(&escape(field.value.as_str()));
            doc.push_str("\" ");
        }
        doc.push_str("></VisitReport>");
    }

    doc.push_str(strip_preamble(config_text));
    doc.push_str(ROOT_CLOSE);
    doc
}

/// Drop the first two lines (declaration + stylesheet reference),
/// regardless of their contents.
fn strip_preamble(text: &str) -> &str {
    let mut rest = text;
    for _ in 0..2 {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}

/// Write the merged document to its deterministic path under the run's
/// output directory, creating the directory on first use. Reruns for the
/// same configuration file overwrite the previous artifact.
pub fn write_merged_document(ctx: &RunContext, document: &str) -> Result<PathBuf, MergeError> {
    std::fs::create_dir_all(&ctx.output_dir).map_err(|source| MergeError::CreateDir {
        path: ctx.output_dir.clone(),
        source,
    })?;

    let path = ctx.merged_xml_path();
    std::fs::write(&path, document).map_err(|source| MergeError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Merged document written");
    Ok(path)
}
