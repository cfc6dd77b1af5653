//! Two-stage render collaborator: structured markup → styled markup → PDF.
//!
//! Modeled as a trait so the orchestrator can be tested without the real
//! rendering stack. The production engine pairs the `quick-xml` transform
//! with the `printpdf` renderer and a bundled stylesheet.

pub mod pdf;
pub mod stylesheet;
pub mod transform;

pub use stylesheet::Stylesheet;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Bundled stylesheet resource is invalid: {0}")]
    Stylesheet(String),

    #[error("Malformed merged document: {0}")]
    MalformedDocument(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

/// Intermediate styled-markup form: a flat sequence of layout blocks the
/// renderer turns into fixed-layout pages.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledDocument {
    pub title: String,
    pub blocks: Vec<StyledBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyledBlock {
    /// Section heading for an element, indented by nesting depth.
    Heading { depth: usize, text: String },
    /// A label/value line (attribute or element text).
    Row {
        depth: usize,
        label: String,
        value: String,
    },
}

/// The render collaborator consumed by the pipeline orchestrator.
pub trait RenderEngine {
    /// Structured markup → styled markup.
    fn transform(&self, merged_xml: &str) -> Result<StyledDocument, RenderError>;

    /// Styled markup → fixed-layout PDF bytes.
    fn render(&self, styled: &StyledDocument) -> Result<Vec<u8>, RenderError>;
}

/// Production engine: bundled stylesheet, landscape-Letter PDF output.
pub struct StyledPdfEngine {
    stylesheet: Stylesheet,
}

impl StyledPdfEngine {
    /// Build the engine with the stylesheet embedded in the binary.
    pub fn bundled() -> Result<Self, RenderError> {
        Ok(Self {
            stylesheet: Stylesheet::bundled()?,
        })
    }
}

impl RenderEngine for StyledPdfEngine {
    fn transform(&self, merged_xml: &str) -> Result<StyledDocument, RenderError> {
        transform::transform_document(merged_xml)
    }

    fn render(&self, styled: &StyledDocument) -> Result<Vec<u8>, RenderError> {
        pdf::render_pdf(styled, &self.stylesheet)
    }
}
