//! Second render stage: styled blocks → fixed-layout PDF via `printpdf`.
//!
//! Landscape Letter, 5 mm margins, built-in Helvetica fonts, manual
//! y-cursor layout with automatic page breaks.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use super::{RenderError, StyledBlock, StyledDocument, Stylesheet};
use crate::config;

const PAGE_WIDTH_MM: f32 = 279.4;
const PAGE_HEIGHT_MM: f32 = 215.9;
const ROW_WRAP_CHARS: usize = 140;

/// Render the styled document to PDF bytes.
pub fn render_pdf(styled: &StyledDocument, style: &Stylesheet) -> Result<Vec<u8>, RenderError> {
    let (doc, page1, layer1) = PdfDocument::new(
        &styled.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;

    let footer = format!(
        "Generated by {} v{} on {}",
        config::APP_NAME,
        config::APP_VERSION,
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = top_y(style);
    draw_footer(&layer, &footer, &font, style);

    // Title
    layer.use_text(styled.title.as_str(), style.title_size, Mm(style.margin_mm), y, &bold);
    y -= Mm(style.heading_leading_mm + 2.0);

    for block in &styled.blocks {
        if y < bottom_y(style) {
            (layer, y) = break_page(&doc, &footer, &font, style);
        }
        match block {
            StyledBlock::Heading { depth, text } => {
                y -= Mm(2.0);
                let x = Mm(style.margin_mm + style.indent_mm * *depth as f32);
                layer.use_text(text.as_str(), style.heading_size, x, y, &bold);
                y -= Mm(style.heading_leading_mm);
            }
            StyledBlock::Row { depth, label, value } => {
                let x = Mm(style.margin_mm + style.indent_mm * *depth as f32);
                let text = if value.is_empty() {
                    label.clone()
                } else {
                    format!("{label}: {value}")
                };
                for line in wrap_text(&text, ROW_WRAP_CHARS) {
                    if y < bottom_y(style) {
                        (layer, y) = break_page(&doc, &footer, &font, style);
                    }
                    layer.use_text(line.as_str(), style.row_size, x, y, &font);
                    y -= Mm(style.row_leading_mm);
                }
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RenderError::Pdf(format!("buffer error: {e}")))
}

fn top_y(style: &Stylesheet) -> Mm {
    Mm(PAGE_HEIGHT_MM - style.margin_mm - 5.0)
}

fn bottom_y(style: &Stylesheet) -> Mm {
    Mm(style.margin_mm + 5.0)
}

fn break_page(
    doc: &PdfDocumentReference,
    footer: &str,
    font: &IndirectFontRef,
    style: &Stylesheet,
) -> (PdfLayerReference, Mm) {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    draw_footer(&layer, footer, font, style);
    (layer, top_y(style))
}

fn draw_footer(layer: &PdfLayerReference, footer: &str, font: &IndirectFontRef, style: &Stylesheet) {
    layer.use_text(
        footer,
        style.footer_size,
        Mm(style.margin_mm),
        Mm(style.margin_mm),
        font,
    );
}

/// Width-based word-wrap for row text. Interior spacing is preserved
/// verbatim — report values like `ABC   123` must survive into the
/// rendered artifact unchanged. Only the single space at a break point is
/// consumed; runs with no break point are hard-wrapped.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    loop {
        if rest.chars().count() <= max_chars {
            lines.push(rest.to_string());
            break;
        }
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        match rest[..cut].rfind(' ') {
            Some(brk) if brk > 0 => {
                lines.push(rest[..brk].to_string());
                rest = &rest[brk + 1..];
            }
            _ => {
                lines.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
        }
    }
    lines
}
