//! First render stage: event-parse the merged XML and flatten it into
//! styled blocks.
//!
//! Elements become depth-indented headings, their attributes and text
//! content become label/value rows. The synthetic `XMLRoot` wrapper is a
//! container only and produces no heading of its own.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{RenderError, StyledBlock, StyledDocument};

const DOCUMENT_TITLE: &str = "FTS Configuration Report";

/// Tracks whether an open element has produced any output yet, so the
/// lazy heading (or a bare row for an element with no content at all)
/// can be emitted exactly once.
struct Frame {
    name: String,
    rendered: bool,
}

/// Parse the merged document into its styled form. Malformed markup is a
/// render failure.
pub fn transform_document(xml: &str) -> Result<StyledDocument, RenderError> {
    let mut reader = Reader::from_str(xml);
    let mut blocks = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => open_element(&e, false, &mut stack, &mut blocks)?,
            Ok(Event::Empty(e)) => open_element(&e, true, &mut stack, &mut blocks)?,
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| RenderError::MalformedDocument(e.to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    emit_text(text, &mut stack, &mut blocks);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(frame) = stack.pop() {
                    // An element that closed without attributes, text, or
                    // children renders the same as its self-closing form.
                    if !frame.rendered {
                        blocks.push(StyledBlock::Row {
                            depth: stack.len().saturating_sub(1),
                            label: display_name(&frame.name),
                            value: String::new(),
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            // Declaration, comments, processing instructions: no layout.
            Ok(_) => {}
            Err(e) => return Err(RenderError::MalformedDocument(e.to_string())),
        }
    }

    Ok(StyledDocument {
        title: DOCUMENT_TITLE.to_string(),
        blocks,
    })
}

/// Handle a Start or Empty event. The root wrapper is skipped; an element
/// with attributes gets a heading plus one row per attribute, in document
/// order; an attribute-less empty element becomes a bare row.
fn open_element(
    e: &BytesStart,
    is_empty: bool,
    stack: &mut Vec<Frame>,
    blocks: &mut Vec<StyledBlock>,
) -> Result<(), RenderError> {
    ensure_parent_heading(stack, blocks);

    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let attrs = collect_attributes(e)?;
    let is_root = stack.is_empty();
    // Displayed depth: nesting below the root wrapper.
    let depth = stack.len().saturating_sub(1);

    if !is_root && !attrs.is_empty() {
        blocks.push(StyledBlock::Heading {
            depth,
            text: display_name(&name),
        });
        for (label, value) in attrs {
            blocks.push(StyledBlock::Row {
                depth: depth + 1,
                label,
                value,
            });
        }
        if !is_empty {
            stack.push(Frame {
                name,
                rendered: true,
            });
        }
    } else if !is_root && is_empty {
        blocks.push(StyledBlock::Row {
            depth,
            label: display_name(&name),
            value: String::new(),
        });
    } else if !is_empty {
        stack.push(Frame {
            name,
            rendered: is_root,
        });
    }
    Ok(())
}

/// Text content of the current element. A leaf without a heading renders
/// as a single `name: text` row; under a heading the row is indented one
/// level further.
fn emit_text(text: &str, stack: &mut [Frame], blocks: &mut Vec<StyledBlock>) {
    let elem_depth = stack.len().saturating_sub(2);
    let Some(frame) = stack.last_mut() else {
        return;
    };
    let depth = if frame.rendered {
        elem_depth + 1
    } else {
        elem_depth
    };
    let label = display_name(&frame.name);
    frame.rendered = true;
    blocks.push(StyledBlock::Row {
        depth,
        label,
        value: text.to_string(),
    });
}

/// A container element that only produced children still needs its
/// heading before the first child renders.
fn ensure_parent_heading(stack: &mut [Frame], blocks: &mut Vec<StyledBlock>) {
    let depth = stack.len().saturating_sub(2);
    if let Some(parent) = stack.last_mut() {
        if !parent.rendered {
            blocks.push(StyledBlock::Heading {
                depth,
                text: display_name(&parent.name),
            });
            parent.rendered = true;
        }
    }
}

fn collect_attributes(e: &BytesStart) -> Result<Vec<(String, String)>, RenderError> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| RenderError::MalformedDocument(e.to_string()))?;
        let label = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| RenderError::MalformedDocument(e.to_string()))?
            .into_owned();
        out.push((label, value));
    }
    Ok(out)
}

fn display_name(name: &str) -> String {
    if name == "VisitReport" {
        "Visit Report".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(depth: usize, text: &str) -> StyledBlock {
        StyledBlock::Heading {
            depth,
            text: text.into(),
        }
    }

    fn row(depth: usize, label: &str, value: &str) -> StyledBlock {
        StyledBlock::Row {
            depth,
            label: label.into(),
            value: value.into(),
        }
    }

    #[test]
    fn visit_report_attributes_become_rows() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?><XMLRoot><VisitReport Serial="ABC123" DeviceType="Receiver" ></VisitReport></XMLRoot>"#;
        let doc = transform_document(xml).unwrap();
        assert_eq!(
            doc.blocks,
            vec![
                heading(0, "Visit Report"),
                row(1, "Serial", "ABC123"),
                row(1, "DeviceType", "Receiver"),
            ]
        );
    }

    #[test]
    fn leaf_element_text_is_a_single_row() {
        let xml = "<XMLRoot><Station><Name>05BB001</Name></Station></XMLRoot>";
        let doc = transform_document(xml).unwrap();
        assert_eq!(
            doc.blocks,
            vec![heading(0, "Station"), row(1, "Name", "05BB001")]
        );
    }

    #[test]
    fn empty_element_without_attributes_is_a_bare_row() {
        let xml = "<XMLRoot><Body/></XMLRoot>";
        let doc = transform_document(xml).unwrap();
        assert_eq!(doc.blocks, vec![row(0, "Body", "")]);
    }

    #[test]
    fn start_end_pair_renders_like_self_closing_form() {
        let spelled_out = transform_document("<XMLRoot><Notes></Notes></XMLRoot>").unwrap();
        let self_closing = transform_document("<XMLRoot><Notes/></XMLRoot>").unwrap();
        assert_eq!(spelled_out.blocks, vec![row(0, "Notes", "")]);
        assert_eq!(spelled_out.blocks, self_closing.blocks);
    }

    #[test]
    fn contentless_nested_element_is_not_dropped() {
        let xml = "<XMLRoot><Station><Notes></Notes></Station></XMLRoot>";
        let doc = transform_document(xml).unwrap();
        assert_eq!(
            doc.blocks,
            vec![heading(0, "Station"), row(1, "Notes", "")]
        );
    }

    #[test]
    fn root_wrapper_produces_no_heading() {
        let xml = "<XMLRoot></XMLRoot>";
        let doc = transform_document(xml).unwrap();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn nesting_increases_depth() {
        let xml = "<XMLRoot><A><B attr=\"1\"></B></A></XMLRoot>";
        let doc = transform_document(xml).unwrap();
        assert_eq!(
            doc.blocks,
            vec![heading(0, "A"), heading(1, "B"), row(2, "attr", "1")]
        );
    }

    #[test]
    fn escaped_attribute_values_are_unescaped_for_display() {
        let xml = r#"<XMLRoot><VisitReport Standard="28&quot; gauge" ></VisitReport></XMLRoot>"#;
        let doc = transform_document(xml).unwrap();
        assert_eq!(
            doc.blocks,
            vec![heading(0, "Visit Report"), row(1, "Standard", "28\" gauge")]
        );
    }

    #[test]
    fn malformed_markup_is_a_render_failure() {
        let err = transform_document("<XMLRoot><A></B></XMLRoot>").unwrap_err();
        assert!(matches!(err, RenderError::MalformedDocument(_)));
    }

    #[test]
    fn title_is_fixed() {
        let doc = transform_document("<XMLRoot></XMLRoot>").unwrap();
        assert_eq!(doc.title, "FTS Configuration Report");
    }
}
