//! The fixed style rules applied by the renderer. Bundled into the binary;
//! not user-suppliable.

use serde::Deserialize;

use super::RenderError;

const BUNDLED_STYLESHEET: &str = include_str!("../../../assets/stylesheet.json");

/// Font sizes in points, distances in millimetres.
#[derive(Debug, Clone, Deserialize)]
pub struct Stylesheet {
    pub title_size: f32,
    pub heading_size: f32,
    pub row_size: f32,
    pub footer_size: f32,
    pub margin_mm: f32,
    pub indent_mm: f32,
    pub heading_leading_mm: f32,
    pub row_leading_mm: f32,
}

impl Stylesheet {
    /// Parse the stylesheet resource shipped in the binary.
    pub fn bundled() -> Result<Self, RenderError> {
        serde_json::from_str(BUNDLED_STYLESHEET).map_err(|e| RenderError::Stylesheet(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_stylesheet_parses() {
        let style = Stylesheet::bundled().unwrap();
        assert_eq!(style.margin_mm, 5.0);
        assert!(style.heading_size > style.row_size);
    }
}
