//! SVG fragment builders.
//!
//! Every function returns a markup string; composition is plain string
//! concatenation. Attribute values pass through [`Attrs`], which escapes
//! them, so callers never hand-assemble attribute syntax.

use std::fmt::Display;
use std::fmt::Write;

/// Default edge length of one grid cell in pixels
pub const DEFAULT_CELL_PX: usize = 24;

/// Ordered attribute list for an SVG element
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one attribute; insertion order is preserved in the output
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.pairs {
            let _ = write!(out, " {key}=\"{}\"", escape(value));
        }
        out
    }
}

/// Escape text for use in attribute values and element content
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// An axis-aligned rectangle element
pub fn rect(x: usize, y: usize, width: usize, height: usize, attrs: &Attrs) -> String {
    format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\"{}/>",
        attrs.render()
    )
}

/// A straight line element
pub fn line(x1: usize, y1: usize, x2: usize, y2: usize, attrs: &Attrs) -> String {
    format!(
        "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\"{}/>",
        attrs.render()
    )
}

/// A text label anchored at (x, y)
pub fn text(x: usize, y: usize, content: &str, attrs: &Attrs) -> String {
    format!(
        "<text x=\"{x}\" y=\"{y}\"{}>{}</text>",
        attrs.render(),
        escape(content)
    )
}

/// Wrap a body of elements in a complete SVG document
pub fn document(width: usize, height: usize, body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">{body}</svg>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_markup() {
        let markup = rect(2, 3, 10, 5, &Attrs::new().with("fill", "#333"));
        assert_eq!(
            markup,
            "<rect x=\"2\" y=\"3\" width=\"10\" height=\"5\" fill=\"#333\"/>"
        );
    }

    #[test]
    fn test_attrs_preserve_order() {
        let markup = line(0, 0, 4, 4, &Attrs::new().with("stroke", "red").with("stroke-width", 2));
        assert!(markup.contains("stroke=\"red\" stroke-width=\"2\""));
    }

    #[test]
    fn test_text_escapes_content() {
        let markup = text(1, 1, "a<b&c", &Attrs::new());
        assert!(markup.contains(">a&lt;b&amp;c</text>"));
    }

    #[test]
    fn test_attr_values_escaped() {
        let markup = rect(0, 0, 1, 1, &Attrs::new().with("title", "\"x\""));
        assert!(markup.contains("title=\"&quot;x&quot;\""));
    }

    #[test]
    fn test_document_wraps_body() {
        let doc = document(100, 50, "<rect/>");
        assert!(doc.starts_with("<svg xmlns="));
        assert!(doc.contains("viewBox=\"0 0 100 50\""));
        assert!(doc.contains("<rect/>"));
        assert!(doc.ends_with("</svg>"));
    }
}
