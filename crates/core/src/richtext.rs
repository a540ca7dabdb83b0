//! Structured rich-text descriptions and their renderers.
//!
//! Product descriptions are an ordered sequence of block nodes, each a
//! heading or a paragraph of plain-text spans. The tree is closed on
//! purpose: the renderer only ever needs those two cases, and anything
//! else the editor might emit is silently skipped rather than rejected.

use serde::{Deserialize, Serialize};

/// A single inline text span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
}

impl Span {
    /// Create a span from any string-like value.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A block node in a rich-text document.
///
/// Unknown `type` tags deserialize to [`Block::Unknown`] and render to
/// nothing, matching the lenient behavior of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default)]
        children: Vec<Span>,
    },
    Paragraph {
        #[serde(default)]
        children: Vec<Span>,
    },
    #[serde(other)]
    Unknown,
}

const fn default_heading_level() -> u8 {
    2
}

/// An ordered rich-text document.
///
/// A malformed or absent document deserializes to the empty document; every
/// operation on it is total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<Block>);

impl RichText {
    /// The empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the document to flat HTML markup.
    ///
    /// Headings become `<h1>`..`<h6>` (level clamped), paragraphs become
    /// `<p>`, span text is HTML-escaped, and unknown nodes produce no
    /// output.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for block in &self.0 {
            match block {
                Block::Heading { level, children } => {
                    let level = (*level).clamp(1, 6);
                    html.push_str(&format!("<h{level}>"));
                    push_spans(&mut html, children);
                    html.push_str(&format!("</h{level}>"));
                }
                Block::Paragraph { children } => {
                    html.push_str("<p>");
                    push_spans(&mut html, children);
                    html.push_str("</p>");
                }
                Block::Unknown => {}
            }
        }
        html
    }

    /// Flatten the document to plain text, one line per block.
    ///
    /// This is the serialization the search matcher runs substring
    /// containment against.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.0 {
            match block {
                Block::Heading { children, .. } | Block::Paragraph { children } => {
                    let line: String = children.iter().map(|span| span.text.as_str()).collect();
                    if !line.is_empty() {
                        lines.push(line);
                    }
                }
                Block::Unknown => {}
            }
        }
        lines.join("\n")
    }
}

fn push_spans(html: &mut String, spans: &[Span]) {
    for span in spans {
        html.push_str(&escape(&span.text));
    }
}

/// Minimal HTML escaping for text content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> RichText {
        RichText(vec![
            Block::Heading {
                level: 2,
                children: vec![Span::new("Provenance")],
            },
            Block::Paragraph {
                children: vec![
                    Span::new("Acquired from a private collection in "),
                    Span::new("Bath."),
                ],
            },
        ])
    }

    #[test]
    fn renders_headings_and_paragraphs() {
        assert_eq!(
            document().to_html(),
            "<h2>Provenance</h2><p>Acquired from a private collection in Bath.</p>"
        );
    }

    #[test]
    fn escapes_text_content() {
        let doc = RichText(vec![Block::Paragraph {
            children: vec![Span::new("Oak & elm, c. 1790 <restored>")],
        }]);
        assert_eq!(
            doc.to_html(),
            "<p>Oak &amp; elm, c. 1790 &lt;restored&gt;</p>"
        );
    }

    #[test]
    fn clamps_heading_levels() {
        let doc = RichText(vec![Block::Heading {
            level: 9,
            children: vec![Span::new("Detail")],
        }]);
        assert_eq!(doc.to_html(), "<h6>Detail</h6>");
    }

    #[test]
    fn unknown_nodes_are_skipped() {
        let json = r#"[
            {"type": "paragraph", "children": [{"text": "Kept."}]},
            {"type": "blockquote", "children": [{"text": "Dropped."}]},
            {"type": "heading", "level": 3, "children": [{"text": "Also kept."}]}
        ]"#;
        let doc: RichText = serde_json::from_str(json).expect("deserialize");
        assert_eq!(doc.to_html(), "<p>Kept.</p><h3>Also kept.</h3>");
    }

    #[test]
    fn empty_document_renders_to_empty_string() {
        assert_eq!(RichText::new().to_html(), "");
        assert_eq!(RichText::new().plain_text(), "");
    }

    #[test]
    fn plain_text_joins_blocks_with_newlines() {
        assert_eq!(
            document().plain_text(),
            "Provenance\nAcquired from a private collection in Bath."
        );
    }
}
