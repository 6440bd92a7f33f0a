//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use crate::error::Result;
use crate::fonts::encoding::{encode_winansi, escape_literal_bytes};
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj), already encoded for the current font
    ShowText(Vec<u8>),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Stroke (S)
    Stroke,
}

/// Builder for PDF content streams.
///
/// Tracks the open text object and the current font so redundant `BT`
/// and `Tf` operators are not emitted. A fresh builder is used per page,
/// which means the font is always re-selected at the top of a new page.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource_name) || self.current_font_size != size {
            self.begin_text();
            self.op(ContentStreamOp::SetFont(resource_name.to_string(), size));
            self.current_font = Some(resource_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Add text with its baseline origin at (x, y).
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encode_winansi(text)));
        self
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Move to a point.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Stroke a straight line from (x1, y1) to (x2, y2).
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.end_text();
        self.move_to(x1, y1).line_to(x2, y2).stroke()
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        if self.in_text_object {
            write_op(&mut buf, &ContentStreamOp::EndText)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

/// Write a single operation to the buffer.
fn write_op(w: &mut Vec<u8>, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, size),
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write!(w, "{} {} {} {} {} {} Tm", a, b, c, d, e, f)
        },
        ContentStreamOp::ShowText(bytes) => {
            w.push(b'(');
            escape_literal_bytes(bytes, w);
            write!(w, ") Tj")
        },
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", width),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", x, y),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", x, y),
        ContentStreamOp::Stroke => write!(w, "S"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &ContentStreamBuilder) -> String {
        String::from_utf8_lossy(&builder.build().unwrap()).into_owned()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 11.0).text("Hello", 40.0, 682.0);

        let content = render(&builder);
        assert!(content.starts_with("BT\n/F1 11 Tf\n"));
        assert!(content.contains("1 0 0 1 40 682 Tm"));
        assert!(content.contains("(Hello) Tj"));
        assert!(content.trim_end().ends_with("ET"));
    }

    #[test]
    fn test_font_not_repeated() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_font("F1", 11.0)
            .text("a", 40.0, 700.0)
            .set_font("F1", 11.0)
            .text("b", 40.0, 684.0);

        let content = render(&builder);
        assert_eq!(content.matches("Tf").count(), 1);
        assert_eq!(content.matches("BT").count(), 1);
    }

    #[test]
    fn test_text_is_escaped_and_encoded() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 11.0).text("• Budget (Q3) approved", 40.0, 600.0);

        let content = render(&builder);
        assert!(content.contains("(\\225 Budget \\(Q3\\) approved) Tj"));
    }

    #[test]
    fn test_line_closes_text_object() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_font("F1", 10.0)
            .text("x", 0.0, 0.0)
            .set_line_width(1.0)
            .line(40.0, 712.0, 572.0, 712.0);

        let content = render(&builder);
        let et = content.find("ET").unwrap();
        let m = content.find("40 712 m").unwrap();
        assert!(et < m);
        assert!(content.contains("572 712 l\nS"));
        assert!(content.contains("1 w"));
    }

    #[test]
    fn test_fractional_coordinates() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F3", 8.0).text("Page 1", 546.648, 30.0);
        assert!(render(&builder).contains("1 0 0 1 546.648 30 Tm"));
    }
}
