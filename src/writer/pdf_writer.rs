//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use super::content_stream::ContentStreamBuilder;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::fonts::StandardFont;
use crate::object::{Dictionary, Object, ObjectRef};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::io::Write;

/// US Letter page size in points (8.5" x 11").
pub const LETTER: (f32, f32) = (612.0, 792.0);

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.4")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Producer recorded in the info dictionary
    pub producer: Option<String>,
    /// Creation date recorded in the info dictionary
    pub creation_date: Option<NaiveDateTime>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.4".to_string(),
            title: None,
            creator: None,
            producer: Some(concat!("meeting_decisions ", env!("CARGO_PKG_VERSION")).to_string()),
            creation_date: None,
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the creation date.
    pub fn with_creation_date(mut self, date: NaiveDateTime) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed with FlateDecode.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Format a date as a PDF date string (`D:YYYYMMDDHHmmSS`).
fn pdf_date(date: &NaiveDateTime) -> String {
    date.format("D:%Y%m%d%H%M%S").to_string()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Add text to the page with its baseline origin at (x, y).
    pub fn add_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: StandardFont,
        font_size: f32,
    ) -> &mut Self {
        let resource = self.writer.font_resource(font);
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder.set_font(&resource, font_size).text(text, x, y);
        self
    }

    /// Add text so that it ends at `right_x`.
    pub fn add_text_right(
        &mut self,
        text: &str,
        right_x: f32,
        y: f32,
        font: StandardFont,
        font_size: f32,
    ) -> &mut Self {
        let x = right_x - font.text_width(text, font_size);
        self.add_text(text, x, y, font, font_size)
    }

    /// Stroke a straight line on the page.
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> &mut Self {
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder
            .end_text()
            .set_line_width(width)
            .line(x1, y1, x2, y2);
        self
    }

    /// Finish building this page and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder.end_text();
        self.writer
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, fonts, and content.
/// Output is deterministic: objects are numbered and emitted in a fixed
/// order and dictionary keys are sorted.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Font resources in first-use order (base font -> resource name)
    fonts: IndexMap<StandardFont, String>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts: IndexMap::new(),
        }
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Resource name for a font, registering it on first use.
    fn font_resource(&mut self, font: StandardFont) -> String {
        let next = format!("F{}", self.fonts.len() + 1);
        self.fonts.entry(font).or_insert(next).clone()
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer;
        let mut output = Vec::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        // Object numbering: catalog, page tree, fonts, (page, content) pairs, info
        let catalog_id = 1u32;
        let pages_id = 2u32;
        let first_font_id = 3u32;
        let first_page_id = first_font_id + self.fonts.len() as u32;
        let info_id = first_page_id + 2 * self.pages.len() as u32;
        let size = info_id + 1;

        let mut objects: Vec<(u32, Object)> = Vec::with_capacity(size as usize);

        objects.push((
            catalog_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_id, 0)),
            ]),
        ));

        let page_refs: Vec<Object> = (0..self.pages.len() as u32)
            .map(|i| ObjectSerializer::reference(first_page_id + 2 * i, 0))
            .collect();
        objects.push((
            pages_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", Object::Array(page_refs)),
                ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
            ]),
        ));

        let mut font_resources = Dictionary::new();
        for (i, (font, resource)) in self.fonts.iter().enumerate() {
            let font_id = first_font_id + i as u32;
            objects.push((
                font_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(font.base_font())),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]),
            ));
            font_resources.insert(resource.clone(), Object::Reference(ObjectRef::new(font_id, 0)));
        }
        let resources = ObjectSerializer::dict(vec![("Font", Object::Dictionary(font_resources))]);

        for (i, page_data) in self.pages.iter().enumerate() {
            let page_id = first_page_id + 2 * i as u32;
            let content_id = page_id + 1;

            let raw_content = page_data.content_builder.build()?;
            let mut content_dict = Dictionary::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                compress_data(&raw_content)?
            } else {
                raw_content
            };
            content_dict.insert(
                "Length".to_string(),
                ObjectSerializer::integer(content_bytes.len() as i64),
            );

            objects.push((
                page_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(pages_id, 0)),
                    (
                        "MediaBox",
                        ObjectSerializer::rect(
                            0.0,
                            0.0,
                            page_data.width as f64,
                            page_data.height as f64,
                        ),
                    ),
                    ("Contents", ObjectSerializer::reference(content_id, 0)),
                    ("Resources", resources.clone()),
                ]),
            ));
            objects.push((
                content_id,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(content_bytes),
                },
            ));
        }

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::text_string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::text_string(creator)));
        }
        if let Some(producer) = &self.config.producer {
            info_entries.push(("Producer", ObjectSerializer::text_string(producer)));
        }
        if let Some(date) = &self.config.creation_date {
            info_entries.push(("CreationDate", ObjectSerializer::string(&pdf_date(date))));
        }
        objects.push((info_id, ObjectSerializer::dict(info_entries)));

        let mut xref_offsets = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            xref_offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(*id, 0, obj)?);
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(catalog_id, 0)),
            ("Info", ObjectSerializer::reference(info_id, 0)),
        ]);

        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer)?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Wrote PDF: {} page(s), {} font(s), {} bytes",
            self.pages.len(),
            self.fonts.len(),
            output.len()
        );
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_create_empty_pdf() {
        let mut writer = PdfWriter::new();
        writer.add_page(LETTER.0, LETTER.1).finish();
        let bytes = writer.finish().unwrap();

        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-1.4"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Type /Page "));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_pdf_with_text() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_page(LETTER.0, LETTER.1);
            page.add_text("Hello, World!", 72.0, 720.0, StandardFont::Helvetica, 12.0);
            page.finish();
        }

        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Type /Font"));
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("/Encoding /WinAnsiEncoding"));
        assert!(content.contains("/F1 12 Tf"));
        assert!(content.contains("(Hello, World!) Tj"));
    }

    #[test]
    fn test_font_resources_in_first_use_order() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_page(LETTER.0, LETTER.1);
            page.add_text("Title", 40.0, 742.0, StandardFont::HelveticaBold, 20.0);
            page.add_text("Body", 40.0, 700.0, StandardFont::Helvetica, 11.0);
            page.add_text("More", 40.0, 684.0, StandardFont::HelveticaBold, 20.0);
            page.finish();
        }
        let content = String::from_utf8_lossy(&writer.finish().unwrap()).into_owned();

        assert!(content.contains("3 0 obj\n<< /BaseFont /Helvetica-Bold"));
        assert!(content.contains("4 0 obj\n<< /BaseFont /Helvetica "));
        assert!(content.contains("/Font << /F1 3 0 R /F2 4 0 R >>"));
    }

    #[test]
    fn test_pdf_with_metadata() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        let config = PdfWriterConfig::default()
            .with_title("Meeting Decisions Report")
            .with_creator("Generated by AI Meeting Decisions Extractor")
            .with_creation_date(date);

        let mut writer = PdfWriter::with_config(config);
        writer.add_page(LETTER.0, LETTER.1).finish();

        let content = String::from_utf8_lossy(&writer.finish().unwrap()).into_owned();
        assert!(content.contains("/Title (Meeting Decisions Report)"));
        assert!(content.contains("/Creator (Generated by AI Meeting Decisions Extractor)"));
        assert!(content.contains("/CreationDate (D:20250305140709)"));
    }

    #[test]
    fn test_non_ascii_metadata_is_utf16() {
        let config = PdfWriterConfig::default().with_title("Décisions");
        let mut writer = PdfWriter::with_config(config);
        writer.add_page(LETTER.0, LETTER.1).finish();

        let content = String::from_utf8_lossy(&writer.finish().unwrap()).into_owned();
        assert!(content.contains("/Title <FEFF004400E90063006900730069006F006E0073>"));
    }

    #[test]
    fn test_multiple_pages_and_xref() {
        let mut writer = PdfWriter::new();
        writer.add_page(LETTER.0, LETTER.1).finish();
        writer.add_page(LETTER.0, LETTER.1).finish();

        let content = String::from_utf8_lossy(&writer.finish().unwrap()).into_owned();
        assert!(content.contains("/Count 2"));
        assert!(content.contains("[0 0 612 792]"));
        // free entry, catalog, pages, 2 x (page, content), info
        assert!(content.contains("xref\n0 8\n"));
        assert!(content.contains("/Size 8"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut writer = PdfWriter::new();
        writer
            .add_page(LETTER.0, LETTER.1)
            .add_text("x", 1.0, 1.0, StandardFont::Helvetica, 11.0);
        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let xref_at = content.find("xref\n").unwrap();
        let entries: Vec<usize> = content[xref_at..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(content[*offset..].starts_with(&expected));
        }
    }

    #[test]
    fn test_right_aligned_text() {
        let mut writer = PdfWriter::new();
        writer
            .add_page(LETTER.0, LETTER.1)
            .add_text_right("Page 1", 572.0, 30.0, StandardFont::HelveticaOblique, 8.0);
        let content = String::from_utf8_lossy(&writer.finish().unwrap()).into_owned();
        // 572 - width("Page 1" @ 8pt) = 572 - 25.352
        assert!(content.contains("1 0 0 1 546.64"));
    }

    #[test]
    fn test_compressed_content_stream() {
        let mut writer = PdfWriter::with_config(PdfWriterConfig::default().with_compress(true));
        writer
            .add_page(LETTER.0, LETTER.1)
            .add_text("Compressed", 40.0, 700.0, StandardFont::Helvetica, 11.0);
        let content = String::from_utf8_lossy(&writer.finish().unwrap()).into_owned();
        assert!(content.contains("/Filter /FlateDecode"));
        assert!(!content.contains("(Compressed) Tj"));
    }
}
