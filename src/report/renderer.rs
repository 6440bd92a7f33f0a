//! Paginated decisions report renderer.

use super::clock::{format_timestamp, Clock, SystemClock};
use super::layout::{layout_report, ReportLayout};
use crate::error::Result;
use crate::fonts::StandardFont;
use crate::writer::{PageBuilder, PdfWriter, PdfWriterConfig};

/// Title drawn at the top of page one.
pub const DEFAULT_TITLE: &str = "Meeting Decisions Report";

/// Attribution drawn in the footer of the last page.
pub const DEFAULT_FOOTER: &str = "Generated by AI Meeting Decisions Extractor";

/// A finished report.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    /// Complete PDF file
    pub bytes: Vec<u8>,
    /// Number of pages, as printed in the footer
    pub page_count: usize,
}

impl RenderedReport {
    /// Consume the report and return the PDF bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Renders extraction results as a paginated PDF.
///
/// The renderer only holds configuration. Every call builds its own writer
/// and cursor, so one renderer can be shared between threads as long as its
/// clock can.
///
/// ```ignore
/// use meeting_decisions::report::ReportRenderer;
///
/// let pdf = ReportRenderer::new().render("- Budget approved\n- Launch moved to May")?;
/// std::fs::write("Meeting-Decisions.pdf", pdf)?;
/// ```
#[derive(Debug, Clone)]
pub struct ReportRenderer<C = SystemClock> {
    layout: ReportLayout,
    title: String,
    footer: String,
    compress: bool,
    clock: C,
}

impl ReportRenderer<SystemClock> {
    /// Renderer with the standard layout, stamped with the local time.
    pub fn new() -> Self {
        Self {
            layout: ReportLayout::default(),
            title: DEFAULT_TITLE.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            compress: false,
            clock: SystemClock,
        }
    }
}

impl Default for ReportRenderer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ReportRenderer<C> {
    /// Use a different time source (e.g. a [`FixedClock`](super::FixedClock)).
    pub fn with_clock<D: Clock>(self, clock: D) -> ReportRenderer<D> {
        ReportRenderer {
            layout: self.layout,
            title: self.title,
            footer: self.footer,
            compress: self.compress,
            clock,
        }
    }

    /// Override the page geometry.
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Override the header title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the footer attribution.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Enable or disable Flate compression of page content.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Page geometry in use.
    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Render `text` and return the PDF bytes.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        Ok(self.render_report(text)?.into_bytes())
    }

    /// Render `text` and return the PDF bytes with the page count.
    pub fn render_report(&self, text: &str) -> Result<RenderedReport> {
        let generated_at = self.clock.now();
        let pages = layout_report(text, &self.layout);
        let page_count = pages.len();

        let config = PdfWriterConfig::default()
            .with_title(self.title.as_str())
            .with_creator(self.footer.as_str())
            .with_creation_date(generated_at)
            .with_compress(self.compress);
        let mut writer = PdfWriter::with_config(config);

        let layout = &self.layout;
        for (index, page_layout) in pages.iter().enumerate() {
            let mut page = writer.add_page(layout.page_width, layout.page_height);
            if index == 0 {
                self.draw_header(&mut page, &format_timestamp(&generated_at));
            }
            for line in &page_layout.lines {
                page.add_text(&line.text, line.x, line.y, line.font, layout.body_font_size);
            }
            if index + 1 == page_count {
                self.draw_footer(&mut page, page_count);
            }
            page.finish();
        }

        let bytes = writer.finish()?;
        log::info!(
            "Rendered decisions report: {} page(s), {} body line(s), {} bytes",
            page_count,
            pages.iter().map(|p| p.lines.len()).sum::<usize>(),
            bytes.len()
        );
        Ok(RenderedReport { bytes, page_count })
    }

    fn draw_header(&self, page: &mut PageBuilder<'_>, timestamp: &str) {
        let layout = &self.layout;
        let top = layout.page_height;
        page.add_text(
            &self.title,
            layout.margin,
            top - layout.title_offset,
            StandardFont::HelveticaBold,
            layout.title_font_size,
        );
        page.add_text(
            &format!("Generated on: {}", timestamp),
            layout.margin,
            top - layout.timestamp_offset,
            StandardFont::Helvetica,
            layout.timestamp_font_size,
        );
        page.draw_line(
            layout.margin,
            top - layout.rule_offset,
            layout.page_width - layout.margin,
            top - layout.rule_offset,
            layout.rule_width,
        );
    }

    fn draw_footer(&self, page: &mut PageBuilder<'_>, page_number: usize) {
        let layout = &self.layout;
        page.add_text(
            &self.footer,
            layout.margin,
            layout.footer_y,
            StandardFont::HelveticaOblique,
            layout.footer_font_size,
        );
        page.add_text_right(
            &format!("Page {}", page_number),
            layout.page_width - layout.margin,
            layout.footer_y,
            StandardFont::HelveticaOblique,
            layout.footer_font_size,
        );
    }
}
