//! Page geometry and the pagination pass.
//!
//! Coordinates are PDF user-space points with the origin at the bottom-left
//! corner of the page, so the cursor moves *down* by decreasing `y`.

use super::wrap::wrap_line;
use crate::fonts::StandardFont;
use crate::writer::LETTER;

/// Geometry and typography of a decisions report.
///
/// The defaults describe a US Letter page and must not drift: changing any
/// of them changes where every line lands.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Left and right margin
    pub margin: f32,
    /// Lowest baseline allowed for body text
    pub bottom_threshold: f32,
    /// Vertical advance per body line
    pub line_height: f32,
    /// Maximum characters per wrapped body line
    pub wrap_chars: usize,
    /// Title baseline, measured down from the top edge
    pub title_offset: f32,
    /// Timestamp baseline, measured down from the top edge
    pub timestamp_offset: f32,
    /// Horizontal rule, measured down from the top edge
    pub rule_offset: f32,
    /// First body baseline on page one, measured down from the top edge
    pub body_top_offset: f32,
    /// First body baseline on continuation pages
    pub continuation_top_offset: f32,
    /// Footer baseline, measured up from the bottom edge
    pub footer_y: f32,
    /// Title font size
    pub title_font_size: f32,
    /// Timestamp font size
    pub timestamp_font_size: f32,
    /// Body font size
    pub body_font_size: f32,
    /// Footer font size
    pub footer_font_size: f32,
    /// Stroke width of the header rule
    pub rule_width: f32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_width: LETTER.0,
            page_height: LETTER.1,
            margin: 40.0,
            bottom_threshold: 50.0,
            line_height: 16.0,
            wrap_chars: 85,
            title_offset: 50.0,
            timestamp_offset: 70.0,
            rule_offset: 80.0,
            body_top_offset: 110.0,
            continuation_top_offset: 50.0,
            footer_y: 30.0,
            title_font_size: 20.0,
            timestamp_font_size: 10.0,
            body_font_size: 11.0,
            footer_font_size: 8.0,
            rule_width: 1.0,
        }
    }
}

impl ReportLayout {
    /// Width available between the margins.
    pub fn usable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline of the first body line on page one.
    pub fn first_body_y(&self) -> f32 {
        self.page_height - self.body_top_offset
    }

    /// Baseline of the first body line on continuation pages.
    pub fn continuation_y(&self) -> f32 {
        self.page_height - self.continuation_top_offset
    }
}

/// Render-pass state: where the next body line goes.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    /// Baseline of the next line
    pub y: f32,
    /// Zero-based index of the current page
    pub page_index: usize,
    /// Font body text is drawn with
    pub font: StandardFont,
}

impl PageCursor {
    /// Cursor at the top of the body area of page one.
    pub fn new(layout: &ReportLayout) -> Self {
        Self {
            y: layout.first_body_y(),
            page_index: 0,
            font: StandardFont::Helvetica,
        }
    }

    /// Blank input lines take half a line and never trigger a page break.
    pub fn skip_blank(&mut self, layout: &ReportLayout) {
        self.y -= layout.line_height / 2.0;
    }

    /// Whether the next line would fall below the bottom threshold.
    pub fn needs_break(&self, layout: &ReportLayout) -> bool {
        self.y < layout.bottom_threshold
    }

    /// Move to the top of a fresh page and reselect the body font.
    pub fn break_page(&mut self, layout: &ReportLayout) {
        self.page_index += 1;
        self.y = layout.continuation_y();
        self.font = StandardFont::Helvetica;
    }

    /// Advance past a placed line.
    pub fn advance(&mut self, layout: &ReportLayout) {
        self.y -= layout.line_height;
    }
}

/// One body line at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Text of the wrapped segment
    pub text: String,
    /// Left edge of the baseline
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Font the line is drawn with
    pub font: StandardFont,
}

/// Body lines assigned to one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Lines in drawing order
    pub lines: Vec<PlacedLine>,
}

/// Wrap and paginate `text`.
///
/// Always returns at least one page. Each `'\n'`-separated input line is
/// wrapped; every wrapped segment is checked against the bottom threshold
/// immediately before it is placed, so a run of blank lines can carry the
/// cursor below the threshold without breaking until the next segment.
pub fn layout_report(text: &str, layout: &ReportLayout) -> Vec<PageLayout> {
    let mut pages = vec![PageLayout::default()];
    let mut cursor = PageCursor::new(layout);

    for line in text.split('\n') {
        let segments = wrap_line(line, layout.wrap_chars);
        if segments.is_empty() {
            cursor.skip_blank(layout);
            continue;
        }

        for segment in segments {
            if cursor.needs_break(layout) {
                cursor.break_page(layout);
                pages.push(PageLayout::default());
                log::debug!("Page break before {:?}, now on page {}", segment, cursor.page_index + 1);
            }
            pages[cursor.page_index].lines.push(PlacedLine {
                text: segment,
                x: layout.margin,
                y: cursor.y,
                font: cursor.font,
            });
            cursor.advance(layout);
        }
    }

    pages
}
