//! Glyph metrics for the standard fonts used in reports.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em for the WinAnsi
//! printable ASCII range. Helvetica-Oblique shares Helvetica's widths.

use super::encoding::encode_winansi;

/// Standard PDF fonts a report draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Helvetica (body text, timestamp)
    Helvetica,
    /// Helvetica-Bold (title)
    HelveticaBold,
    /// Helvetica-Oblique (footer)
    HelveticaOblique,
}

impl StandardFont {
    /// PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Advance width of a WinAnsi byte in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> u16 {
        let table = match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match byte {
            0x20..=0x7E => table[(byte - 0x20) as usize],
            0x85 | 0x89 | 0x97 => 1000, // ellipsis, per mille, em dash
            0x91 | 0x92 => 278,
            0x93 | 0x94 => 500,
            0x95 => 350,
            _ => 556,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = encode_winansi(text)
            .into_iter()
            .map(|b| self.byte_width(b) as u32)
            .sum();
        units as f32 * font_size / 1000.0
    }
}

/// Helvetica widths for 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold widths for 0x20..=0x7E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font_names() {
        assert_eq!(StandardFont::Helvetica.base_font(), "Helvetica");
        assert_eq!(StandardFont::HelveticaBold.base_font(), "Helvetica-Bold");
        assert_eq!(StandardFont::HelveticaOblique.base_font(), "Helvetica-Oblique");
    }

    #[test]
    fn test_helvetica_widths() {
        let f = StandardFont::Helvetica;
        assert_eq!(f.byte_width(b' '), 278);
        assert_eq!(f.byte_width(b'P'), 667);
        assert_eq!(f.byte_width(b'a'), 556);
        assert_eq!(f.byte_width(b'g'), 556);
        assert_eq!(f.byte_width(b'e'), 556);
        assert_eq!(f.byte_width(b'1'), 556);
    }

    #[test]
    fn test_text_width_page_label() {
        // "Page 1" = P(667) a(556) g(556) e(556) space(278) 1(556) = 3169
        let w = StandardFont::HelveticaOblique.text_width("Page 1", 8.0);
        assert!((w - 25.352).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = StandardFont::Helvetica.text_width("Meeting", 20.0);
        let bold = StandardFont::HelveticaBold.text_width("Meeting", 20.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_tables_cover_printable_ascii() {
        assert_eq!(HELVETICA_WIDTHS.len(), (0x7E - 0x20 + 1) as usize);
        assert_eq!(StandardFont::Helvetica.byte_width(b'~'), 584);
        assert_eq!(StandardFont::HelveticaBold.byte_width(b'~'), 584);
    }
}
