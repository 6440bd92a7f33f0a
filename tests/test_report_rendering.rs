//! Integration tests for decisions report rendering.

use chrono::{NaiveDate, NaiveDateTime};
use flate2::read::ZlibDecoder;
use meeting_decisions::report::{
    layout_report, wrap_line, FixedClock, ReportLayout, ReportRenderer,
};
use proptest::prelude::*;
use regex::bytes::Regex;
use std::io::Read;

fn moment() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .unwrap()
        .and_hms_opt(14, 7, 0)
        .unwrap()
}

fn renderer() -> ReportRenderer<FixedClock> {
    ReportRenderer::new().with_clock(FixedClock(moment()))
}

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Raw bytes of every stream in the file, in object order.
fn streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    let re = Regex::new(r"(?s-u)\nstream\n(.*?)\nendstream").unwrap();
    re.captures_iter(pdf).map(|c| c[1].to_vec()).collect()
}

fn lines(n: usize) -> String {
    (1..=n).map(|i| format!("- decision {}", i)).collect::<Vec<_>>().join("\n")
}

#[test]
fn test_output_is_reproducible_with_fixed_clock() {
    let text = "- Approve the Q3 budget\n\n- Move launch to May\n- Hire two engineers";
    let first = renderer().render(text).unwrap();
    let second = renderer().render(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_text_renders_header_and_footer_only() {
    let report = renderer().render_report("").unwrap();
    assert_eq!(report.page_count, 1);

    let pdf = as_text(&report.bytes);
    assert!(pdf.starts_with("%PDF-1.4"));
    assert!(pdf.contains("/Count 1"));
    assert!(pdf.contains("(Meeting Decisions Report) Tj"));
    assert!(pdf.contains("(Generated on: March 05, 2025 at 02:07 PM) Tj"));
    assert!(pdf.contains("40 712 m\n572 712 l\nS"));
    assert!(pdf.contains("(Generated by AI Meeting Decisions Extractor) Tj"));
    assert!(pdf.contains("(Page 1) Tj"));
    // no body text was selected or drawn
    assert!(!pdf.contains(" 11 Tf"));
    assert!(!pdf.contains(" 682 Tm"));
}

#[test]
fn test_whitespace_only_text_has_no_body() {
    let report = renderer().render_report("   \n\t\n\n").unwrap();
    assert_eq!(report.page_count, 1);
    assert!(!as_text(&report.bytes).contains(" 11 Tf"));
}

#[test]
fn test_overlong_word_is_drawn_alone() {
    let word = "w".repeat(200);
    let text = format!("short {} tail", word);

    let pages = layout_report(&text, &ReportLayout::default());
    let drawn: Vec<&str> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(drawn, vec!["short", word.as_str(), "tail"]);

    let pdf = as_text(&renderer().render(&text).unwrap());
    assert!(pdf.contains(&format!("1 0 0 1 40 666 Tm\n({}) Tj", word)));
}

#[test]
fn test_forty_one_lines_make_two_pages() {
    let report = renderer().render_report(&lines(41)).unwrap();
    assert_eq!(report.page_count, 2);

    let pdf = as_text(&report.bytes);
    assert!(pdf.contains("/Count 2"));
    assert!(pdf.contains("(Page 2) Tj"));
    assert!(!pdf.contains("(Page 1) Tj"));
    // the header is drawn once, the continuation page starts at the top offset
    assert_eq!(pdf.matches("(Meeting Decisions Report) Tj").count(), 1);
    assert!(pdf.contains("1 0 0 1 40 742 Tm\n(- decision 41) Tj"));
}

#[test]
fn test_forty_lines_fit_on_one_page() {
    let report = renderer().render_report(&lines(40)).unwrap();
    assert_eq!(report.page_count, 1);
    assert!(as_text(&report.bytes).contains("1 0 0 1 40 58 Tm\n(- decision 40) Tj"));
}

#[test]
fn test_continuation_page_reselects_body_font() {
    let pdf = renderer().render(&lines(41)).unwrap();
    let pages = streams(&pdf);
    assert_eq!(pages.len(), 2);
    let second = as_text(&pages[1]);
    assert!(second.starts_with("BT\n/F"));
    assert!(second.contains(" 11 Tf\n1 0 0 1 40 742 Tm"));
}

#[test]
fn test_blank_lines_lower_next_line_by_half_line_height() {
    let layout = ReportLayout::default();
    for blanks in 0..5usize {
        let text = format!("first{}second", "\n".repeat(blanks + 1));
        let pages = layout_report(&text, &layout);
        let body = &pages[0].lines;
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].y - body[1].y, 16.0 + 8.0 * blanks as f32);
    }
}

#[test]
fn test_blank_lines_never_break_pages_by_themselves() {
    let text = format!("{}\n{}", lines(39), "\n".repeat(20));
    let report = renderer().render_report(&text).unwrap();
    assert_eq!(report.page_count, 1);
}

#[test]
fn test_blank_run_below_threshold_breaks_before_next_segment() {
    // 39 lines leave the cursor at 58; two blanks move it to 42
    let text = format!("{}\n\n\nlast", lines(39));
    let pages = layout_report(&text, &ReportLayout::default());
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].lines[0].text, "last");
    assert_eq!(pages[1].lines[0].y, 742.0);
}

#[test]
fn test_wrap_breaks_before_word_that_exceeds_limit() {
    // five 16-char words joined make 84 characters; the sixth word overflows
    let words: Vec<String> = (0..8).map(|i| format!("{:0>16}", i)).collect();
    let line = words.join(" ");
    let segments = wrap_line(&line, 85);
    assert_eq!(segments[0], words[..5].join(" "));
    assert_eq!(segments[1], words[5..].join(" "));
}

#[test]
fn test_bullets_and_dashes_are_winansi_encoded() {
    let pdf = renderer().render("\u{2022} Budget \u{2013} approved").unwrap();
    // bullet 0x95 and en dash 0x96 as octal escapes
    assert!(as_text(&pdf).contains(r"(\225 Budget \226 approved) Tj"));
}

#[test]
fn test_unencodable_characters_are_replaced() {
    let pdf = renderer().render("会议 approved").unwrap();
    assert!(as_text(&pdf).contains("(?? approved) Tj"));
}

#[test]
fn test_parentheses_are_escaped() {
    let pdf = renderer().render("Approved (unanimously)").unwrap();
    assert!(as_text(&pdf).contains(r"(Approved \(unanimously\)) Tj"));
}

#[test]
fn test_compressed_streams_inflate_to_page_content() {
    let text = lines(45);
    let plain = renderer().render(&text).unwrap();
    let compressed = renderer().with_compress(true).render(&text).unwrap();
    assert!(as_text(&compressed).contains("/Filter /FlateDecode"));

    let expected = streams(&plain);
    let inflated: Vec<Vec<u8>> = streams(&compressed)
        .iter()
        .map(|data| {
            let mut out = Vec::new();
            ZlibDecoder::new(&data[..]).read_to_end(&mut out).unwrap();
            out
        })
        .collect();
    assert_eq!(inflated, expected);
}

#[test]
fn test_xref_offsets_match_objects() {
    let pdf = renderer().render(&lines(50)).unwrap();
    let text = as_text(&pdf);

    let startxref = Regex::new(r"startxref\n(\d+)\n%%EOF$").unwrap();
    let caps = startxref.captures(&pdf).unwrap();
    let xref_at: usize = as_text(&caps[1]).parse().unwrap();
    assert!(text[xref_at..].starts_with("xref\n0 "));

    let entry = Regex::new(r"(?m)^(\d{10}) 00000 n $").unwrap();
    for (i, caps) in entry.captures_iter(&pdf).enumerate() {
        let offset: usize = as_text(&caps[1]).parse().unwrap();
        assert!(text[offset..].starts_with(&format!("{} 0 obj", i + 1)));
    }
}

proptest! {
    #[test]
    fn prop_wrap_preserves_words_and_limit(words in prop::collection::vec("[a-z]{1,30}", 0..60)) {
        let line = words.join(" ");
        let segments = wrap_line(&line, 85);

        let rejoined: Vec<&str> = segments.iter().flat_map(|s| s.split(' ')).collect();
        prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());

        for segment in &segments {
            prop_assert!(segment.chars().count() <= 85 || !segment.contains(' '));
        }
        // greedy: the next segment's first word would not have fit
        for pair in segments.windows(2) {
            let next_word = pair[1].split(' ').next().unwrap_or("");
            prop_assert!(pair[0].chars().count() + 1 + next_word.chars().count() > 85);
        }
    }

    #[test]
    fn prop_page_count_follows_capacity(n in 1usize..200) {
        let pages = layout_report(&lines(n), &ReportLayout::default());
        let expected = if n <= 40 { 1 } else { 1 + (n - 40 + 43) / 44 };
        prop_assert_eq!(pages.len(), expected);
        prop_assert_eq!(pages.iter().map(|p| p.lines.len()).sum::<usize>(), n);
    }
}
