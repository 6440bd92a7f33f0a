//! Greedy word wrapping by character count.
//!
//! Wrapping is font-metric-unaware: the limit applies to the number of
//! characters in the tentative line (words joined by single spaces), not
//! to its rendered width.

/// Whether `c` separates words.
///
/// Unicode White_Space plus the information separators U+001C..=U+001F.
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split one input line into rendered segments of at most `max_chars`
/// characters.
///
/// Words are packed greedily. When appending a word would push the
/// segment past `max_chars`, the segment is emitted and the word starts
/// the next one. A word that alone exceeds the limit is emitted as its
/// own segment. Returns an empty vector for blank lines.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in line.split(is_word_separator).filter(|w| !w.is_empty()) {
        let word_chars = word.chars().count();
        let tentative = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };

        if tentative <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_chars = tentative;
        } else if current.is_empty() {
            segments.push(word.to_string());
        } else {
            segments.push(std::mem::replace(&mut current, word.to_string()));
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
