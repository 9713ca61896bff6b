//! Character-ratio heuristic deciding whether a line is primarily English.
//!
//! This is not a language detector. Short acronym-only lines next to Chinese
//! text are misclassified, and that is accepted.

/// First code point of the CJK Unified Ideographs block.
pub const CJK_START: char = '\u{4E00}';

/// Last code point of the CJK Unified Ideographs block.
pub const CJK_END: char = '\u{9FFF}';

/// Whether `c` falls in the CJK Unified Ideographs block.
pub fn is_cjk(c: char) -> bool {
    (CJK_START..=CJK_END).contains(&c)
}

/// Whether `text` contains at least one CJK ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Whether a line of text is primarily English.
///
/// Symbols, punctuation, and emoji are stripped first. The line is English when
/// it has more ASCII letters than CJK ideographs and at least one ASCII letter.
/// Equal counts are not English.
pub fn is_english(text: &str) -> bool {
    let (english, chinese) = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .fold((0usize, 0usize), |(en, zh), c| {
            if c.is_ascii_alphabetic() {
                (en + 1, zh)
            } else if is_cjk(c) {
                (en, zh + 1)
            } else {
                (en, zh)
            }
        });

    english > chinese && english > 0
}
