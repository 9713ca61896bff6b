//! Recognizers for the narrow slide markdown dialect.

use regex::Regex;
use std::sync::LazyLock;

/// A line made only of three or more hyphens.
static SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$").unwrap());

/// `## Slide <N>: <title>`; the title may be empty.
static SLIDE_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## Slide (\d+):\s*(.*)$").unwrap());

/// Prefix shared by every slide header, valid or not.
pub const SLIDE_HEADER_PREFIX: &str = "## Slide";

/// A parsed `## Slide <N>: <title>` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideHeader<'a> {
    /// Slide number exactly as written.
    pub number: &'a str,
    /// Title text after the colon, trimmed.
    pub title: &'a str,
}

impl SlideHeader<'_> {
    /// The slide number as an integer, if it fits.
    pub fn number_value(&self) -> Option<u64> {
        self.number.parse().ok()
    }
}

/// Whether a trimmed line is a slide boundary marker.
pub fn is_separator(line: &str) -> bool {
    SEPARATOR_REGEX.is_match(line)
}

/// Parse a trimmed line as a slide header.
pub fn parse_slide_header(line: &str) -> Option<SlideHeader<'_>> {
    let caps = SLIDE_HEADER_REGEX.captures(line)?;
    Some(SlideHeader {
        number: caps.get(1)?.as_str(),
        title: caps.get(2).map_or("", |m| m.as_str().trim()),
    })
}

/// Format a slide header line. An empty title leaves no trailing space.
pub fn format_slide_header(number: &str, title: &str) -> String {
    if title.is_empty() {
        format!("{} {}:", SLIDE_HEADER_PREFIX, number)
    } else {
        format!("{} {}: {}", SLIDE_HEADER_PREFIX, number, title)
    }
}

/// Keep the part of a bilingual `English / 中文` text before the first slash.
pub fn before_slash(text: &str) -> &str {
    text.split('/').next().unwrap_or(text).trim()
}

/// Inner text of a trimmed `**bold**` line, if the whole line is bold.
pub fn bold_text(line: &str) -> Option<String> {
    if line.len() >= 2 && line.starts_with("**") && line.ends_with("**") {
        Some(strip_bold(line))
    } else {
        None
    }
}

/// Remove every `**` marker and trim.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// Whether a trimmed line is wrapped in single-asterisk italic markers.
pub fn is_italic(line: &str) -> bool {
    line.starts_with('*') && line.ends_with('*')
}

/// Whether a trimmed line starts a `<digits>.` numbered list item.
pub fn is_numbered(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_separator() {
        assert!(is_separator("---"));
        assert!(is_separator("------"));
        assert!(!is_separator("--"));
        assert!(!is_separator("--- x"));
        assert!(!is_separator(""));
    }

    #[test]
    fn test_parse_slide_header() {
        let header = parse_slide_header("## Slide 3: Vision / 愿景").unwrap();
        assert_eq!(header.number, "3");
        assert_eq!(header.title, "Vision / 愿景");
        assert_eq!(header.number_value(), Some(3));

        let empty = parse_slide_header("## Slide 7:").unwrap();
        assert_eq!(empty.title, "");

        assert!(parse_slide_header("## Slide X: Vision").is_none());
        assert!(parse_slide_header("## Slides overview").is_none());
        assert!(parse_slide_header("Slide 1: Vision").is_none());
    }

    #[test]
    fn test_format_slide_header_roundtrip() {
        let line = format_slide_header("2", "Market");
        assert_eq!(line, "## Slide 2: Market");
        assert_eq!(parse_slide_header(&line).unwrap().title, "Market");
        assert_eq!(format_slide_header("9", ""), "## Slide 9:");
    }

    #[test]
    fn test_before_slash() {
        assert_eq!(before_slash("Vision / 愿景"), "Vision");
        assert_eq!(before_slash("Vision"), "Vision");
        assert_eq!(before_slash("a/b/c"), "a");
    }

    #[test]
    fn test_bold_text() {
        assert_eq!(bold_text("**Our Mission**").as_deref(), Some("Our Mission"));
        assert_eq!(bold_text("**").as_deref(), Some(""));
        assert_eq!(bold_text("**Key** point"), None);
        assert_eq!(bold_text("Plain"), None);
    }

    #[test]
    fn test_strip_bold_is_idempotent() {
        let once = strip_bold("**Our Mission**");
        assert_eq!(strip_bold(&once), once);
        assert_eq!(bold_text(&once), None);
    }

    #[test]
    fn test_is_italic() {
        assert!(is_italic("*翻译*"));
        assert!(is_italic("*note*"));
        assert!(!is_italic("* item"));
    }

    #[test]
    fn test_is_numbered() {
        assert!(is_numbered("1. First"));
        assert!(is_numbered("12.Second"));
        assert!(!is_numbered("1) First"));
        assert!(!is_numbered(". First"));
        assert!(!is_numbered("Q1. Plan"));
    }
}
