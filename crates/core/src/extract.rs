//! English extraction from bilingual markdown slide decks.
//!
//! Slide boundaries, slide headers and blank lines keep the structure; every
//! other line is either dropped as Chinese or cleaned of inline translations.

use crate::classify::{contains_cjk, is_english};
use crate::markup::{self, SLIDE_HEADER_PREFIX};
use crate::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Parenthesized span holding at least one CJK ideograph.
static CJK_PAREN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*[\x{4E00}-\x{9FFF}][^)]*\)").unwrap());

/// Asterisk-delimited span at end of line holding at least one CJK ideograph.
static CJK_TRAILING_ITALIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*[^*]*[\x{4E00}-\x{9FFF}][^*]*\*$").unwrap());

/// Any single CJK ideograph.
static CJK_CHAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4E00}-\x{9FFF}]").unwrap());

/// Regex to collapse whitespace runs into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Standalone hyphens left dangling at the end of a line.
static TRAILING_HYPHEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s*-)+\s*$").unwrap());

/// Extracts the English-only variant of a bilingual slide deck.
#[derive(Debug, Clone, Default)]
pub struct EnglishExtractor;

impl EnglishExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract English content from markdown text.
    ///
    /// Output lines are joined with `\n` and carry no trailing newline.
    pub fn extract(&self, source: &str) -> String {
        let source = source.replace("\r\n", "\n").replace('\r', "\n");
        let mut english_lines: Vec<String> = Vec::new();
        let mut current_slide: Option<u64> = None;

        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();

            if markup::is_separator(line) {
                english_lines.push(line.to_string());
                continue;
            }

            if line.starts_with(SLIDE_HEADER_PREFIX) {
                match markup::parse_slide_header(line) {
                    Some(header) => {
                        let title = markup::before_slash(header.title);
                        let formatted = markup::format_slide_header(header.number, title);
                        english_lines.push(formatted);
                        current_slide = header.number_value();
                        log::debug!("Slide {} starts at line {}", header.number, index + 1);
                    }
                    None => {
                        log::warn!(
                            "Skipping malformed slide header at line {}: {}",
                            index + 1,
                            line
                        );
                    }
                }
                continue;
            }

            if line.is_empty() {
                english_lines.push(String::new());
                continue;
            }

            match self.clean_line(line) {
                Some(clean) => english_lines.push(clean),
                None => log::debug!(
                    "Dropped line {} (slide {:?}): {}",
                    index + 1,
                    current_slide,
                    line
                ),
            }
        }

        english_lines.join("\n")
    }

    /// Clean one trimmed content line, or `None` when nothing English remains.
    pub fn clean_line(&self, line: &str) -> Option<String> {
        if !is_english(line) {
            return None;
        }

        let mut clean = if line.contains('/') && !line.starts_with("http") {
            markup::before_slash(line).to_string()
        } else {
            line.to_string()
        };

        if contains_cjk(&clean) {
            clean = CJK_PAREN_REGEX.replace_all(&clean, "").trim().to_string();
            clean = CJK_TRAILING_ITALIC_REGEX.replace(&clean, "").trim().to_string();
            clean = CJK_CHAR_REGEX.replace_all(&clean, "").trim().to_string();
        }
        clean = WHITESPACE_COLLAPSE_REGEX.replace_all(&clean, " ").to_string();
        clean = TRAILING_HYPHEN_REGEX.replace(&clean, "").to_string();

        // A line reduced to digits or symbols would be dropped on a second pass.
        if clean.is_empty() || !is_english(&clean) {
            return None;
        }

        // Content must not turn into a boundary or header once cleaned.
        if clean.starts_with(SLIDE_HEADER_PREFIX) || markup::is_separator(&clean) {
            log::debug!("Dropped content line that cleans to structure: {}", clean);
            return None;
        }

        Some(clean)
    }

    /// Read `input`, extract its English content, and write it to `output`.
    ///
    /// Returns the number of lines written.
    pub fn extract_file(&self, input: &Path, output: &Path) -> Result<usize> {
        let source = read_source(input)?;
        let english = self.extract(&source);
        std::fs::write(output, &english)?;

        let line_count = english.lines().count();
        log::info!(
            "Wrote {} lines of English markdown to {}",
            line_count,
            output.display()
        );
        Ok(line_count)
    }
}

/// Read a whole markdown source, mapping an absent path to [`Error::MissingInputFile`].
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingInputFile(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str =
        "---\n\n## Slide 1: Vision / 愿景\n\n**Our Mission**\n- Build bridges 建桥\n- 只有中文\n";

    fn extract(source: &str) -> String {
        EnglishExtractor::new().extract(source)
    }

    #[test]
    fn test_scenario() {
        let output = extract(SCENARIO);
        assert_eq!(
            output,
            "---\n\n## Slide 1: Vision\n\n**Our Mission**\n- Build bridges"
        );
    }

    #[test]
    fn test_separator_passthrough() {
        assert_eq!(extract("---\n-----"), "---\n-----");
    }

    #[test]
    fn test_hyphen_prefixed_text_is_not_separator() {
        assert_eq!(extract("--- 中文"), "");
    }

    #[test]
    fn test_header_without_slash_kept() {
        assert_eq!(extract("## Slide 4: Roadmap"), "## Slide 4: Roadmap");
        assert_eq!(extract("## Slide 5: 路线图"), "## Slide 5: 路线图");
    }

    #[test]
    fn test_header_numbers_passed_through() {
        let output = extract("## Slide 3: B\n## Slide 1: A\n## Slide 1: C");
        assert_eq!(output, "## Slide 3: B\n## Slide 1: A\n## Slide 1: C");
    }

    #[test]
    fn test_malformed_header_skipped() {
        assert_eq!(extract("## Slide X: Vision\nHello"), "Hello");
        assert_eq!(extract("## Slides overview"), "");
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(extract("Hello\n   \n\nWorld"), "Hello\n\n\nWorld");
    }

    #[test]
    fn test_slash_translation_removed() {
        assert_eq!(extract("Trading Pairs / 交易对"), "Trading Pairs");
    }

    #[test]
    fn test_url_keeps_slashes() {
        assert_eq!(
            extract("https://example.com/docs 文档"),
            "https://example.com/docs"
        );
    }

    #[test]
    fn test_parenthesized_translation_removed() {
        assert_eq!(
            extract("Liquidity pools (流动性池) earn fees"),
            "Liquidity pools earn fees"
        );
        assert_eq!(extract("Fees (0.3%) apply"), "Fees (0.3%) apply");
    }

    #[test]
    fn test_trailing_italic_translation_removed() {
        assert_eq!(extract("Own your shop *拥有你的商店*"), "Own your shop");
        assert_eq!(extract("Own your *shop*"), "Own your *shop*");
    }

    #[test]
    fn test_remaining_cjk_removed() {
        assert_eq!(extract("Play 游戏 and earn"), "Play and earn");
    }

    #[test]
    fn test_trailing_hyphen_trimmed() {
        assert_eq!(extract("Commercial Street - 商业街"), "Commercial Street");
        assert_eq!(extract("Done - -"), "Done");
    }

    #[test]
    fn test_chinese_lines_dropped() {
        assert_eq!(extract("只有中文\n你好 Hi"), "");
    }

    #[test]
    fn test_residue_only_line_dropped() {
        assert_eq!(extract("/ Vision"), "");
        assert_eq!(extract("2024 (年 abc)"), "");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(extract("---\r\n\r\nHello\r\n"), "---\n\nHello");
    }

    #[test]
    fn test_boundary_count_preserved() {
        let source = "# Deck\n---\n\n## Slide 1: A / 甲\n中文\n---\n\n## Slide 2: B\n---\n";
        let output = extract(source);
        let count = |text: &str| {
            text.lines()
                .filter(|l| markup::is_separator(l.trim()))
                .count()
        };
        assert_eq!(count(source), 3);
        assert_eq!(count(&output), 3);
    }

    #[test]
    fn test_idempotent() {
        let source = "# CapitalEpoch 资本纪元\n---\n\n## Slide 1: Vision / 愿景\n\n\
                      **Our Mission** / **我们的使命**\n\
                      🚀 Launch in Q2 (第二季度)\n\
                      1. Trade tokens 交易代币\n\
                      *我们的愿景*\n\
                      Visit https://example.com/app\n\
                      https://example.com/a/b\n\
                      Street - 街 -\n\
                      中## Slide overview text\n\
                      中--- 中\n";
        let once = extract(source);
        let twice = extract(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_content_cleaned_into_header_dropped() {
        assert_eq!(extract("中## Slide overview text"), "");
        assert_eq!(extract("中## Slide 2: Next"), "");
        assert_eq!(extract("Intro\n中## Slide overview text\nOutro"), "Intro\nOutro");
    }

    #[test]
    fn test_clean_line_without_cjk() {
        let extractor = EnglishExtractor::new();
        assert_eq!(
            extractor.clean_line("Plain   text -").as_deref(),
            Some("Plain text")
        );
    }

    #[test]
    fn test_extract_file_missing_input() {
        let input = std::env::temp_dir().join("deck-core-missing-presentation.md");
        let output = std::env::temp_dir().join("deck-core-missing-presentation-out.md");
        let err = EnglishExtractor::new()
            .extract_file(&input, &output)
            .unwrap_err();
        assert!(matches!(err, Error::MissingInputFile(_)));
    }

    #[test]
    fn test_extract_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("deck-core-extract-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("PRESENTATION.md");
        let output = dir.join("PRESENTATION_ENGLISH.md");
        std::fs::write(&input, SCENARIO).unwrap();

        let lines = EnglishExtractor::new().extract_file(&input, &output).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();

        assert_eq!(lines, 6);
        assert!(written.contains("## Slide 1: Vision"));
        assert!(!written.contains("只有中文"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
