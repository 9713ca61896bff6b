//! Slide segmentation of English-only markdown into [`SlideRecord`]s.

use crate::classify::is_english;
use crate::extract::read_source;
use crate::markup;
use crate::{Result, SlideRecord};
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

/// A separator line followed, after optional blank lines, by a slide header.
static SLIDE_BOUNDARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^-{3,}[ \t]*\n(?:[ \t]*\n)*## Slide (\d+):([^\n]*)").unwrap()
});

/// Parser turning English markdown into slide records.
#[derive(Debug, Clone, Default)]
pub struct SlideParser;

impl SlideParser {
    /// Create a new slide parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse markdown text into slide records, in document order.
    ///
    /// Text before the first boundary is preamble and is discarded.
    pub fn parse(&self, text: &str) -> Vec<SlideRecord> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let boundaries: Vec<(Range<usize>, &str)> = SLIDE_BOUNDARY_REGEX
            .captures_iter(&text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let title = caps.get(2).map_or("", |m| m.as_str().trim());
                Some((whole.range(), title))
            })
            .collect();

        let records: Vec<SlideRecord> = boundaries
            .iter()
            .enumerate()
            .map(|(idx, (span, header_title))| {
                let end = boundaries
                    .get(idx + 1)
                    .map_or(text.len(), |(next, _)| next.start);
                self.parse_segment(header_title, &text[span.end..end])
            })
            .collect();

        if records.is_empty() {
            log::warn!("No slides found in document");
        }

        records
    }

    /// Build one record from the text between two boundaries.
    ///
    /// A whole-line `**bold**` title overrides the header title; the last one wins.
    /// Without a bold line the `## Slide N:` header title is kept as a fallback,
    /// where a bare split on the header would leave the title empty.
    fn parse_segment(&self, header_title: &str, segment: &str) -> SlideRecord {
        let mut record = SlideRecord::new(header_title);

        for line in segment.lines().map(str::trim) {
            if let Some(title) = markup::bold_text(line) {
                record.title = title;
            } else if line.is_empty() {
                continue;
            } else if is_english(line) {
                record.add_line(line);
            } else {
                log::debug!("Dropped non-English content line: {}", line);
            }
        }

        record
    }

    /// Read and parse a markdown file.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<SlideRecord>> {
        let text = read_source(path)?;
        let records = self.parse(&text);
        log::info!("Parsed {} slides from {}", records.len(), path.display());
        Ok(records)
    }
}
