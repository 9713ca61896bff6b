//! Domain types for representing parsed slide content.

use serde::{Deserialize, Serialize};

/// One slide as parsed from the English markdown: a title and its content lines.
///
/// Slides carry no identity beyond their position; slide order is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Slide heading. Empty when the source gave none.
    pub title: String,

    /// Trimmed, non-empty content lines in source order.
    pub content: Vec<String>,
}

impl SlideRecord {
    /// Create a new record with the given title and no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    /// Append a content line. Blank lines are ignored.
    pub fn add_line(&mut self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.content.push(trimmed.to_string());
        }
    }

    /// Whether the record has neither a title nor content.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Instructions for a single rendered slide, handed to a [`crate::DeckBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedSlide {
    /// Title-slide layout with a heading and a subtitle.
    Cover { title: String, subtitle: String },

    /// Title-and-content layout with a heading and newline-separated body text.
    Content { title: String, body: String },
}

impl RenderedSlide {
    /// The heading shown on the slide.
    pub fn title(&self) -> &str {
        match self {
            Self::Cover { title, .. } | Self::Content { title, .. } => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_trims_and_skips_blank() {
        let mut record = SlideRecord::new("Vision");
        record.add_line("  - Build bridges  ");
        record.add_line("   ");
        record.add_line("");

        assert_eq!(record.content, vec!["- Build bridges"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(SlideRecord::default().is_empty());
        assert!(!SlideRecord::new("Title").is_empty());
    }

    #[test]
    fn test_rendered_slide_title() {
        let cover = RenderedSlide::Cover {
            title: "CapitalEpoch".to_string(),
            subtitle: "Sub".to_string(),
        };
        assert_eq!(cover.title(), "CapitalEpoch");
    }
}
