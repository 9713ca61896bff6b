//! Deck rendering: turns slide records into cover and content slides and
//! hands them to a document backend.

use crate::classify::is_english;
use crate::markup;
use crate::{DeckConfig, RenderedSlide, Result, SlideRecord};
use std::path::Path;

/// Pictographic glyphs recognized as bullet markers at the start of a line.
pub const BULLET_GLYPHS: &[&str] = &[
    "❌", "✅", "🎮", "💰", "🤝", "🏆", "⚡", "📝", "⚛️", "🔗", "🤖", "🏪", "📊", "💱", "🎯",
    "📈", "🌐", "🌍", "🌏", "🔄", "🚀", "🌟", "👨‍💼", "🏗️", "📄", "📧", "🐦", "💬",
];

/// Bullet prefix for lines that started with a glyph.
pub const BULLET_PREFIX: &str = "• ";

/// Indent for numbered list items.
pub const NUMBERED_INDENT: &str = "  ";

/// The document-generation collaborator that actually builds a deck file.
pub trait DeckBackend {
    /// Set the typeface and point size applied to every body paragraph.
    fn set_body_font(&mut self, font: &str, size_pt: u32);

    /// Append a title-slide layout slide.
    fn add_cover_slide(&mut self, title: &str, subtitle: &str) -> Result<()>;

    /// Append a title-and-content layout slide; `body` is newline-separated.
    fn add_content_slide(&mut self, title: &str, body: &str) -> Result<()>;

    /// Write the deck to `path`, replacing any existing file.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// How a content line is rewritten for the slide body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Bullet,
    Bold,
    Numbered,
    Italic,
    Plain,
}

impl LineKind {
    fn of(line: &str) -> Self {
        if bullet_glyph(line).is_some() {
            Self::Bullet
        } else if line.starts_with("**") && line.ends_with("**") {
            Self::Bold
        } else if markup::is_numbered(line) {
            Self::Numbered
        } else if markup::is_italic(line) {
            Self::Italic
        } else {
            Self::Plain
        }
    }
}

/// The allowlisted glyph a line starts with, if any.
pub fn bullet_glyph(line: &str) -> Option<&'static str> {
    BULLET_GLYPHS.iter().copied().find(|g| line.starts_with(g))
}

/// Remove every allowlisted glyph from `line` and trim.
pub fn strip_bullet_glyphs(line: &str) -> String {
    BULLET_GLYPHS
        .iter()
        .fold(line.to_string(), |acc, glyph| acc.replace(glyph, ""))
        .trim()
        .to_string()
}

/// Builds slides from records and drives a [`DeckBackend`].
#[derive(Debug, Clone, Default)]
pub struct DeckRenderer {
    config: DeckConfig,
}

impl DeckRenderer {
    /// Create a renderer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with an explicit configuration.
    pub fn with_config(config: DeckConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Rewrite one content line for the body, or `None` to drop it.
    pub fn render_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || markup::parse_slide_header(line).is_some() || !is_english(line) {
            return None;
        }

        let rendered = match LineKind::of(line) {
            LineKind::Bullet => {
                let clean = strip_bullet_glyphs(line);
                is_english(&clean).then(|| format!("{}{}", BULLET_PREFIX, clean))
            }
            LineKind::Bold => {
                let clean = markup::strip_bold(line);
                is_english(&clean).then_some(clean)
            }
            LineKind::Numbered => Some(format!("{}{}", NUMBERED_INDENT, line)),
            LineKind::Italic => None,
            LineKind::Plain => Some(line.to_string()),
        };

        if rendered.is_none() {
            log::debug!("Dropped body line: {}", line);
        }
        rendered
    }

    /// Join the rendered lines of a record's content into body text.
    pub fn body_text(&self, content: &[String]) -> String {
        content
            .iter()
            .filter_map(|line| self.render_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the slide sequence. The first record always becomes the cover.
    pub fn build_slides(&self, records: &[SlideRecord]) -> Vec<RenderedSlide> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                if idx == 0 {
                    RenderedSlide::Cover {
                        title: self.config.cover_title.clone(),
                        subtitle: self.config.cover_subtitle.clone(),
                    }
                } else {
                    RenderedSlide::Content {
                        title: record.title.clone(),
                        body: self.body_text(&record.content),
                    }
                }
            })
            .collect()
    }

    /// Render `records` through `backend` and save to `output`.
    ///
    /// Returns the number of slides written.
    pub fn render<B: DeckBackend>(
        &self,
        records: &[SlideRecord],
        backend: &mut B,
        output: &Path,
    ) -> Result<usize> {
        if records.is_empty() {
            log::warn!("Rendering a deck with no slides");
        }

        backend.set_body_font(&self.config.body_font, self.config.body_font_size);

        let slides = self.build_slides(records);
        for slide in &slides {
            match slide {
                RenderedSlide::Cover { title, subtitle } => {
                    backend.add_cover_slide(title, subtitle)?
                }
                RenderedSlide::Content { title, body } => backend.add_content_slide(title, body)?,
            }
        }

        backend.save(output)?;
        log::info!("Saved {} slides to {}", slides.len(), output.display());

        Ok(slides.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingBackend {
        font: Option<(String, u32)>,
        slides: Vec<RenderedSlide>,
        saved_to: Option<PathBuf>,
    }

    impl DeckBackend for RecordingBackend {
        fn set_body_font(&mut self, font: &str, size_pt: u32) {
            self.font = Some((font.to_string(), size_pt));
        }

        fn add_cover_slide(&mut self, title: &str, subtitle: &str) -> Result<()> {
            self.slides.push(RenderedSlide::Cover {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
            });
            Ok(())
        }

        fn add_content_slide(&mut self, title: &str, body: &str) -> Result<()> {
            self.slides.push(RenderedSlide::Content {
                title: title.to_string(),
                body: body.to_string(),
            });
            Ok(())
        }

        fn save(&mut self, path: &Path) -> Result<()> {
            self.saved_to = Some(path.to_path_buf());
            Ok(())
        }
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_body_text_example() {
        let renderer = DeckRenderer::new();
        let body = renderer.body_text(&lines(&["🚀 Launch in Q2", "*翻译*", "**Key Point**"]));
        assert_eq!(body, "• Launch in Q2\nKey Point");
    }

    #[test]
    fn test_glyph_only_line_dropped() {
        let renderer = DeckRenderer::new();
        assert_eq!(renderer.render_line("✅"), None);
        assert_eq!(renderer.render_line("✅ 完成"), None);
    }

    #[test]
    fn test_all_glyphs_stripped() {
        assert_eq!(strip_bullet_glyphs("✅ Done 🚀"), "Done");
        assert_eq!(bullet_glyph("👨‍💼 Team"), Some("👨‍💼"));
        assert_eq!(bullet_glyph("Team 🚀"), None);
    }

    #[test]
    fn test_numbered_line_indented() {
        let renderer = DeckRenderer::new();
        assert_eq!(
            renderer.render_line("1. Connect wallet").as_deref(),
            Some("  1. Connect wallet")
        );
    }

    #[test]
    fn test_italic_english_dropped() {
        let renderer = DeckRenderer::new();
        assert_eq!(renderer.render_line("*Powered by Aptos*"), None);
    }

    #[test]
    fn test_plain_line_kept_verbatim() {
        let renderer = DeckRenderer::new();
        assert_eq!(
            renderer.render_line("- Low fees").as_deref(),
            Some("- Low fees")
        );
        assert_eq!(renderer.render_line("只有中文"), None);
    }

    #[test]
    fn test_slide_header_lines_skipped() {
        let renderer = DeckRenderer::new();
        assert_eq!(renderer.render_line("## Slide 4: Team"), None);
    }

    #[test]
    fn test_cover_overrides_first_record() {
        let renderer = DeckRenderer::new();
        let mut first = SlideRecord::new("Ignored");
        first.add_line("Ignored content");
        let mut second = SlideRecord::new("Problem");
        second.add_line("❌ High fees");

        let slides = renderer.build_slides(&[first, second]);

        assert_eq!(slides.len(), 2);
        assert_eq!(
            slides[0],
            RenderedSlide::Cover {
                title: "CapitalEpoch".to_string(),
                subtitle: crate::config::DEFAULT_COVER_SUBTITLE.to_string(),
            }
        );
        assert_eq!(
            slides[1],
            RenderedSlide::Content {
                title: "Problem".to_string(),
                body: "• High fees".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_title_tolerated() {
        let renderer = DeckRenderer::new();
        let slides = renderer.build_slides(&[SlideRecord::default(), SlideRecord::default()]);
        assert_eq!(slides[1].title(), "");
    }

    #[test]
    fn test_render_drives_backend() {
        let config = DeckConfig::new()
            .with_cover_title("Acme")
            .with_body_font("Calibri", 20);
        let renderer = DeckRenderer::with_config(config);
        let mut backend = RecordingBackend::default();
        let records = vec![SlideRecord::new("Cover"), SlideRecord::new("Next")];

        let count = renderer
            .render(&records, &mut backend, Path::new("deck.pptx"))
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(backend.font, Some(("Calibri".to_string(), 20)));
        assert_eq!(backend.slides[0].title(), "Acme");
        assert_eq!(backend.slides[1].title(), "Next");
        assert_eq!(backend.saved_to, Some(PathBuf::from("deck.pptx")));
    }

    #[test]
    fn test_render_empty_still_saves() {
        let renderer = DeckRenderer::new();
        let mut backend = RecordingBackend::default();
        let count = renderer
            .render(&[], &mut backend, Path::new("empty.pptx"))
            .unwrap();
        assert_eq!(count, 0);
        assert!(backend.saved_to.is_some());
    }
}
