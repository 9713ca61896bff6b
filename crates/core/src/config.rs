//! Deck rendering configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default heading of the cover slide.
pub const DEFAULT_COVER_TITLE: &str = "CapitalEpoch";

/// Default subtitle of the cover slide.
pub const DEFAULT_COVER_SUBTITLE: &str =
    "GameFi DeFi Platform on Aptos\n\nBuilding Digital Commercial Streets Together";

/// Smallest body font size in points accepted by OOXML (`sz="100"`).
pub const MIN_BODY_FONT_SIZE: u32 = 1;

/// Largest body font size in points accepted by OOXML (`sz="400000"`).
pub const MAX_BODY_FONT_SIZE: u32 = 4000;

/// Settings for [`crate::DeckRenderer`].
///
/// Every field is optional in JSON; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Heading of the cover slide. Replaces the first record's own title.
    pub cover_title: String,

    /// Subtitle of the cover slide.
    pub cover_subtitle: String,

    /// Typeface applied to every body paragraph.
    pub body_font: String,

    /// Body font size in points.
    pub body_font_size: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            cover_title: DEFAULT_COVER_TITLE.to_string(),
            cover_subtitle: DEFAULT_COVER_SUBTITLE.to_string(),
            body_font: "Arial".to_string(),
            body_font_size: 18,
        }
    }
}

impl DeckConfig {
    /// Create a configuration with the default cover and body styling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cover slide heading.
    pub fn with_cover_title(mut self, title: impl Into<String>) -> Self {
        self.cover_title = title.into();
        self
    }

    /// Set the cover slide subtitle.
    pub fn with_cover_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.cover_subtitle = subtitle.into();
        self
    }

    /// Set the body typeface and size.
    pub fn with_body_font(mut self, font: impl Into<String>, size: u32) -> Self {
        self.body_font = font.into();
        self.body_font_size = size.clamp(MIN_BODY_FONT_SIZE, MAX_BODY_FONT_SIZE);
        self
    }

    /// Parse a configuration from JSON text.
    ///
    /// Fails with [`Error::ConfigError`] when the body font size is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be written to a deck.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BODY_FONT_SIZE..=MAX_BODY_FONT_SIZE).contains(&self.body_font_size) {
            return Err(Error::ConfigError(format!(
                "body_font_size must be between {} and {} points, got {}",
                MIN_BODY_FONT_SIZE, MAX_BODY_FONT_SIZE, self.body_font_size
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingInputFile(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::new();
        assert_eq!(config.cover_title, "CapitalEpoch");
        assert_eq!(config.body_font, "Arial");
        assert_eq!(config.body_font_size, 18);
        assert!(config.cover_subtitle.starts_with("GameFi DeFi Platform on Aptos"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = DeckConfig::from_json(r#"{"cover_title": "Acme", "body_font_size": 20}"#)
            .unwrap();
        assert_eq!(config.cover_title, "Acme");
        assert_eq!(config.body_font_size, 20);
        assert_eq!(config.body_font, "Arial");
    }

    #[test]
    fn test_from_json_rejects_zero_font_size() {
        let err = DeckConfig::from_json(r#"{"body_font_size": 0}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_from_json_rejects_oversized_font_size() {
        let err = DeckConfig::from_json(r#"{"body_font_size": 50000000}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let max = DeckConfig::from_json(r#"{"body_font_size": 4000}"#).unwrap();
        assert_eq!(max.body_font_size, MAX_BODY_FONT_SIZE);
    }

    #[test]
    fn test_from_json_cover_subtitle() {
        let config = DeckConfig::from_json(r#"{"cover_subtitle": "Line one\nLine two"}"#).unwrap();
        assert_eq!(config, DeckConfig::new().with_cover_subtitle("Line one\nLine two"));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = DeckConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let path = std::env::temp_dir().join("deck-core-no-such-config.json");
        let err = DeckConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::MissingInputFile(_)));
    }

    #[test]
    fn test_builder_clamps_font_size() {
        let config = DeckConfig::new().with_body_font("Calibri", 0);
        assert_eq!(config.body_font, "Calibri");
        assert_eq!(config.body_font_size, 1);

        let config = DeckConfig::new().with_body_font("Calibri", u32::MAX);
        assert_eq!(config.body_font_size, MAX_BODY_FONT_SIZE);
    }
}
