//! Core rules for turning a bilingual markdown slide deck into an English deck:
//! language classification, English extraction, slide parsing, and rendering.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod markup;
pub mod parse;
pub mod render;
pub mod types;

pub use classify::is_english;
pub use config::DeckConfig;
pub use error::{Error, Result};
pub use extract::EnglishExtractor;
pub use parse::SlideParser;
pub use render::{DeckBackend, DeckRenderer};
pub use types::{RenderedSlide, SlideRecord};
