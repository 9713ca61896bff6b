//! PPTX (Office Open XML) backend for markdown slide decks.
//!
//! Writes `.pptx` packages from rendered slides and reads them back into
//! slide records.

pub mod reader;
pub mod templates;
pub mod writer;

pub use reader::PptxReader;
pub use writer::PptxWriter;
