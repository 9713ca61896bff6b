//! PPTX reader: loads a written deck back into slide records.

use deck_core::{Error, Result, SlideRecord};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Reader for PPTX (Office Open XML) decks.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a deck from a file path.
    pub fn read_file(&self, path: &Path) -> Result<Vec<SlideRecord>> {
        if !path.exists() {
            return Err(Error::MissingInputFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Read every slide of a deck, in presentation order.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideRecord>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("Deck lists {} slides", slide_order.len());

        slide_order
            .iter()
            .map(|slide_path| {
                let content = self.read_file_from_archive(&mut archive, slide_path)?;
                self.parse_slide_xml(&content)
            })
            .collect()
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_path = "ppt/_rels/presentation.xml.rels";
        let rels_content = self.read_file_from_archive(archive, rels_path)?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();
                    let id = attribute(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order_num =
                            extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        if slides.is_empty() && archive.by_name("ppt/presentation.xml").is_err() {
            return Err(Error::CorruptedDeck("missing ppt/presentation.xml".to_string()));
        }

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Build a record from one slide part.
    ///
    /// The `title`/`ctrTitle` placeholder supplies the title; paragraphs of
    /// every other shape become content lines.
    fn parse_slide_xml(&self, xml_content: &str) -> Result<SlideRecord> {
        let mut record = SlideRecord::default();
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut in_shape = false;
        let mut is_title_shape = false;
        let mut in_paragraph = false;
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current_text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" => {
                        in_shape = true;
                        is_title_shape = false;
                        paragraphs.clear();
                    }
                    b"p" if in_shape => {
                        in_paragraph = true;
                        current_text.clear();
                    }
                    b"ph" if in_shape => is_title_shape = is_title_placeholder(e),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                    b"ph" if in_shape => is_title_shape = is_title_placeholder(e),
                    b"p" if in_shape => paragraphs.push(String::new()),
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_paragraph {
                        let text = e.unescape().unwrap_or_default();
                        current_text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" if in_paragraph => {
                        paragraphs.push(std::mem::take(&mut current_text));
                        in_paragraph = false;
                    }
                    b"sp" => {
                        if is_title_shape {
                            record.title = paragraphs.join(" ").trim().to_string();
                        } else {
                            for line in paragraphs.drain(..) {
                                record.add_line(line);
                            }
                        }
                        in_shape = false;
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
                }
                _ => {}
            }
        }

        Ok(record)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a `p:ph` element marks a title placeholder.
fn is_title_placeholder(e: &BytesStart) -> bool {
    matches!(
        attribute(e, b"type").as_deref(),
        Some("title") | Some("ctrTitle")
    )
}

/// The unescaped value of an attribute, if present.
fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PptxWriter;
    use deck_core::DeckBackend;
    use std::io::Cursor;

    fn written_deck(writer: &PptxWriter) -> Cursor<Vec<u8>> {
        let mut cursor = writer.write_to(Cursor::new(Vec::new())).unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_read_back_written_deck() {
        let mut writer = PptxWriter::new();
        writer
            .add_cover_slide("CapitalEpoch", "GameFi DeFi Platform on Aptos\n\nBuilding Together")
            .unwrap();
        writer
            .add_content_slide("Problem", "• High fees\nR&D <costs>\n  1. Step one")
            .unwrap();
        writer.add_content_slide("", "").unwrap();

        let records = PptxReader::new().read(written_deck(&writer)).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "CapitalEpoch");
        assert_eq!(
            records[0].content,
            vec!["GameFi DeFi Platform on Aptos", "Building Together"]
        );
        assert_eq!(records[1].title, "Problem");
        assert_eq!(
            records[1].content,
            vec!["• High fees", "R&D <costs>", "1. Step one"]
        );
        assert!(records[2].is_empty());
    }

    #[test]
    fn test_slide_order_beyond_nine() {
        let mut writer = PptxWriter::new();
        for n in 1..=12 {
            writer
                .add_content_slide(&format!("Slide {}", n), "Body")
                .unwrap();
        }

        let records = PptxReader::new().read(written_deck(&writer)).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles[0], "Slide 1");
        assert_eq!(titles[9], "Slide 10");
        assert_eq!(titles[11], "Slide 12");
    }

    #[test]
    fn test_empty_deck() {
        let writer = PptxWriter::new();
        let records = PptxReader::new().read(written_deck(&writer)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_not_a_zip() {
        let err = PptxReader::new()
            .read(Cursor::new(b"not a deck".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }

    #[test]
    fn test_read_file_missing() {
        let path = std::env::temp_dir().join("deck-pptx-no-such-deck.pptx");
        let err = PptxReader::new().read_file(&path).unwrap_err();
        assert!(matches!(err, Error::MissingInputFile(_)));
    }
}
