//! PPTX writer: assembles an Office Open XML package from rendered slides.

use crate::templates::*;
use deck_core::config::{MAX_BODY_FONT_SIZE, MIN_BODY_FONT_SIZE};
use deck_core::{DeckBackend, Error, RenderedSlide, Result};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Slide width in EMUs (10 inches).
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;

/// Slide height in EMUs (7.5 inches).
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// First `p:sldId` value; lower ids are reserved.
const FIRST_SLIDE_ID: usize = 256;

/// Relationship ids 1 and 2 of the presentation part are the master and theme.
const FIRST_SLIDE_REL_ID: usize = 3;

/// In-memory deck that is serialized to `.pptx` on save.
#[derive(Debug, Clone)]
pub struct PptxWriter {
    slides: Vec<RenderedSlide>,
    body_font: String,
    body_font_size: u32,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            body_font: "Arial".to_string(),
            body_font_size: 18,
        }
    }
}

impl PptxWriter {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slides added so far.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialize the package into `writer` and return it.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut parts: Vec<(String, String)> = vec![
            ("[Content_Types].xml".to_string(), self.content_types_xml()?),
            ("_rels/.rels".to_string(), root_rels_xml()),
            ("ppt/presentation.xml".to_string(), self.presentation_xml()?),
            (
                "ppt/_rels/presentation.xml.rels".to_string(),
                self.presentation_rels_xml()?,
            ),
            (SLIDE_MASTER_PATH.to_string(), SLIDE_MASTER.to_string()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
                SLIDE_MASTER_RELS.to_string(),
            ),
            (TITLE_LAYOUT_PATH.to_string(), TITLE_LAYOUT.to_string()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
                SLIDE_LAYOUT_RELS.to_string(),
            ),
            (CONTENT_LAYOUT_PATH.to_string(), CONTENT_LAYOUT.to_string()),
            (
                "ppt/slideLayouts/_rels/slideLayout2.xml.rels".to_string(),
                SLIDE_LAYOUT_RELS.to_string(),
            ),
            (THEME_PATH.to_string(), THEME.to_string()),
        ];

        for (idx, slide) in self.slides.iter().enumerate() {
            let number = idx + 1;
            parts.push((format!("ppt/slides/slide{}.xml", number), self.slide_xml(slide)?));
            parts.push((
                format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels_xml(slide),
            ));
        }

        for (path, xml) in &parts {
            zip.start_file(path.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
            zip.write_all(xml.as_bytes())?;
        }

        log::debug!("Wrote {} package parts", parts.len());

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    fn content_types_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECLARATION);
        xml.push_str(CONTENT_TYPES_OPEN);

        let fixed = [
            ("ppt/presentation.xml", CT_PRESENTATION),
            (SLIDE_MASTER_PATH, CT_SLIDE_MASTER),
            (TITLE_LAYOUT_PATH, CT_SLIDE_LAYOUT),
            (CONTENT_LAYOUT_PATH, CT_SLIDE_LAYOUT),
            (THEME_PATH, CT_THEME),
        ];
        for (part, content_type) in fixed {
            write!(xml, r#"<Override PartName="/{}" ContentType="{}"/>"#, part, content_type)
                .map_err(|e| Error::XmlError(e.to_string()))?;
        }
        for number in 1..=self.slides.len() {
            write!(
                xml,
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
                number, CT_SLIDE
            )
            .map_err(|e| Error::XmlError(e.to_string()))?;
        }

        xml.push_str("</Types>");
        Ok(xml)
    }

    fn presentation_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            NS_A, NS_R, NS_P
        )
        .map_err(|e| Error::XmlError(e.to_string()))?;
        xml.push_str(SLIDE_MASTER_ID_LIST);

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for idx in 0..self.slides.len() {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                    FIRST_SLIDE_ID + idx,
                    FIRST_SLIDE_REL_ID + idx
                )
                .map_err(|e| Error::XmlError(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/><p:notesSz cx="{}" cy="{}"/>"#,
            SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU
        )
        .map_err(|e| Error::XmlError(e.to_string()))?;
        xml.push_str("</p:presentation>");
        Ok(xml)
    }

    fn presentation_rels_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECLARATION);
        write!(xml, r#"<Relationships xmlns="{}">"#, NS_PKG_RELS)
            .map_err(|e| Error::XmlError(e.to_string()))?;
        write!(
            xml,
            r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
            REL_SLIDE_MASTER
        )
        .map_err(|e| Error::XmlError(e.to_string()))?;
        write!(
            xml,
            r#"<Relationship Id="rId2" Type="{}" Target="theme/theme1.xml"/>"#,
            REL_THEME
        )
        .map_err(|e| Error::XmlError(e.to_string()))?;
        for idx in 0..self.slides.len() {
            write!(
                xml,
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                FIRST_SLIDE_REL_ID + idx,
                REL_SLIDE,
                idx + 1
            )
            .map_err(|e| Error::XmlError(e.to_string()))?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }

    fn slide_xml(&self, slide: &RenderedSlide) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECLARATION);
        write!(xml, r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#, NS_A, NS_R, NS_P)
            .map_err(|e| Error::XmlError(e.to_string()))?;
        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(SHAPE_TREE_GROUP);

        match slide {
            RenderedSlide::Cover { title, subtitle } => {
                let title = [paragraph(title, None)];
                write_placeholder(&mut xml, 2, "Title 1", r#"type="ctrTitle""#, &title)?;

                let paragraphs: Vec<String> = subtitle
                    .split('\n')
                    .map(|line| paragraph(line, None))
                    .collect();
                write_placeholder(
                    &mut xml,
                    3,
                    "Subtitle 2",
                    r#"type="subTitle" idx="1""#,
                    &paragraphs,
                )?;
            }
            RenderedSlide::Content { title, body } => {
                let title = [paragraph(title, None)];
                write_placeholder(&mut xml, 2, "Title 1", r#"type="title""#, &title)?;

                let font = Some((self.body_font.as_str(), self.body_font_size));
                let paragraphs: Vec<String> = if body.is_empty() {
                    vec![paragraph("", font)]
                } else {
                    body.split('\n').map(|line| paragraph(line, font)).collect()
                };
                write_placeholder(
                    &mut xml,
                    3,
                    "Content Placeholder 2",
                    r#"idx="1""#,
                    &paragraphs,
                )?;
            }
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
        Ok(xml)
    }
}

impl DeckBackend for PptxWriter {
    fn set_body_font(&mut self, font: &str, size_pt: u32) {
        self.body_font = font.to_string();
        self.body_font_size = size_pt.clamp(MIN_BODY_FONT_SIZE, MAX_BODY_FONT_SIZE);
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
        let file = File::create(path)?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        log::info!(
            "Saved deck with {} slides to {}",
            self.slide_count(),
            path.display()
        );
        Ok(())
    }
}

/// One `a:p` element; `font` applies typeface and size to the run.
fn paragraph(text: &str, font: Option<(&str, u32)>) -> String {
    let run_props = match font {
        Some((typeface, size)) => format!(
            r#"<a:rPr lang="en-US" sz="{}" dirty="0"><a:latin typeface="{}"/></a:rPr>"#,
            u64::from(size) * 100,
            escape(typeface)
        ),
        None => r#"<a:rPr lang="en-US" dirty="0"/>"#.to_string(),
    };

    if text.is_empty() {
        let end_props = run_props
            .replacen("<a:rPr", "<a:endParaRPr", 1)
            .replace("</a:rPr>", "</a:endParaRPr>");
        return format!("<a:p>{}</a:p>", end_props);
    }

    format!("<a:p><a:r>{}<a:t>{}</a:t></a:r></a:p>", run_props, escape(text))
}

/// A placeholder shape holding pre-built paragraphs.
fn write_placeholder(
    xml: &mut String,
    id: u32,
    name: &str,
    ph_attrs: &str,
    paragraphs: &[String],
) -> Result<()> {
    write!(
        xml,
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            r#"<p:nvPr><p:ph {}/></p:nvPr></p:nvSpPr><p:spPr/>"#
        ),
        id, name, ph_attrs
    )
    .map_err(|e| Error::XmlError(e.to_string()))?;
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    for p in paragraphs {
        xml.push_str(p);
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn root_rels_xml() -> String {
    format!(
        concat!(
            r#"{}<Relationships xmlns="{}">"#,
            r#"<Relationship Id="rId1" Type="{}" Target="ppt/presentation.xml"/>"#,
            r#"</Relationships>"#
        ),
        XML_DECLARATION, NS_PKG_RELS, REL_OFFICE_DOCUMENT
    )
}

fn slide_rels_xml(slide: &RenderedSlide) -> String {
    let layout = match slide {
        RenderedSlide::Cover { .. } => "slideLayout1.xml",
        RenderedSlide::Content { .. } => "slideLayout2.xml",
    };
    format!(
        concat!(
            r#"{}<Relationships xmlns="{}">"#,
            r#"<Relationship Id="rId1" Type="{}" Target="../slideLayouts/{}"/>"#,
            r#"</Relationships>"#
        ),
        XML_DECLARATION, NS_PKG_RELS, REL_SLIDE_LAYOUT, layout
    )
}
