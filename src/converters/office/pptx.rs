//! PPTX slide extraction.
//!
//! Parses Microsoft PowerPoint presentations (.pptx) into positioned
//! [`ContentBlock`]s, one list per slide, ready for layout reconstruction.
//!
//! PPTX files are ZIP archives containing XML files in Open XML format.
//! Slide order comes from `ppt/presentation.xml`; slides live in
//! `ppt/slides/slideN.xml` and reference their pictures, layout and master
//! through relationship parts.

use super::package::{
    Package, Relationships, REL_IMAGE, REL_SLIDE, REL_SLIDE_LAYOUT, REL_SLIDE_MASTER,
};
use super::placeholders::{PlaceholderResolver, PlaceholderSet};
use super::shapes::{parse_shape_tree, ShapeKind, ShapeRecord};
use crate::config::ConversionOptions;
use crate::converters::markdown::{image_reference, MarkdownTable};
use crate::converters::whitespace::clean_text;
use crate::error::{Error, Result};
use crate::geometry::Frame;
use crate::layout::ContentBlock;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Picture bytes pulled out of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// File name inside the image directory, e.g. `slide2_5.png`
    pub file_name: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Content of one slide.
#[derive(Debug, Clone)]
pub struct Slide {
    /// 1-based position in the presentation
    pub number: usize,
    /// Package part the slide was read from
    pub part_name: String,
    /// Blocks in document order
    pub blocks: Vec<ContentBlock>,
    /// Pictures referenced by the slide's image blocks
    pub images: Vec<ImageAsset>,
}

/// A parsed presentation.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    /// `dc:title` from the core properties, when present
    pub title: Option<String>,
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

/// Reads slides out of a PPTX package.
pub struct PptxReader<R: Read + Seek> {
    package: Package<R>,
    options: ConversionOptions,
    /// Placeholder sets by layout/master part name
    placeholder_cache: HashMap<String, PlaceholderSet>,
}

impl PptxReader<BufReader<File>> {
    /// Open a presentation file.
    pub fn open(path: impl AsRef<Path>, options: ConversionOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file), options)
    }
}

impl PptxReader<Cursor<Vec<u8>>> {
    /// Read a presentation held in memory.
    pub fn from_bytes(bytes: Vec<u8>, options: ConversionOptions) -> Result<Self> {
        Self::new(Cursor::new(bytes), options)
    }
}

impl<R: Read + Seek> PptxReader<R> {
    /// Create a reader over any seekable source.
    pub fn new(reader: R, options: ConversionOptions) -> Result<Self> {
        Ok(Self {
            package: Package::new(reader)?,
            options,
            placeholder_cache: HashMap::new(),
        })
    }

    /// Read every slide and the presentation metadata.
    pub fn read_presentation(&mut self) -> Result<Presentation> {
        let slide_parts = self.slide_parts()?;
        if slide_parts.is_empty() {
            log::warn!("Presentation contains no slides");
        }

        let mut slides = Vec::with_capacity(slide_parts.len());
        for (i, part_name) in slide_parts.iter().enumerate() {
            slides.push(self.read_slide(i + 1, part_name)?);
        }

        let title = self.read_title()?;
        Ok(Presentation { title, slides })
    }

    /// Slide part names in presentation order.
    pub fn slide_parts(&mut self) -> Result<Vec<String>> {
        let xml = self.package.read_xml(PRESENTATION_PART)?;
        let rels = self.package.relationships(PRESENTATION_PART)?;
        let ids = parse_slide_id_list(&xml)?;

        let mut parts = Vec::with_capacity(ids.len());
        for rel_id in ids {
            let part_name = rels
                .get(&rel_id)
                .filter(|rel| rel.is_type(REL_SLIDE))
                .and_then(|rel| rel.part_name.clone())
                .ok_or_else(|| {
                    Error::InvalidPresentation(format!("slide relationship {} not found", rel_id))
                })?;
            parts.push(part_name);
        }
        Ok(parts)
    }

    /// Read one slide into content blocks.
    ///
    /// A missing or malformed slide part is an error: slides are never
    /// skipped silently.
    pub fn read_slide(&mut self, number: usize, part_name: &str) -> Result<Slide> {
        let xml = self.package.read_xml(part_name)?;
        let shapes = parse_shape_tree(&xml, part_name)?;
        let rels = self.package.relationships(part_name)?;
        let resolver = self.placeholder_resolver(&rels)?;

        let mut blocks = Vec::new();
        let mut images = Vec::new();

        for shape in &shapes {
            let frame = match self.shape_frame(shape, &resolver) {
                Some(frame) => frame,
                None => {
                    log::warn!(
                        "Slide {}: no geometry for shape {} ({}), placing at origin",
                        number,
                        shape.id,
                        shape.name
                    );
                    Frame::default()
                },
            };

            match shape.kind {
                ShapeKind::Picture => {
                    if !self.options.extract_images {
                        continue;
                    }
                    if let Some(asset) = self.read_picture(number, shape, &rels)? {
                        let markdown = image_reference(&self.options.image_dir, &asset.file_name);
                        blocks.push(
                            ContentBlock::image(frame.position.top, frame.position.left, markdown)
                                .with_size(frame.size),
                        );
                        images.push(asset);
                    }
                },
                ShapeKind::GraphicFrame => {
                    if let Some(markdown) = shape.table.as_ref().and_then(|rows| native_table(rows)) {
                        blocks.push(
                            ContentBlock::native_table(
                                frame.position.top,
                                frame.position.left,
                                markdown,
                            )
                            .with_size(frame.size),
                        );
                    }
                },
                ShapeKind::AutoShape => {
                    if !shape.has_text_body {
                        continue;
                    }
                    let text = shape.text();
                    let text = text.trim();
                    if !text.is_empty() {
                        blocks.push(
                            ContentBlock::text(frame.position.top, frame.position.left, text)
                                .with_size(frame.size),
                        );
                    }
                },
            }
        }

        log::debug!(
            "Slide {}: {} shapes, {} blocks, {} images",
            number,
            shapes.len(),
            blocks.len(),
            images.len()
        );

        Ok(Slide {
            number,
            part_name: part_name.to_string(),
            blocks,
            images,
        })
    }

    fn shape_frame(&self, shape: &ShapeRecord, resolver: &PlaceholderResolver) -> Option<Frame> {
        shape.frame.or_else(|| {
            shape
                .placeholder
                .as_ref()
                .and_then(|ph| resolver.resolve(ph))
        })
    }

    fn read_picture(
        &mut self,
        slide_number: usize,
        shape: &ShapeRecord,
        rels: &Relationships,
    ) -> Result<Option<ImageAsset>> {
        let Some(rel_id) = shape.image_rel_id.as_deref() else {
            log::debug!("Slide {}: picture {} has no embedded image", slide_number, shape.id);
            return Ok(None);
        };
        let Some(media_part) = rels
            .get(rel_id)
            .filter(|rel| rel.is_type(REL_IMAGE))
            .and_then(|rel| rel.part_name.clone())
        else {
            log::warn!(
                "Slide {}: image relationship {} not found for picture {}",
                slide_number,
                rel_id,
                shape.id
            );
            return Ok(None);
        };

        match self.package.read_bytes(&media_part)? {
            Some(data) => Ok(Some(ImageAsset {
                file_name: format!(
                    "slide{}_{}.{}",
                    slide_number,
                    shape.id,
                    image_extension(&media_part)
                ),
                data,
            })),
            None => {
                log::warn!("Slide {}: media part {} is missing", slide_number, media_part);
                Ok(None)
            },
        }
    }

    fn placeholder_resolver(&mut self, slide_rels: &Relationships) -> Result<PlaceholderResolver> {
        let Some(layout_part) = slide_rels
            .first_of_type(REL_SLIDE_LAYOUT)
            .and_then(|rel| rel.part_name.clone())
        else {
            return Ok(PlaceholderResolver::default());
        };
        let layout = self.placeholder_set(&layout_part)?;

        let layout_rels = self.package.relationships(&layout_part)?;
        let master = match layout_rels
            .first_of_type(REL_SLIDE_MASTER)
            .and_then(|rel| rel.part_name.clone())
        {
            Some(master_part) => self.placeholder_set(&master_part)?,
            None => PlaceholderSet::default(),
        };

        Ok(PlaceholderResolver::new(layout, master))
    }

    fn placeholder_set(&mut self, part_name: &str) -> Result<PlaceholderSet> {
        if let Some(set) = self.placeholder_cache.get(part_name) {
            return Ok(set.clone());
        }
        let set = match self.package.read_xml_opt(part_name)? {
            Some(xml) => PlaceholderSet::from_shapes(&parse_shape_tree(&xml, part_name)?),
            None => {
                log::debug!("Referenced part {} is missing", part_name);
                PlaceholderSet::default()
            },
        };
        self.placeholder_cache
            .insert(part_name.to_string(), set.clone());
        Ok(set)
    }

    /// Presentation title from the core properties.
    pub fn read_title(&mut self) -> Result<Option<String>> {
        match self.package.read_xml_opt(CORE_PROPERTIES_PART)? {
            Some(xml) => parse_core_title(&xml),
            None => Ok(None),
        }
    }
}

/// Render a native table: cleaned cells, first row as header.
fn native_table(rows: &[Vec<String>]) -> Option<String> {
    let cleaned = rows
        .iter()
        .map(|row| row.iter().map(|cell| clean_text(cell)).collect())
        .collect();
    MarkdownTable::from_rows(cleaned).map(|table| table.render())
}

/// File extension for an extracted image.
fn image_extension(part_name: &str) -> String {
    let ext = part_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.contains('/'))
        .unwrap_or_else(|| "bin".to_string());
    match ext.as_str() {
        "jpeg" => "jpg".to_string(),
        _ => ext,
    }
}

/// Relationship ids of `<p:sldIdLst>` in order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"sldId" =>
            {
                // The numeric `id` is unprefixed; the relationship id is `r:id`.
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| {
                        attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id"
                    })
                    .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()));
                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::xml(PRESENTATION_PART, e)),
            _ => {},
        }
        buf.clear();
    }

    Ok(ids)
}

/// `dc:title` of the core properties part.
fn parse_core_title(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut in_title = false;
    let mut title = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"title" {
                    in_title = true;
                }
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"title" {
                    in_title = false;
                }
            },
            Ok(Event::Text(e)) => {
                if in_title {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::xml(CORE_PROPERTIES_PART, err))?;
                    title = Some(text.to_string());
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::xml(CORE_PROPERTIES_PART, e)),
            _ => {},
        }
        buf.clear();
    }

    Ok(title.filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_id_list_order() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst>
<p:sldId id="257" r:id="rId3"/><p:sldId id="256" r:id="rId2"/>
</p:sldIdLst></p:presentation>"#;
        assert_eq!(parse_slide_id_list(xml).unwrap(), vec!["rId3", "rId2"]);
    }

    #[test]
    fn test_core_title() {
        let xml = r#"<cp:coreProperties xmlns:cp="cp" xmlns:dc="dc"><dc:title>Q3 Review</dc:title><dc:creator>ops</dc:creator></cp:coreProperties>"#;
        assert_eq!(parse_core_title(xml).unwrap().as_deref(), Some("Q3 Review"));
    }

    #[test]
    fn test_core_title_empty() {
        let xml = r#"<cp:coreProperties xmlns:cp="cp" xmlns:dc="dc"><dc:title></dc:title></cp:coreProperties>"#;
        assert_eq!(parse_core_title(xml).unwrap(), None);
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("ppt/media/image1.PNG"), "png");
        assert_eq!(image_extension("ppt/media/image2.jpeg"), "jpg");
        assert_eq!(image_extension("ppt/media/image3"), "bin");
    }

    #[test]
    fn test_native_table_cleans_cells() {
        let rows = vec![
            vec!["A|B".to_string(), "C\nD".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ];
        assert_eq!(
            native_table(&rows).unwrap(),
            "| A\\|B | C D |\n| :--- | :--- |\n| 1 | 2 |"
        );
        assert!(native_table(&[]).is_none());
    }
}
