//! Open Packaging Convention access for Office files.
//!
//! An Office document is a ZIP archive of "parts". Parts refer to each other
//! through relationship parts stored next to them in a `_rels` folder
//! (`ppt/slides/_rels/slide1.xml.rels` for `ppt/slides/slide1.xml`).

use crate::error::{Error, Result};
use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Relationship type suffix for slides.
pub const REL_SLIDE: &str = "/slide";
/// Relationship type suffix for slide layouts.
pub const REL_SLIDE_LAYOUT: &str = "/slideLayout";
/// Relationship type suffix for slide masters.
pub const REL_SLIDE_MASTER: &str = "/slideMaster";
/// Relationship type suffix for images.
pub const REL_IMAGE: &str = "/image";

/// A ZIP-backed Office package.
pub struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl Package<Cursor<Vec<u8>>> {
    /// Open a package held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from any seekable reader.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read a part as bytes, or `None` when it does not exist.
    pub fn read_bytes(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    /// Read an XML part as text, or `None` when it does not exist.
    pub fn read_xml_opt(&mut self, name: &str) -> Result<Option<String>> {
        match self.read_bytes(name)? {
            Some(bytes) => {
                let text = String::from_utf8(bytes)
                    .map_err(|e| Error::xml(name, format!("invalid UTF-8: {}", e)))?;
                Ok(Some(text))
            },
            None => Ok(None),
        }
    }

    /// Read a required XML part.
    pub fn read_xml(&mut self, name: &str) -> Result<String> {
        self.read_xml_opt(name)?
            .ok_or_else(|| Error::MissingPart(name.to_string()))
    }

    /// Read the relationships of a part. A missing `.rels` part means the
    /// part has no relationships.
    pub fn relationships(&mut self, part_name: &str) -> Result<Relationships> {
        let rels_name = rels_part_name(part_name);
        match self.read_xml_opt(&rels_name)? {
            Some(xml) => parse_relationships(&xml, &rels_name, part_name),
            None => {
                log::debug!("No relationships for {}", part_name);
                Ok(Relationships::default())
            },
        }
    }
}

/// One entry of a relationship part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship id (`rId3`)
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target as written in the part
    pub target: String,
    /// Target resolved to an absolute part name; `None` for external targets
    pub part_name: Option<String>,
}

impl Relationship {
    /// Whether the relationship type ends with the given suffix.
    pub fn is_type(&self, suffix: &str) -> bool {
        self.rel_type.ends_with(suffix)
    }
}

/// Relationships of one part, in document order, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: IndexMap<String, Relationship>,
}

impl Relationships {
    /// Look up a relationship by id.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.get(id)
    }

    /// First relationship of the given type.
    pub fn first_of_type(&self, suffix: &str) -> Option<&Relationship> {
        self.entries.values().find(|rel| rel.is_type(suffix))
    }
}

/// Name of the relationship part for `part_name`.
///
/// ```
/// use pptx_oxide::converters::office::package::rels_part_name;
///
/// assert_eq!(rels_part_name("ppt/slides/slide1.xml"), "ppt/slides/_rels/slide1.xml.rels");
/// assert_eq!(rels_part_name("ppt/presentation.xml"), "ppt/_rels/presentation.xml.rels");
/// ```
pub fn rels_part_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_name),
    }
}

/// Resolve a relationship target against the part that declares it.
///
/// ```
/// use pptx_oxide::converters::office::package::resolve_target;
///
/// assert_eq!(resolve_target("ppt/slides/slide1.xml", "../media/image1.png"), "ppt/media/image1.png");
/// assert_eq!(resolve_target("ppt/presentation.xml", "slides/slide2.xml"), "ppt/slides/slide2.xml");
/// assert_eq!(resolve_target("ppt/slides/slide1.xml", "/ppt/media/a.png"), "ppt/media/a.png");
/// ```
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Parse a relationship part.
pub fn parse_relationships(xml: &str, rels_name: &str, source_part: &str) -> Result<Relationships> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entries = IndexMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut external = false;

                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().unwrap_or_default().to_string();
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = value,
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        b"TargetMode" => external = value == "External",
                        _ => {},
                    }
                }

                if !id.is_empty() {
                    let part_name = if external {
                        None
                    } else {
                        Some(resolve_target(source_part, &target))
                    };
                    entries.insert(
                        id.clone(),
                        Relationship {
                            id,
                            rel_type,
                            target,
                            part_name,
                        },
                    );
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::xml(rels_name, e)),
            _ => {},
        }
        buf.clear();
    }

    Ok(Relationships { entries })
}
