//! Shape tree parsing for slide, layout and master parts.
//!
//! Only the top-level children of `<p:spTree>` are collected. Group shapes
//! are skipped together with everything inside them, and connectors carry
//! no text, so neither produces a record.

use crate::error::{Error, Result};
use crate::geometry::{Emu, Frame};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element a shape record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// `<p:sp>`: text box, placeholder or autoshape
    AutoShape,
    /// `<p:pic>`
    Picture,
    /// `<p:graphicFrame>`: tables, charts, diagrams
    GraphicFrame,
}

impl ShapeKind {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(ShapeKind::AutoShape),
            b"pic" => Some(ShapeKind::Picture),
            b"graphicFrame" => Some(ShapeKind::GraphicFrame),
            _ => None,
        }
    }
}

/// `<p:ph>` attributes of a placeholder shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderRef {
    /// Placeholder type (`title`, `body`, ...); absent means `obj`
    pub ph_type: Option<String>,
    /// Placeholder index; absent means 0
    pub idx: Option<u32>,
}

impl PlaceholderRef {
    /// Index with the default applied.
    pub fn index(&self) -> u32 {
        self.idx.unwrap_or(0)
    }

    /// Type with the default applied.
    pub fn kind(&self) -> &str {
        self.ph_type.as_deref().unwrap_or("obj")
    }
}

/// Raw data of one top-level shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    /// Element kind
    pub kind: ShapeKind,
    /// `cNvPr/@id`
    pub id: u32,
    /// `cNvPr/@name`
    pub name: String,
    /// Own geometry, if the shape declares an `xfrm`
    pub frame: Option<Frame>,
    /// Placeholder reference, for placeholder shapes
    pub placeholder: Option<PlaceholderRef>,
    /// Whether the shape has its own text body
    pub has_text_body: bool,
    /// Paragraph texts of the shape's text body
    pub paragraphs: Vec<String>,
    /// `r:embed` id of a picture's blip
    pub image_rel_id: Option<String>,
    /// Cell text of a table, row-major
    pub table: Option<Vec<Vec<String>>>,
}

impl ShapeRecord {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            id: 0,
            name: String::new(),
            frame: None,
            placeholder: None,
            has_text_body: false,
            paragraphs: Vec::new(),
            image_rel_id: None,
            table: None,
        }
    }

    /// Text of the text body, paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

#[derive(Debug, Default)]
struct XfrmValues {
    x: Emu,
    y: Emu,
    cx: Emu,
    cy: Emu,
}

/// Streaming parser state for one shape tree.
#[derive(Debug, Default)]
struct ShapeTreeState {
    shapes: Vec<ShapeRecord>,
    in_sp_tree: bool,
    group_depth: usize,

    current: Option<ShapeRecord>,
    xfrm: Option<XfrmValues>,
    in_text_body: bool,

    table: Option<Vec<Vec<String>>>,
    row: Option<Vec<String>>,
    cell: Option<Vec<String>>,

    paragraph: Option<String>,
    in_text: bool,
}

impl ShapeTreeState {
    fn handle_start(&mut self, e: &BytesStart<'_>, empty: bool) {
        let local = e.local_name();
        let name = local.as_ref();

        if self.current.is_none() {
            match name {
                b"spTree" => self.in_sp_tree = !empty,
                b"grpSp" if self.in_sp_tree && !empty => self.group_depth += 1,
                _ if self.in_sp_tree && self.group_depth == 0 && !empty => {
                    if let Some(kind) = ShapeKind::from_local_name(name) {
                        self.current = Some(ShapeRecord::new(kind));
                    }
                },
                _ => {},
            }
            return;
        }

        match name {
            b"cNvPr" => {
                if let Some(shape) = self.current.as_mut() {
                    if shape.id == 0 {
                        shape.id = attr_value(e, b"id")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        shape.name = attr_value(e, b"name").unwrap_or_default();
                    }
                }
            },
            b"ph" => {
                if let Some(shape) = self.current.as_mut() {
                    shape.placeholder = Some(PlaceholderRef {
                        ph_type: attr_value(e, b"type"),
                        idx: attr_value(e, b"idx").and_then(|v| v.parse().ok()),
                    });
                }
            },
            b"xfrm" => {
                let has_frame = self.current.as_ref().is_some_and(|s| s.frame.is_some());
                if !empty && !self.in_text_body && self.table.is_none() && !has_frame {
                    self.xfrm = Some(XfrmValues::default());
                }
            },
            b"off" => {
                if let Some(xfrm) = self.xfrm.as_mut() {
                    xfrm.x = emu_attr(e, b"x");
                    xfrm.y = emu_attr(e, b"y");
                }
            },
            b"ext" => {
                if let Some(xfrm) = self.xfrm.as_mut() {
                    xfrm.cx = emu_attr(e, b"cx");
                    xfrm.cy = emu_attr(e, b"cy");
                }
            },
            b"blip" => {
                if let Some(shape) = self.current.as_mut() {
                    shape.image_rel_id = attr_value(e, b"embed");
                }
            },
            b"txBody" => {
                if self.table.is_none() {
                    if let Some(shape) = self.current.as_mut() {
                        shape.has_text_body = true;
                    }
                }
                self.in_text_body = !empty;
            },
            b"tbl" => {
                self.table = Some(Vec::new());
                if empty {
                    self.handle_end(b"tbl");
                }
            },
            b"tr" if self.table.is_some() => {
                self.row = Some(Vec::new());
                if empty {
                    self.handle_end(b"tr");
                }
            },
            b"tc" if self.row.is_some() => {
                self.cell = Some(Vec::new());
                if empty {
                    self.handle_end(b"tc");
                }
            },
            b"p" if self.in_text_body => {
                self.paragraph = Some(String::new());
                if empty {
                    self.handle_end(b"p");
                }
            },
            b"t" if self.paragraph.is_some() => self.in_text = !empty,
            b"br" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.push('\n');
                }
            },
            _ => {},
        }
    }

    fn handle_end(&mut self, name: &[u8]) {
        if self.current.is_none() {
            match name {
                b"spTree" => self.in_sp_tree = false,
                b"grpSp" if self.group_depth > 0 => self.group_depth -= 1,
                _ => {},
            }
            return;
        }

        match name {
            b"sp" | b"pic" | b"graphicFrame" => {
                let closes_current = self
                    .current
                    .as_ref()
                    .is_some_and(|s| ShapeKind::from_local_name(name) == Some(s.kind));
                if closes_current {
                    self.finish_shape();
                }
            },
            b"xfrm" => {
                if let (Some(xfrm), Some(shape)) = (self.xfrm.take(), self.current.as_mut()) {
                    shape.frame = Some(Frame::from_xfrm(xfrm.x, xfrm.y, xfrm.cx, xfrm.cy));
                }
            },
            b"txBody" => self.in_text_body = false,
            b"p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    match (self.cell.as_mut(), self.current.as_mut()) {
                        (Some(cell), _) => cell.push(paragraph),
                        (None, Some(shape)) => shape.paragraphs.push(paragraph),
                        (None, None) => {},
                    }
                }
            },
            b"t" => self.in_text = false,
            b"tc" => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push(cell.join("\n"));
                }
            },
            b"tr" => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.push(row);
                }
            },
            b"tbl" => {
                if let (Some(table), Some(shape)) = (self.table.take(), self.current.as_mut()) {
                    shape.table = Some(table);
                }
            },
            _ => {},
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.in_text {
            if let Some(paragraph) = self.paragraph.as_mut() {
                paragraph.push_str(text);
            }
        }
    }

    fn finish_shape(&mut self) {
        if let Some(shape) = self.current.take() {
            self.shapes.push(shape);
        }
        self.xfrm = None;
        self.in_text_body = false;
        self.table = None;
        self.row = None;
        self.cell = None;
        self.paragraph = None;
        self.in_text = false;
    }
}

fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()))
}

fn emu_attr(e: &BytesStart<'_>, local: &[u8]) -> Emu {
    attr_value(e, local)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Parse the top-level shapes of a slide, layout or master part.
pub fn parse_shape_tree(xml: &str, part_name: &str) -> Result<Vec<ShapeRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut state = ShapeTreeState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.handle_start(e, false),
            Ok(Event::Empty(ref e)) => state.handle_start(e, true),
            Ok(Event::End(ref e)) => state.handle_end(e.local_name().as_ref()),
            Ok(Event::Text(ref e)) => {
                if state.in_text {
                    let text = e.unescape().map_err(|err| Error::xml(part_name, err))?;
                    state.handle_text(&text);
                }
            },
            Ok(Event::CData(ref e)) => {
                if state.in_text {
                    state.handle_text(&String::from_utf8_lossy(e));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::xml(part_name, e)),
            _ => {},
        }
        buf.clear();
    }

    Ok(state.shapes)
}
