//! Placeholder geometry inheritance.
//!
//! A placeholder on a slide often has no `xfrm` of its own; PowerPoint then
//! draws it where the matching placeholder of the slide layout sits, and a
//! layout placeholder without geometry in turn uses the slide master's.
//! Slide placeholders match layout placeholders by `idx`, or by base type
//! when they carry no `idx`; layout placeholders match master placeholders
//! by their base type.

use crate::converters::office::shapes::{PlaceholderRef, ShapeRecord};
use crate::geometry::Frame;

/// Master placeholder type a layout placeholder type inherits from.
///
/// ```
/// use pptx_oxide::converters::office::placeholders::base_placeholder_type;
///
/// assert_eq!(base_placeholder_type("ctrTitle"), "title");
/// assert_eq!(base_placeholder_type("subTitle"), "body");
/// assert_eq!(base_placeholder_type("dt"), "dt");
/// ```
pub fn base_placeholder_type(ph_type: &str) -> &str {
    match ph_type {
        "ctrTitle" => "title",
        "subTitle" | "obj" | "body" | "chart" | "clipArt" | "dgm" | "media" | "pic" | "tbl" => {
            "body"
        },
        other => other,
    }
}

/// Placeholders declared by one layout or master part.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSet {
    entries: Vec<(PlaceholderRef, Option<Frame>)>,
}

impl PlaceholderSet {
    /// Collect the placeholders among parsed shapes.
    pub fn from_shapes(shapes: &[ShapeRecord]) -> Self {
        let entries = shapes
            .iter()
            .filter_map(|shape| shape.placeholder.clone().map(|ph| (ph, shape.frame)))
            .collect();
        Self { entries }
    }

    /// Layout placeholder a slide placeholder inherits from: same `idx` and
    /// family, or, when the slide placeholder has no `idx`, same base type.
    fn matching(&self, slide_ph: &PlaceholderRef) -> Option<&(PlaceholderRef, Option<Frame>)> {
        let by_index = self
            .entries
            .iter()
            .find(|(ph, _)| ph.index() == slide_ph.index() && same_family(ph, slide_ph));
        if by_index.is_some() || slide_ph.idx.is_some() {
            return by_index;
        }
        self.by_base_type(slide_ph.kind())
    }

    fn by_base_type(&self, ph_type: &str) -> Option<&(PlaceholderRef, Option<Frame>)> {
        let wanted = base_placeholder_type(ph_type);
        self.entries
            .iter()
            .find(|(ph, _)| base_placeholder_type(ph.kind()) == wanted)
    }

    fn frame_by_base_type(&self, ph_type: &str) -> Option<Frame> {
        self.by_base_type(ph_type).and_then(|(_, frame)| *frame)
    }
}

/// Resolves placeholder geometry for the shapes of one slide.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderResolver {
    layout: PlaceholderSet,
    master: PlaceholderSet,
}

impl PlaceholderResolver {
    /// Create a resolver from the slide's layout and master placeholders.
    pub fn new(layout: PlaceholderSet, master: PlaceholderSet) -> Self {
        Self { layout, master }
    }

    /// Inherited frame for a slide placeholder.
    pub fn resolve(&self, placeholder: &PlaceholderRef) -> Option<Frame> {
        match self.layout.matching(placeholder) {
            Some((_, Some(frame))) => Some(*frame),
            Some((layout_ph, None)) => self.master.frame_by_base_type(layout_ph.kind()),
            None => self.master.frame_by_base_type(placeholder.kind()),
        }
    }
}

/// Index 0 is shared by title and non-title placeholders on some layouts;
/// only accept an index match when the base types agree or the slide
/// placeholder leaves its type implicit.
fn same_family(layout_ph: &PlaceholderRef, slide_ph: &PlaceholderRef) -> bool {
    slide_ph.ph_type.is_none()
        || base_placeholder_type(layout_ph.kind()) == base_placeholder_type(slide_ph.kind())
}
