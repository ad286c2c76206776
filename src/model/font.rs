//! The font facade, root of the document

use tracing::debug;

use crate::core::errors::FontglassResult;
use crate::data::font_data::{FontData, GlyphCategory, GlyphData};
use crate::model::{Axis, Glyph, Instance, Master, SharedFontData};

/// Live view over a whole font document
///
/// Cloning a `Font` clones the handle, not the document: both values
/// keep addressing the same shared store.
#[derive(Clone)]
pub struct Font {
    doc: SharedFontData,
}

impl Font {
    /// An empty font document
    pub fn new() -> Self {
        Self::from_document(FontData::default())
    }

    /// Wrap an existing document
    pub fn from_document(document: FontData) -> Self {
        Self {
            doc: SharedFontData::new(document.into()),
        }
    }

    pub(crate) fn from_shared(doc: SharedFontData) -> Self {
        Self { doc }
    }

    /// The live document handle
    ///
    /// This is shared, not a copy: mutations through it are visible to
    /// every facade, and `to_json` reflects them.
    pub fn document(&self) -> SharedFontData {
        self.doc.clone()
    }

    /// The font is the document root
    pub fn parent(&self) -> Option<Font> {
        None
    }

    pub fn upm(&self) -> u16 {
        self.doc.borrow().upm
    }

    pub fn set_upm(&self, upm: u16) {
        self.doc.borrow_mut().upm = upm;
    }

    pub fn version(&self) -> (u16, u16) {
        self.doc.borrow().version
    }

    pub fn set_version(&self, major: u16, minor: u16) {
        self.doc.borrow_mut().version = (major, minor);
    }

    pub fn family_name(&self) -> String {
        self.doc.borrow().names.family_name.clone()
    }

    pub fn set_family_name(&self, name: impl Into<String>) {
        self.doc.borrow_mut().names.family_name = name.into();
    }

    pub fn style_name(&self) -> String {
        self.doc.borrow().names.style_name.clone()
    }

    pub fn set_style_name(&self, name: impl Into<String>) {
        self.doc.borrow_mut().names.style_name = name.into();
    }

    /// Display name combining family and style names
    pub fn display_name(&self) -> String {
        self.doc.borrow().names.display_name()
    }

    pub fn features(&self) -> Option<String> {
        self.doc.borrow().features.clone()
    }

    pub fn set_features(&self, features: Option<String>) {
        self.doc.borrow_mut().features = features;
    }

    pub fn glyph_count(&self) -> usize {
        self.doc.borrow().glyphs.len()
    }

    /// Views over every glyph, in document order
    pub fn glyphs(&self) -> Vec<Glyph> {
        (0..self.glyph_count())
            .map(|index| Glyph::new(self.doc.clone(), index))
            .collect()
    }

    /// View over the glyph at the given position
    pub fn glyph(&self, index: usize) -> Option<Glyph> {
        if index < self.glyph_count() {
            Some(Glyph::new(self.doc.clone(), index))
        } else {
            None
        }
    }

    /// First glyph with the given name; absence is not an error
    pub fn find_glyph(&self, name: &str) -> Option<Glyph> {
        let index = self.doc.borrow().glyph_index(name)?;
        Some(Glyph::new(self.doc.clone(), index))
    }

    /// First glyph mapped to the given codepoint
    pub fn find_glyph_by_codepoint(&self, codepoint: char) -> Option<Glyph> {
        let index = self.doc.borrow().glyph_index_by_codepoint(codepoint)?;
        Some(Glyph::new(self.doc.clone(), index))
    }

    pub fn axes(&self) -> Vec<Axis> {
        (0..self.doc.borrow().axes.len())
            .map(|index| Axis::new(self.doc.clone(), index))
            .collect()
    }

    /// Axis with the given tag
    pub fn axis(&self, tag: &str) -> Option<Axis> {
        let index = self.doc.borrow().axis_index(tag)?;
        Some(Axis::new(self.doc.clone(), index))
    }

    /// Axis with the given display name
    pub fn axis_by_name(&self, name: &str) -> Option<Axis> {
        let index = self.doc.borrow().axis_index_by_name(name)?;
        Some(Axis::new(self.doc.clone(), index))
    }

    pub fn masters(&self) -> Vec<Master> {
        (0..self.doc.borrow().masters.len())
            .map(|index| Master::new(self.doc.clone(), index))
            .collect()
    }

    /// Master with the given id
    pub fn master(&self, id: &str) -> Option<Master> {
        let index = self.doc.borrow().master_index(id)?;
        Some(Master::new(self.doc.clone(), index))
    }

    pub fn instances(&self) -> Vec<Instance> {
        (0..self.doc.borrow().instances.len())
            .map(|index| Instance::new(self.doc.clone(), index))
            .collect()
    }

    /// Append a new glyph with no layers and return a view over it
    pub fn add_glyph(&self, name: impl Into<String>, category: GlyphCategory) -> Glyph {
        let name = name.into();
        let index = {
            let mut doc = self.doc.borrow_mut();
            doc.glyphs.push(GlyphData {
                name: name.clone(),
                category,
                ..Default::default()
            });
            doc.glyphs.len() - 1
        };
        debug!(glyph = %name, "added glyph");
        Glyph::new(self.doc.clone(), index)
    }

    /// Remove the first glyph with the given name; no-op if absent
    pub fn remove_glyph(&self, name: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(index) = doc.glyph_index(name) {
            doc.glyphs.remove(index);
            debug!(glyph = %name, "removed glyph");
        }
    }

    /// The live document as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&*self.doc.borrow())
            .unwrap_or(serde_json::Value::Null)
    }

    /// The live document serialized to a JSON string
    pub fn to_json_string(&self) -> FontglassResult<String> {
        Ok(serde_json::to_string_pretty(&*self.doc.borrow())?)
    }

    /// Load a font document from a JSON file
    pub fn open(path: impl AsRef<std::path::Path>) -> FontglassResult<Font> {
        Ok(Self::from_document(crate::data::io::load_document(
            path.as_ref(),
        )?))
    }

    /// Save the current document as JSON
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> FontglassResult<()> {
        crate::data::io::save_document(&self.doc.borrow(), path.as_ref())
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}
