//! Anchor and guide facades

use crate::data::font_data::{AnchorData, GuideData};
use crate::model::{Layer, SharedFontData};

/// Live view over one anchor of a layer
#[derive(Clone)]
pub struct Anchor {
    doc: SharedFontData,
    glyph: usize,
    layer: usize,
    index: usize,
}

impl Anchor {
    pub(crate) fn new(doc: SharedFontData, glyph: usize, layer: usize, index: usize) -> Self {
        Self {
            doc,
            glyph,
            layer,
            index,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&AnchorData) -> R) -> R {
        f(&self.doc.borrow().glyphs[self.glyph].layers[self.layer].anchors[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut AnchorData) -> R) -> R {
        f(&mut self.doc.borrow_mut().glyphs[self.glyph].layers[self.layer].anchors[self.index])
    }

    /// The layer this anchor belongs to
    pub fn parent(&self) -> Layer {
        Layer::new(self.doc.clone(), self.glyph, self.layer)
    }

    pub fn x(&self) -> f64 {
        self.read(|a| a.x)
    }

    pub fn set_x(&self, x: f64) {
        self.write(|a| a.x = x);
    }

    pub fn y(&self) -> f64 {
        self.read(|a| a.y)
    }

    pub fn set_y(&self, y: f64) {
        self.write(|a| a.y = y);
    }

    pub fn name(&self) -> Option<String> {
        self.read(|a| a.name.clone())
    }

    pub fn set_name(&self, name: Option<&str>) {
        self.write(|a| a.name = name.map(str::to_string));
    }
}

/// Live view over one guide of a layer
#[derive(Clone)]
pub struct Guide {
    doc: SharedFontData,
    glyph: usize,
    layer: usize,
    index: usize,
}

impl Guide {
    pub(crate) fn new(doc: SharedFontData, glyph: usize, layer: usize, index: usize) -> Self {
        Self {
            doc,
            glyph,
            layer,
            index,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&GuideData) -> R) -> R {
        f(&self.doc.borrow().glyphs[self.glyph].layers[self.layer].guides[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut GuideData) -> R) -> R {
        f(&mut self.doc.borrow_mut().glyphs[self.glyph].layers[self.layer].guides[self.index])
    }

    /// The layer this guide belongs to
    pub fn parent(&self) -> Layer {
        Layer::new(self.doc.clone(), self.glyph, self.layer)
    }

    pub fn x(&self) -> f64 {
        self.read(|g| g.x)
    }

    pub fn y(&self) -> f64 {
        self.read(|g| g.y)
    }

    pub fn set_position(&self, x: f64, y: f64) {
        self.write(|g| {
            g.x = x;
            g.y = y;
        });
    }

    pub fn angle(&self) -> f64 {
        self.read(|g| g.angle)
    }

    pub fn set_angle(&self, angle: f64) {
        self.write(|g| g.angle = angle);
    }

    pub fn name(&self) -> Option<String> {
        self.read(|g| g.name.clone())
    }

    pub fn set_name(&self, name: Option<&str>) {
        self.write(|g| g.name = name.map(str::to_string));
    }

    pub fn color(&self) -> Option<String> {
        self.read(|g| g.color.clone())
    }

    pub fn set_color(&self, color: Option<&str>) {
        self.write(|g| g.color = color.map(str::to_string));
    }
}
