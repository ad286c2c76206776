//! Master, axis, and instance facades

use std::collections::BTreeMap;

use crate::data::font_data::{AxisData, InstanceData, MasterData, MasterMetrics};
use crate::model::{Font, SharedFontData};

/// Live view over one master of the font
#[derive(Clone)]
pub struct Master {
    doc: SharedFontData,
    index: usize,
}

impl Master {
    pub(crate) fn new(doc: SharedFontData, index: usize) -> Self {
        Self { doc, index }
    }

    fn read<R>(&self, f: impl FnOnce(&MasterData) -> R) -> R {
        f(&self.doc.borrow().masters[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut MasterData) -> R) -> R {
        f(&mut self.doc.borrow_mut().masters[self.index])
    }

    /// The font this master belongs to
    pub fn parent(&self) -> Font {
        Font::from_shared(self.doc.clone())
    }

    pub fn id(&self) -> String {
        self.read(|m| m.id.clone())
    }

    pub fn name(&self) -> String {
        self.read(|m| m.name.clone())
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.write(|m| m.name = name.into());
    }

    /// Axis tag -> design coordinate, as stored
    pub fn location(&self) -> BTreeMap<String, f64> {
        self.read(|m| m.location.clone())
    }

    /// The design location with axis defaults filled in
    pub fn effective_location(&self) -> BTreeMap<String, f64> {
        let doc = self.doc.borrow();
        doc.masters[self.index].effective_location(&doc.axes)
    }

    pub fn metrics(&self) -> MasterMetrics {
        self.read(|m| m.metrics.clone())
    }

    pub fn set_metrics(&self, metrics: MasterMetrics) {
        self.write(|m| m.metrics = metrics);
    }

    /// Ascender, falling back to a fraction of the font's upm
    pub fn ascender(&self) -> f64 {
        let upm = f64::from(self.doc.borrow().upm);
        self.read(|m| m.metrics.ascender_or_default(upm))
    }

    /// Descender, falling back to a fraction of the font's upm
    pub fn descender(&self) -> f64 {
        let upm = f64::from(self.doc.borrow().upm);
        self.read(|m| m.metrics.descender_or_default(upm))
    }

    /// x-height, falling back to a fraction of the font's upm
    pub fn x_height(&self) -> f64 {
        let upm = f64::from(self.doc.borrow().upm);
        self.read(|m| m.metrics.x_height_or_default(upm))
    }

    /// Cap height, falling back to a fraction of the font's upm
    pub fn cap_height(&self) -> f64 {
        let upm = f64::from(self.doc.borrow().upm);
        self.read(|m| m.metrics.cap_height_or_default(upm))
    }

    /// Kerning value for a pair, if set
    pub fn kern(&self, left: &str, right: &str) -> Option<f64> {
        self.read(|m| m.kerning.get(left).and_then(|row| row.get(right)).copied())
    }

    /// Set the kerning value for a pair
    pub fn set_kern(&self, left: &str, right: &str, value: f64) {
        self.write(|m| {
            m.kerning
                .entry(left.to_string())
                .or_default()
                .insert(right.to_string(), value);
        });
    }

    /// Remove the kerning value for a pair; absent pairs are a no-op
    pub fn remove_kern(&self, left: &str, right: &str) {
        self.write(|m| {
            if let Some(row) = m.kerning.get_mut(left) {
                row.remove(right);
                if row.is_empty() {
                    m.kerning.remove(left);
                }
            }
        });
    }
}

/// Live view over one axis of the font
#[derive(Clone)]
pub struct Axis {
    doc: SharedFontData,
    index: usize,
}

impl Axis {
    pub(crate) fn new(doc: SharedFontData, index: usize) -> Self {
        Self { doc, index }
    }

    fn read<R>(&self, f: impl FnOnce(&AxisData) -> R) -> R {
        f(&self.doc.borrow().axes[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut AxisData) -> R) -> R {
        f(&mut self.doc.borrow_mut().axes[self.index])
    }

    /// The font this axis belongs to
    pub fn parent(&self) -> Font {
        Font::from_shared(self.doc.clone())
    }

    pub fn tag(&self) -> String {
        self.read(|a| a.tag.clone())
    }

    pub fn name(&self) -> String {
        self.read(|a| a.name.clone())
    }

    pub fn min(&self) -> Option<f64> {
        self.read(|a| a.min)
    }

    pub fn default(&self) -> Option<f64> {
        self.read(|a| a.default)
    }

    pub fn max(&self) -> Option<f64> {
        self.read(|a| a.max)
    }

    pub fn set_range(&self, min: f64, default: f64, max: f64) {
        self.write(|a| {
            a.min = Some(min);
            a.default = Some(default);
            a.max = Some(max);
        });
    }

    pub fn hidden(&self) -> bool {
        self.read(|a| a.hidden)
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.write(|a| a.hidden = hidden);
    }

    /// The mapping curve as (user, design) pairs
    pub fn map(&self) -> Vec<(f64, f64)> {
        self.read(|a| a.map.clone())
    }

    pub fn set_map(&self, map: Vec<(f64, f64)>) {
        self.write(|a| a.map = map);
    }

    /// Convert a user-space coordinate to design space
    pub fn userspace_to_designspace(&self, user: f64) -> f64 {
        self.read(|a| a.userspace_to_designspace(user))
    }

    /// Convert a design-space coordinate back to user space
    pub fn designspace_to_userspace(&self, design: f64) -> f64 {
        self.read(|a| a.designspace_to_userspace(design))
    }
}

/// Live view over one named instance of the font
#[derive(Clone)]
pub struct Instance {
    doc: SharedFontData,
    index: usize,
}

impl Instance {
    pub(crate) fn new(doc: SharedFontData, index: usize) -> Self {
        Self { doc, index }
    }

    fn read<R>(&self, f: impl FnOnce(&InstanceData) -> R) -> R {
        f(&self.doc.borrow().instances[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut InstanceData) -> R) -> R {
        f(&mut self.doc.borrow_mut().instances[self.index])
    }

    /// The font this instance belongs to
    pub fn parent(&self) -> Font {
        Font::from_shared(self.doc.clone())
    }

    pub fn id(&self) -> String {
        self.read(|i| i.id.clone())
    }

    pub fn name(&self) -> String {
        self.read(|i| i.name.clone())
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.write(|i| i.name = name.into());
    }

    pub fn location(&self) -> BTreeMap<String, f64> {
        self.read(|i| i.location.clone())
    }

    pub fn style_linked_bold(&self) -> bool {
        self.read(|i| i.style_linked_bold)
    }

    pub fn style_linked_italic(&self) -> bool {
        self.read(|i| i.style_linked_italic)
    }

    pub fn linked_style(&self) -> Option<String> {
        self.read(|i| i.linked_style.clone())
    }

    pub fn set_style_linking(&self, bold: bool, italic: bool, linked_style: Option<&str>) {
        self.write(|i| {
            i.style_linked_bold = bold;
            i.style_linked_italic = italic;
            i.linked_style = linked_style.map(str::to_string);
        });
    }
}
