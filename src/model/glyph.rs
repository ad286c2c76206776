//! The glyph facade

use tracing::debug;

use crate::data::font_data::{GlyphCategory, GlyphData, LayerData, MasterRelation};
use crate::model::{Font, Layer, SharedFontData};

/// Live view over one glyph
#[derive(Clone)]
pub struct Glyph {
    doc: SharedFontData,
    index: usize,
}

impl Glyph {
    pub(crate) fn new(doc: SharedFontData, index: usize) -> Self {
        Self { doc, index }
    }

    fn read<R>(&self, f: impl FnOnce(&GlyphData) -> R) -> R {
        f(&self.doc.borrow().glyphs[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut GlyphData) -> R) -> R {
        f(&mut self.doc.borrow_mut().glyphs[self.index])
    }

    /// Position of this glyph in the font's glyph list
    pub fn index(&self) -> usize {
        self.index
    }

    /// The font this glyph belongs to
    pub fn parent(&self) -> Font {
        Font::from_shared(self.doc.clone())
    }

    pub fn name(&self) -> String {
        self.read(|g| g.name.clone())
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.write(|g| g.name = name.into());
    }

    pub fn category(&self) -> GlyphCategory {
        self.read(|g| g.category)
    }

    pub fn set_category(&self, category: GlyphCategory) {
        self.write(|g| g.category = category);
    }

    pub fn codepoints(&self) -> Vec<char> {
        self.read(|g| g.codepoints.clone())
    }

    pub fn set_codepoints(&self, codepoints: Vec<char>) {
        self.write(|g| g.codepoints = codepoints);
    }

    pub fn exported(&self) -> bool {
        self.read(|g| g.exported)
    }

    pub fn set_exported(&self, exported: bool) {
        self.write(|g| g.exported = exported);
    }

    /// Editable layers: exactly those that are the default drawing for a
    /// master. Associated and detached layers are excluded here; use
    /// [`Glyph::all_layers`] to see everything.
    pub fn layers(&self) -> Vec<Layer> {
        self.read(|g| {
            g.layers
                .iter()
                .enumerate()
                .filter(|(_, layer)| layer.master.is_default())
                .map(|(index, _)| Layer::new(self.doc.clone(), self.index, index))
                .collect()
        })
    }

    /// Every layer, including associated and detached ones
    pub fn all_layers(&self) -> Vec<Layer> {
        self.read(|g| {
            (0..g.layers.len())
                .map(|index| Layer::new(self.doc.clone(), self.index, index))
                .collect()
        })
    }

    /// Layer at the given position
    pub fn layer(&self, index: usize) -> Option<Layer> {
        if index < self.read(|g| g.layers.len()) {
            Some(Layer::new(self.doc.clone(), self.index, index))
        } else {
            None
        }
    }

    /// Layer with the given id
    pub fn layer_by_id(&self, id: &str) -> Option<Layer> {
        let index = self.read(|g| g.layers.iter().position(|layer| layer.id == id))?;
        Some(Layer::new(self.doc.clone(), self.index, index))
    }

    /// Append a layer and return a view over it
    ///
    /// With a master id the layer becomes that master's default drawing
    /// and takes the master id as its own id; without one it is detached
    /// and gets a positional id.
    pub fn add_layer(&self, master_id: Option<&str>, width: f64) -> Layer {
        let index = self.write(|g| {
            let layer = match master_id {
                Some(master_id) => LayerData {
                    id: master_id.to_string(),
                    width,
                    master: MasterRelation::DefaultFor(master_id.to_string()),
                    ..Default::default()
                },
                None => LayerData {
                    id: format!("layer.{}", g.layers.len()),
                    width,
                    ..Default::default()
                },
            };
            g.layers.push(layer);
            g.layers.len() - 1
        });
        Layer::new(self.doc.clone(), self.index, index)
    }

    /// Remove the layer at the given position; out of range is a no-op
    pub fn remove_layer(&self, index: usize) {
        self.write(|g| {
            if index < g.layers.len() {
                g.layers.remove(index);
                debug!(glyph = %g.name, index, "removed layer");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Font;

    #[test]
    fn default_layer_list_filters_non_default_layers() {
        let font = Font::new();
        let glyph = font.add_glyph("A", GlyphCategory::Base);
        glyph.add_layer(Some("m1"), 500.0);
        glyph.add_layer(None, 500.0);
        glyph.write(|g| {
            g.layers.push(LayerData {
                id: "brace".into(),
                master: MasterRelation::AssociatedWith("m1".into()),
                ..Default::default()
            })
        });

        assert_eq!(glyph.all_layers().len(), 3);
        let editable = glyph.layers();
        assert_eq!(editable.len(), 1);
        assert_eq!(editable[0].id(), "m1");
    }

    #[test]
    fn layer_lookup_by_id() {
        let font = Font::new();
        let glyph = font.add_glyph("A", GlyphCategory::Base);
        glyph.add_layer(Some("m1"), 500.0);

        assert!(glyph.layer_by_id("m1").is_some());
        assert!(glyph.layer_by_id("m2").is_none());
    }

    #[test]
    fn remove_layer_out_of_range_is_a_no_op() {
        let font = Font::new();
        let glyph = font.add_glyph("A", GlyphCategory::Base);
        glyph.add_layer(Some("m1"), 500.0);

        glyph.remove_layer(7);
        assert_eq!(glyph.all_layers().len(), 1);
        glyph.remove_layer(0);
        assert!(glyph.all_layers().is_empty());
    }

    #[test]
    fn parent_walks_back_to_the_font() {
        let font = Font::new();
        let glyph = font.add_glyph("A", GlyphCategory::Base);
        assert_eq!(glyph.parent().glyph_count(), font.glyph_count());
        assert!(glyph.parent().parent().is_none());
    }
}
