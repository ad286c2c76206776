//! The layer facade, including metrics and the geometry surface

use std::collections::BTreeMap;

use kurbo::{Affine, Point, Rect};
use tracing::debug;

use crate::data::font_data::{
    AnchorData, ComponentData, GuideData, LayerData, MasterRelation, PathData, ShapeData,
};
use crate::geometry;
use crate::geometry::Intersection;
use crate::model::{Anchor, Component, Glyph, Guide, Path, Shape, SharedFontData};

/// Live view over one layer of a glyph
#[derive(Clone)]
pub struct Layer {
    doc: SharedFontData,
    glyph: usize,
    index: usize,
}

impl Layer {
    pub(crate) fn new(doc: SharedFontData, glyph: usize, index: usize) -> Self {
        Self { doc, glyph, index }
    }

    fn read<R>(&self, f: impl FnOnce(&LayerData) -> R) -> R {
        f(&self.doc.borrow().glyphs[self.glyph].layers[self.index])
    }

    fn write<R>(&self, f: impl FnOnce(&mut LayerData) -> R) -> R {
        f(&mut self.doc.borrow_mut().glyphs[self.glyph].layers[self.index])
    }

    /// Position of this layer in the glyph's layer list
    pub fn index(&self) -> usize {
        self.index
    }

    /// The glyph this layer belongs to
    pub fn parent(&self) -> Glyph {
        Glyph::new(self.doc.clone(), self.glyph)
    }

    pub fn id(&self) -> String {
        self.read(|l| l.id.clone())
    }

    /// Advance width
    pub fn width(&self) -> f64 {
        self.read(|l| l.width)
    }

    pub fn set_width(&self, width: f64) {
        self.write(|l| l.width = width);
    }

    /// How this layer relates to the font's masters
    pub fn master(&self) -> MasterRelation {
        self.read(|l| l.master.clone())
    }

    pub fn set_master(&self, master: MasterRelation) {
        self.write(|l| l.master = master);
    }

    /// The master id this layer carries, if any
    pub fn master_id(&self) -> Option<String> {
        self.read(|l| l.master.master_id().map(str::to_string))
    }

    /// Per-layer design-space override
    pub fn location(&self) -> Option<BTreeMap<String, f64>> {
        self.read(|l| l.location.clone())
    }

    pub fn set_location(&self, location: Option<BTreeMap<String, f64>>) {
        self.write(|l| l.location = location);
    }

    pub fn shape_count(&self) -> usize {
        self.read(|l| l.shapes.len())
    }

    /// Views over every shape, in drawing order
    pub fn shapes(&self) -> Vec<Shape> {
        (0..self.shape_count())
            .map(|index| Shape::new(self.doc.clone(), self.glyph, self.index, index))
            .collect()
    }

    /// Shape at the given position
    pub fn shape(&self, index: usize) -> Option<Shape> {
        if index < self.shape_count() {
            Some(Shape::new(self.doc.clone(), self.glyph, self.index, index))
        } else {
            None
        }
    }

    pub fn anchors(&self) -> Vec<Anchor> {
        (0..self.read(|l| l.anchors.len()))
            .map(|index| Anchor::new(self.doc.clone(), self.glyph, self.index, index))
            .collect()
    }

    pub fn guides(&self) -> Vec<Guide> {
        (0..self.read(|l| l.guides.len()))
            .map(|index| Guide::new(self.doc.clone(), self.glyph, self.index, index))
            .collect()
    }

    /// Append an empty path and return a view over it
    pub fn add_path(&self, closed: bool) -> Path {
        let index = self.write(|l| {
            l.shapes.push(ShapeData::Path(PathData::new(closed)));
            l.shapes.len() - 1
        });
        Path::new(self.doc.clone(), self.glyph, self.index, index)
    }

    /// Append a component referencing the named glyph
    pub fn add_component(&self, reference: &str, transform: Option<Affine>) -> Component {
        let index = self.write(|l| {
            l.shapes.push(ShapeData::Component(ComponentData::new(
                reference,
                transform.unwrap_or(Affine::IDENTITY),
            )));
            l.shapes.len() - 1
        });
        Component::new(self.doc.clone(), self.glyph, self.index, index)
    }

    /// Append an anchor
    pub fn add_anchor(&self, x: f64, y: f64, name: Option<&str>) -> Anchor {
        let index = self.write(|l| {
            l.anchors.push(AnchorData {
                x,
                y,
                name: name.map(str::to_string),
            });
            l.anchors.len() - 1
        });
        Anchor::new(self.doc.clone(), self.glyph, self.index, index)
    }

    /// Append a guide
    pub fn add_guide(&self, x: f64, y: f64, angle: f64, name: Option<&str>) -> Guide {
        let index = self.write(|l| {
            l.guides.push(GuideData {
                x,
                y,
                angle,
                name: name.map(str::to_string),
                color: None,
            });
            l.guides.len() - 1
        });
        Guide::new(self.doc.clone(), self.glyph, self.index, index)
    }

    /// Remove the shape at the given position; out of range is a no-op
    pub fn remove_shape(&self, index: usize) {
        self.write(|l| {
            if index < l.shapes.len() {
                l.shapes.remove(index);
            }
        });
    }

    /// Remove the anchor at the given position; out of range is a no-op
    pub fn remove_anchor(&self, index: usize) {
        self.write(|l| {
            if index < l.anchors.len() {
                l.anchors.remove(index);
            }
        });
    }

    /// Remove the guide at the given position; out of range is a no-op
    pub fn remove_guide(&self, index: usize) {
        self.write(|l| {
            if index < l.guides.len() {
                l.guides.remove(index);
            }
        });
    }

    /// Bounding box with components flattened, optionally widened by
    /// anchor positions
    pub fn bounding_box(&self, include_anchors: bool) -> Rect {
        let doc = self.doc.borrow();
        geometry::layer_bounding_box(&doc, self.glyph, self.index, include_anchors)
    }

    /// This layer's outline as concrete paths, components flattened
    ///
    /// Repeated calls return the same result as long as the document is
    /// not edited in between.
    pub fn flattened_paths(&self) -> Vec<PathData> {
        let doc = self.doc.borrow();
        geometry::flattened_paths(&doc, self.glyph, self.index)
    }

    /// Replace this layer's components with their flattened geometry
    ///
    /// Direct paths keep their drawing order; every component is
    /// replaced in place by the paths it contributed.
    pub fn decompose(&self) {
        let flattened = self.flattened_paths();
        self.write(|l| {
            l.shapes = flattened.into_iter().map(ShapeData::Path).collect();
        });
        debug!(layer = %self.id(), "decomposed components");
    }

    /// Every crossing between the segment p1->p2 and this layer's
    /// outline, ascending by the parameter along the query line
    pub fn intersections_on_line(&self, p1: Point, p2: Point, flatten: bool) -> Vec<Intersection> {
        let paths = if flatten {
            self.flattened_paths()
        } else {
            self.read(|l| {
                l.shapes
                    .iter()
                    .filter_map(|shape| match shape {
                        ShapeData::Path(path) => Some(path.clone()),
                        ShapeData::Component(_) => None,
                    })
                    .collect()
            })
        };
        geometry::line_intersections(&paths, p1, p2)
    }

    /// Find, on the named glyph, the layer sharing this layer's master
    ///
    /// Absent when this layer carries no master id, the target glyph
    /// does not exist, or it has no layer with that master id.
    pub fn matching_layer_on_glyph(&self, glyph_name: &str) -> Option<Layer> {
        let master_id = self.master_id()?;
        let (glyph, layer) = self.doc.borrow().matching_layer(glyph_name, &master_id)?;
        Some(Layer::new(self.doc.clone(), glyph, layer))
    }

    /// Left sidebearing: the gap between the origin and the outline
    pub fn lsb(&self) -> f64 {
        self.bounding_box(false).min_x()
    }

    /// Right sidebearing: the gap between the outline and the advance
    pub fn rsb(&self) -> f64 {
        self.width() - self.bounding_box(false).max_x()
    }

    /// Move the outline so the left sidebearing becomes `new_lsb`
    ///
    /// Every direct path is translated horizontally and every direct
    /// component's placement shifts by the same amount; geometry inside
    /// referenced glyphs is untouched. The advance width grows by the
    /// delta, leaving the right sidebearing as it was.
    pub fn set_lsb(&self, new_lsb: f64) {
        let delta = new_lsb - self.lsb();
        if delta == 0.0 {
            return;
        }
        self.write(|l| {
            for shape in &mut l.shapes {
                match shape {
                    ShapeData::Path(path) => {
                        for node in &mut path.nodes {
                            node.x += delta;
                        }
                    }
                    ShapeData::Component(component) => {
                        component.transform =
                            Affine::translate((delta, 0.0)) * component.transform;
                    }
                }
            }
            l.width += delta;
        });
    }

    /// Resize the advance so the right sidebearing becomes `new_rsb`
    ///
    /// Only the advance width changes; the outline stays where it is.
    pub fn set_rsb(&self, new_rsb: f64) {
        let delta = new_rsb - self.rsb();
        self.write(|l| l.width += delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::font_data::{GlyphCategory, NodeData, NodeType};
    use crate::model::Font;

    fn boxed_glyph() -> (Font, Layer) {
        let font = Font::new();
        let glyph = font.add_glyph("A", GlyphCategory::Base);
        let layer = glyph.add_layer(Some("m1"), 500.0);
        let path = layer.add_path(true);
        path.add_node(NodeData::new(100.0, 0.0, NodeType::Line));
        path.add_node(NodeData::new(400.0, 0.0, NodeType::Line));
        path.add_node(NodeData::new(400.0, 700.0, NodeType::Line));
        path.add_node(NodeData::new(100.0, 700.0, NodeType::Line));
        (font, layer)
    }

    #[test]
    fn sidebearings_of_a_boxed_glyph() {
        let (_font, layer) = boxed_glyph();
        assert_eq!(layer.bounding_box(false), Rect::new(100.0, 0.0, 400.0, 700.0));
        assert_eq!(layer.lsb(), 100.0);
        assert_eq!(layer.rsb(), 100.0);
    }

    #[test]
    fn width_identity_holds() {
        let (_font, layer) = boxed_glyph();
        let bbox = layer.bounding_box(false);
        let identity = layer.lsb() + bbox.width() + layer.rsb();
        assert!((identity - layer.width()).abs() < 1e-9);
    }

    #[test]
    fn set_lsb_translates_and_keeps_rsb() {
        let (_font, layer) = boxed_glyph();
        let old_bbox = layer.bounding_box(false);
        let old_rsb = layer.rsb();

        layer.set_lsb(150.0);

        let bbox = layer.bounding_box(false);
        assert!((bbox.min_x() - (old_bbox.min_x() + 50.0)).abs() < 1e-9);
        assert!((layer.width() - 550.0).abs() < 1e-9);
        assert!((layer.rsb() - old_rsb).abs() < 1e-9);
    }

    #[test]
    fn set_lsb_shifts_component_placement_only() {
        let font = Font::new();
        let base = font.add_glyph("base", GlyphCategory::Base);
        let base_layer = base.add_layer(Some("m1"), 500.0);
        let path = base_layer.add_path(true);
        path.add_node(NodeData::new(100.0, 0.0, NodeType::Line));
        path.add_node(NodeData::new(400.0, 0.0, NodeType::Line));
        path.add_node(NodeData::new(400.0, 700.0, NodeType::Line));
        path.add_node(NodeData::new(100.0, 700.0, NodeType::Line));

        let composite = font.add_glyph("composite", GlyphCategory::Base);
        let layer = composite.add_layer(Some("m1"), 500.0);
        layer.add_component("base", None);

        layer.set_lsb(120.0);

        // The placing transform moved...
        let component = layer.shape(0).unwrap().as_component().unwrap();
        assert!((component.transform().translation().x - 20.0).abs() < 1e-9);
        // ...but the referenced glyph's geometry did not.
        assert_eq!(base_layer.lsb(), 100.0);
        assert!((layer.lsb() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn set_rsb_resizes_advance_only() {
        let (_font, layer) = boxed_glyph();
        let old_bbox = layer.bounding_box(false);

        layer.set_rsb(250.0);

        assert_eq!(layer.bounding_box(false), old_bbox);
        assert!((layer.width() - 650.0).abs() < 1e-9);
        assert!((layer.rsb() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn removals_out_of_range_are_no_ops() {
        let (_font, layer) = boxed_glyph();
        layer.add_anchor(10.0, 10.0, Some("top"));

        layer.remove_shape(5);
        layer.remove_anchor(5);
        layer.remove_guide(0);
        assert_eq!(layer.shape_count(), 1);
        assert_eq!(layer.anchors().len(), 1);
    }

    #[test]
    fn decompose_replaces_components_with_paths() {
        let font = Font::new();
        let base = font.add_glyph("base", GlyphCategory::Base);
        let base_layer = base.add_layer(Some("m1"), 500.0);
        let path = base_layer.add_path(true);
        path.add_node(NodeData::new(0.0, 0.0, NodeType::Line));
        path.add_node(NodeData::new(100.0, 0.0, NodeType::Line));
        path.add_node(NodeData::new(100.0, 100.0, NodeType::Line));
        path.add_node(NodeData::new(0.0, 100.0, NodeType::Line));

        let composite = font.add_glyph("composite", GlyphCategory::Base);
        let layer = composite.add_layer(Some("m1"), 500.0);
        layer.add_component("base", Some(Affine::translate((50.0, 0.0))));

        let expected = layer.flattened_paths();
        layer.decompose();

        assert!(layer.shapes().iter().all(|s| s.is_path()));
        assert_eq!(layer.flattened_paths(), expected);
    }

    #[test]
    fn matching_layer_round_trip_keeps_master_id() {
        let font = Font::new();
        let a = font.add_glyph("A", GlyphCategory::Base);
        a.add_layer(Some("m1"), 500.0);
        let b = font.add_glyph("B", GlyphCategory::Base);
        b.add_layer(Some("m1"), 520.0);
        b.add_layer(Some("m2"), 560.0);

        let start = a.layer(0).unwrap();
        let there = start.matching_layer_on_glyph("B").unwrap();
        assert_eq!(there.master_id().as_deref(), Some("m1"));
        let back = there.matching_layer_on_glyph("A").unwrap();
        assert_eq!(back.master_id(), start.master_id());
    }

    #[test]
    fn matching_layer_absent_cases() {
        let font = Font::new();
        let a = font.add_glyph("A", GlyphCategory::Base);
        a.add_layer(Some("m1"), 500.0);
        let b = font.add_glyph("B", GlyphCategory::Base);
        b.add_layer(Some("m2"), 520.0);
        let detached = a.add_layer(None, 500.0);

        let layer = a.layer(0).unwrap();
        assert!(layer.matching_layer_on_glyph("missing").is_none());
        assert!(layer.matching_layer_on_glyph("B").is_none());
        assert!(detached.matching_layer_on_glyph("B").is_none());
    }
}
