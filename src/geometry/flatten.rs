//! Component flattening
//!
//! Resolves a layer's component references into concrete outline
//! geometry. Each component is resolved by finding, on the referenced
//! glyph, the layer sharing the current layer's master, flattening that
//! layer recursively, and applying the component's placement transform
//! to the result. Unresolvable references contribute nothing; reference
//! cycles are cut by tracking the recursion path.

use std::collections::HashSet;

use kurbo::{Affine, Point};
use tracing::{debug, warn};

use crate::data::font_data::{FontData, PathData, ShapeData};

/// Flatten a layer into a list of concrete paths
///
/// Direct paths are returned as-is (cloned); every component subtree is
/// recursively flattened with its transforms applied. The result is in
/// document order: direct paths and component contributions interleave
/// the way the layer's shape list does.
pub fn flattened_paths(font: &FontData, glyph: usize, layer: usize) -> Vec<PathData> {
    let mut visiting = HashSet::new();
    flatten_into(font, glyph, layer, &mut visiting)
}

fn flatten_into(
    font: &FontData,
    glyph_index: usize,
    layer_index: usize,
    visiting: &mut HashSet<(String, String)>,
) -> Vec<PathData> {
    let glyph = &font.glyphs[glyph_index];
    let layer = &glyph.layers[layer_index];

    let key = (glyph.name.clone(), layer.id.clone());
    if !visiting.insert(key.clone()) {
        debug!(glyph = %glyph.name, layer = %layer.id, "component cycle, pruning branch");
        return Vec::new();
    }

    let mut result = Vec::new();
    for shape in &layer.shapes {
        match shape {
            ShapeData::Path(path) => result.push(path.clone()),
            ShapeData::Component(component) => {
                let Some(master_id) = layer.master.master_id() else {
                    debug!(
                        reference = %component.reference,
                        "layer has no master, component cannot be resolved"
                    );
                    continue;
                };
                let Some((target_glyph, target_layer)) =
                    font.matching_layer(&component.reference, master_id)
                else {
                    warn!(
                        reference = %component.reference,
                        "skipping unresolvable component reference"
                    );
                    continue;
                };
                for mut path in flatten_into(font, target_glyph, target_layer, visiting) {
                    transform_path(&mut path, component.transform);
                    result.push(path);
                }
            }
        }
    }

    // Only the current recursion path is tracked, so sibling components
    // may place the same base glyph more than once.
    visiting.remove(&key);
    result
}

/// Apply an affine transform to every node coordinate of a path
pub fn transform_path(path: &mut PathData, transform: Affine) {
    for node in &mut path.nodes {
        let point = transform * Point::new(node.x, node.y);
        node.x = point.x;
        node.y = point.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::font_data::{
        ComponentData, GlyphData, LayerData, MasterRelation, NodeData, NodeType,
    };

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> PathData {
        PathData {
            nodes: vec![
                NodeData::new(x0, y0, NodeType::Line),
                NodeData::new(x1, y0, NodeType::Line),
                NodeData::new(x1, y1, NodeType::Line),
                NodeData::new(x0, y1, NodeType::Line),
            ],
            closed: true,
        }
    }

    fn glyph_with_layer(name: &str, master: &str, shapes: Vec<ShapeData>) -> GlyphData {
        GlyphData {
            name: name.into(),
            layers: vec![LayerData {
                id: master.into(),
                width: 500.0,
                master: MasterRelation::DefaultFor(master.into()),
                shapes,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn component_geometry_is_transformed() {
        let mut font = FontData::default();
        font.glyphs.push(glyph_with_layer(
            "A",
            "m1",
            vec![ShapeData::Path(rectangle(100.0, 0.0, 400.0, 700.0))],
        ));
        font.glyphs.push(glyph_with_layer(
            "Aacute",
            "m1",
            vec![
                ShapeData::Component(ComponentData::new("A", Affine::IDENTITY)),
                ShapeData::Component(ComponentData::new(
                    "acutecomb",
                    Affine::translate((250.0, 500.0)),
                )),
            ],
        ));
        font.glyphs.push(glyph_with_layer(
            "acutecomb",
            "m1",
            vec![ShapeData::Path(rectangle(0.0, 0.0, 50.0, 200.0))],
        ));

        let paths = flattened_paths(&font, 1, 0);
        assert_eq!(paths.len(), 2);
        // A's rectangle untouched
        assert_eq!(paths[0].nodes[0].x, 100.0);
        // acutecomb shifted by (250, 500)
        assert_eq!(paths[1].nodes[0].x, 250.0);
        assert_eq!(paths[1].nodes[0].y, 500.0);
    }

    #[test]
    fn nested_components_compose_transforms() {
        let mut font = FontData::default();
        font.glyphs.push(glyph_with_layer(
            "dot",
            "m1",
            vec![ShapeData::Path(rectangle(0.0, 0.0, 10.0, 10.0))],
        ));
        font.glyphs.push(glyph_with_layer(
            "dotshift",
            "m1",
            vec![ShapeData::Component(ComponentData::new(
                "dot",
                Affine::translate((100.0, 0.0)),
            ))],
        ));
        font.glyphs.push(glyph_with_layer(
            "outer",
            "m1",
            vec![ShapeData::Component(ComponentData::new(
                "dotshift",
                Affine::translate((0.0, 50.0)),
            ))],
        ));

        let paths = flattened_paths(&font, 2, 0);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].nodes[0].x, 100.0);
        assert_eq!(paths[0].nodes[0].y, 50.0);
    }

    #[test]
    fn self_reference_terminates() {
        let mut font = FontData::default();
        font.glyphs.push(glyph_with_layer(
            "X",
            "m1",
            vec![
                ShapeData::Path(rectangle(0.0, 0.0, 100.0, 100.0)),
                ShapeData::Component(ComponentData::new("X", Affine::IDENTITY)),
            ],
        ));

        let paths = flattened_paths(&font, 0, 0);
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn mutual_cycle_terminates() {
        let mut font = FontData::default();
        font.glyphs.push(glyph_with_layer(
            "P",
            "m1",
            vec![
                ShapeData::Path(rectangle(0.0, 0.0, 10.0, 10.0)),
                ShapeData::Component(ComponentData::new("Q", Affine::IDENTITY)),
            ],
        ));
        font.glyphs.push(glyph_with_layer(
            "Q",
            "m1",
            vec![ShapeData::Component(ComponentData::new(
                "P",
                Affine::IDENTITY,
            ))],
        ));

        // P -> Q -> P stops; Q contributes P's direct path once.
        let paths = flattened_paths(&font, 0, 0);
        assert_eq!(paths.len(), 1);
        let paths = flattened_paths(&font, 1, 0);
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn sibling_components_both_contribute() {
        let mut font = FontData::default();
        font.glyphs.push(glyph_with_layer(
            "dotaccent",
            "m1",
            vec![ShapeData::Path(rectangle(0.0, 0.0, 10.0, 10.0))],
        ));
        font.glyphs.push(glyph_with_layer(
            "dieresis",
            "m1",
            vec![
                ShapeData::Component(ComponentData::new("dotaccent", Affine::IDENTITY)),
                ShapeData::Component(ComponentData::new(
                    "dotaccent",
                    Affine::translate((30.0, 0.0)),
                )),
            ],
        ));

        let paths = flattened_paths(&font, 1, 0);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].nodes[0].x, 30.0);
    }

    #[test]
    fn dangling_reference_contributes_nothing() {
        let mut font = FontData::default();
        font.glyphs.push(glyph_with_layer(
            "A",
            "m1",
            vec![
                ShapeData::Path(rectangle(0.0, 0.0, 10.0, 10.0)),
                ShapeData::Component(ComponentData::new("missing", Affine::IDENTITY)),
            ],
        ));

        let paths = flattened_paths(&font, 0, 0);
        assert_eq!(paths.len(), 1);
    }
}
