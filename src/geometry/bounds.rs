//! Bounding-box computation
//!
//! A layer's bounding box is the union of its direct paths' bounds and
//! the bounds of every flattened component subtree, optionally widened
//! by anchor positions. Segment extrema are exact, not control-polygon
//! approximations.

use kurbo::{ParamCurveExtrema, Point, Rect};

use crate::data::font_data::{FontData, PathData};
use crate::geometry::flatten::flattened_paths;
use crate::geometry::segments::path_segments;

/// Bounding box of a layer, components flattened
///
/// A layer whose shapes and (included) anchors produce no geometry falls
/// back to a degenerate box at the origin: the layer's advance width
/// wide and zero units tall.
pub fn layer_bounding_box(
    font: &FontData,
    glyph: usize,
    layer: usize,
    include_anchors: bool,
) -> Rect {
    let layer_data = &font.glyphs[glyph].layers[layer];
    let mut bbox = paths_bounding_box(&flattened_paths(font, glyph, layer));

    if include_anchors {
        for anchor in &layer_data.anchors {
            let point = Point::new(anchor.x, anchor.y);
            bbox = Some(match bbox {
                Some(rect) => rect.union_pt(point),
                None => Rect::from_points(point, point),
            });
        }
    }

    bbox.unwrap_or_else(|| Rect::new(0.0, 0.0, layer_data.width, 0.0))
}

/// Union of the exact segment bounds of a list of paths
///
/// None when the paths produce no drawable segments.
pub fn paths_bounding_box(paths: &[PathData]) -> Option<Rect> {
    let mut bbox: Option<Rect> = None;
    for path in paths {
        for segment in path_segments(path) {
            let segment_box = segment.bounding_box();
            bbox = Some(match bbox {
                Some(rect) => rect.union(segment_box),
                None => segment_box,
            });
        }
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::font_data::{
        AnchorData, GlyphData, LayerData, MasterRelation, NodeData, NodeType, ShapeData,
    };

    fn rectangle_glyph() -> FontData {
        let mut font = FontData::default();
        font.glyphs.push(GlyphData {
            name: "A".into(),
            layers: vec![LayerData {
                id: "m1".into(),
                width: 500.0,
                master: MasterRelation::DefaultFor("m1".into()),
                shapes: vec![ShapeData::Path(PathData {
                    nodes: vec![
                        NodeData::new(100.0, 0.0, NodeType::Line),
                        NodeData::new(400.0, 0.0, NodeType::Line),
                        NodeData::new(400.0, 700.0, NodeType::Line),
                        NodeData::new(100.0, 700.0, NodeType::Line),
                    ],
                    closed: true,
                })],
                ..Default::default()
            }],
            ..Default::default()
        });
        font
    }

    #[test]
    fn rectangle_bounds() {
        let font = rectangle_glyph();
        let bbox = layer_bounding_box(&font, 0, 0, false);
        assert_eq!(bbox, Rect::new(100.0, 0.0, 400.0, 700.0));
    }

    #[test]
    fn anchors_widen_bounds_only_when_asked() {
        let mut font = rectangle_glyph();
        font.glyphs[0].layers[0].anchors.push(AnchorData {
            x: 250.0,
            y: 800.0,
            name: Some("top".into()),
        });

        let without = layer_bounding_box(&font, 0, 0, false);
        assert_eq!(without.max_y(), 700.0);
        let with = layer_bounding_box(&font, 0, 0, true);
        assert_eq!(with.max_y(), 800.0);
    }

    #[test]
    fn empty_layer_falls_back_to_advance_width_box() {
        let mut font = FontData::default();
        font.glyphs.push(GlyphData {
            name: "space".into(),
            layers: vec![LayerData {
                id: "m1".into(),
                width: 240.0,
                master: MasterRelation::DefaultFor("m1".into()),
                ..Default::default()
            }],
            ..Default::default()
        });

        let bbox = layer_bounding_box(&font, 0, 0, false);
        assert_eq!(bbox, Rect::new(0.0, 0.0, 240.0, 0.0));
    }

    #[test]
    fn curve_extrema_are_exact() {
        // A quadratic bump whose control point overshoots: the true
        // extremum is at the curve's apex, not at the control point.
        let mut font = FontData::default();
        font.glyphs.push(GlyphData {
            name: "bump".into(),
            layers: vec![LayerData {
                id: "m1".into(),
                width: 200.0,
                master: MasterRelation::DefaultFor("m1".into()),
                shapes: vec![ShapeData::Path(PathData {
                    nodes: vec![
                        NodeData::new(0.0, 0.0, NodeType::Line),
                        NodeData::new(100.0, 200.0, NodeType::OffCurve),
                        NodeData::new(200.0, 0.0, NodeType::QCurve),
                    ],
                    closed: true,
                })],
                ..Default::default()
            }],
            ..Default::default()
        });

        let bbox = layer_bounding_box(&font, 0, 0, false);
        // Apex of the quad is at y = 100, halfway to the control point
        assert!((bbox.max_y() - 100.0).abs() < 1e-9);
        assert_eq!(bbox.min_y(), 0.0);
    }
}
