//! Line intersection queries
//!
//! Finds every crossing between a line segment and an outline, tagged
//! with the parameter along the query line so callers (measurement
//! tools, cutting tools) can order and walk the crossings.

use kurbo::{Line, ParamCurve, Point};

use crate::data::font_data::PathData;
use crate::geometry::segments::path_segments;

/// Crossings closer than this in t are treated as one crossing (a line
/// passing exactly through a joint between two segments).
const T_TOLERANCE: f64 = 1e-9;

/// A single crossing between the query line and the outline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Where the outline crosses the line
    pub point: Point,
    /// Parameter along the query line, 0 at its start and 1 at its end
    pub t: f64,
}

/// All crossings between the segment p1->p2 and the given paths
///
/// Results are sorted ascending by t. Straight and curved edges are both
/// handled; curve crossings come from root-finding on the parametric
/// curve.
pub fn line_intersections(paths: &[PathData], p1: Point, p2: Point) -> Vec<Intersection> {
    let line = Line::new(p1, p2);
    let mut hits: Vec<Intersection> = Vec::new();

    for path in paths {
        for segment in path_segments(path) {
            for crossing in segment.intersect_line(line) {
                hits.push(Intersection {
                    point: segment.eval(crossing.segment_t),
                    t: crossing.line_t,
                });
            }
        }
    }

    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    hits.dedup_by(|a, b| (a.t - b.t).abs() < T_TOLERANCE);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::font_data::{NodeData, NodeType};

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

    #[test]
    fn horizontal_scan_crosses_rectangle_twice() {
        let paths = vec![rectangle(100.0, 0.0, 400.0, 700.0)];
        let hits = line_intersections(&paths, Point::new(0.0, 350.0), Point::new(500.0, 350.0));

        assert_eq!(hits.len(), 2);
        assert!(hits[0].t < hits[1].t);
        assert!((hits[0].point.x - 100.0).abs() < 1e-9);
        assert!((hits[1].point.x - 400.0).abs() < 1e-9);
    }

    #[test]
    fn crossings_sorted_ascending_by_t() {
        // Two boxes side by side, scanned right to left: the hits on the
        // right box must come first.
        let paths = vec![
            rectangle(0.0, 0.0, 100.0, 100.0),
            rectangle(200.0, 0.0, 300.0, 100.0),
        ];
        let hits = line_intersections(&paths, Point::new(400.0, 50.0), Point::new(-100.0, 50.0));

        assert_eq!(hits.len(), 4);
        let xs: Vec<f64> = hits.iter().map(|h| h.point.x).collect();
        assert!((xs[0] - 300.0).abs() < 1e-9);
        assert!((xs[3] - 0.0).abs() < 1e-9);
        for pair in hits.windows(2) {
            assert!(pair[0].t < pair[1].t);
        }
    }

    #[test]
    fn line_through_curved_bowl_crosses_twice() {
        // A bowl: flat top, cubic belly below.
        let bowl = PathData {
            nodes: vec![
                NodeData::new(0.0, 500.0, NodeType::Line),
                NodeData::new(400.0, 500.0, NodeType::Line),
                NodeData::new(400.0, -100.0, NodeType::OffCurve),
                NodeData::new(0.0, -100.0, NodeType::OffCurve),
                NodeData::new(0.0, 500.0, NodeType::Curve),
            ],
            closed: true,
        };
        let hits = line_intersections(
            &[bowl],
            Point::new(-100.0, 100.0),
            Point::new(500.0, 100.0),
        );

        assert_eq!(hits.len(), 2);
        assert!(hits[0].t < hits[1].t);
        for hit in &hits {
            assert!((hit.point.y - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn line_missing_outline_finds_nothing() {
        let paths = vec![rectangle(100.0, 0.0, 400.0, 700.0)];
        let hits = line_intersections(&paths, Point::new(0.0, 800.0), Point::new(500.0, 800.0));
        assert!(hits.is_empty());
    }

    #[test]
    fn query_is_a_segment_not_an_infinite_line() {
        let paths = vec![rectangle(100.0, 0.0, 400.0, 700.0)];
        // Stops short of the rectangle.
        let hits = line_intersections(&paths, Point::new(0.0, 350.0), Point::new(50.0, 350.0));
        assert!(hits.is_empty());
    }
}
