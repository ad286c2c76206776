//! Curve segmentation
//!
//! Converts a path's node list into ordered Bezier segments. A segment
//! runs from one on-curve node through any number of off-curve control
//! points to the next on-curve node. On closed paths the node list is a
//! ring: leading off-curve nodes belong to the segment that wraps around
//! to the path's first on-curve node.

use kurbo::{BezPath, CubicBez, Line, ParamCurve, PathSeg, Point, QuadBez};

use crate::data::font_data::{NodeData, NodeType, PathData};

/// Ordered Bezier segments for a path
///
/// Quadratic runs with several control points are split on their implied
/// on-curve midpoints, TrueType style. A cubic node closing over more
/// than two control points uses the last two. Open paths drop any
/// trailing control points that have no on-curve node to land on.
pub fn path_segments(path: &PathData) -> Vec<PathSeg> {
    let nodes = &path.nodes;
    if nodes.len() < 2 {
        return Vec::new();
    }

    // Normalize into a start point plus the steps that walk away from it
    // (and back to it, for closed paths).
    let mut steps: Vec<(Point, NodeType)> = Vec::new();
    let start: Point;

    if path.closed {
        match nodes.iter().position(|n| n.nodetype.is_on_curve()) {
            Some(first_on) => {
                start = node_point(&nodes[first_on]);
                for i in 1..=nodes.len() {
                    let node = &nodes[(first_on + i) % nodes.len()];
                    steps.push((node_point(node), node.nodetype));
                }
            }
            None => {
                // All-off-curve ring: start on the implied midpoint
                // between the last and first control points.
                let first = node_point(&nodes[0]);
                let last = node_point(&nodes[nodes.len() - 1]);
                start = last.midpoint(first);
                for node in nodes {
                    steps.push((node_point(node), node.nodetype));
                }
                steps.push((start, NodeType::QCurve));
            }
        }
    } else {
        let Some(first_on) = nodes.iter().position(|n| n.nodetype.is_on_curve()) else {
            return Vec::new();
        };
        start = node_point(&nodes[first_on]);
        for node in &nodes[first_on + 1..] {
            steps.push((node_point(node), node.nodetype));
        }
    }

    let mut segments = Vec::new();
    let mut current = start;
    let mut pending: Vec<Point> = Vec::new();

    for (point, nodetype) in steps {
        match nodetype {
            NodeType::OffCurve => {
                pending.push(point);
                continue;
            }
            NodeType::Curve => {
                if pending.len() >= 2 {
                    let c1 = pending[pending.len() - 2];
                    let c2 = pending[pending.len() - 1];
                    segments.push(PathSeg::Cubic(CubicBez::new(current, c1, c2, point)));
                } else if pending.len() == 1 {
                    segments.push(PathSeg::Quad(QuadBez::new(current, pending[0], point)));
                } else {
                    segments.push(PathSeg::Line(Line::new(current, point)));
                }
            }
            NodeType::QCurve => {
                if pending.is_empty() {
                    segments.push(PathSeg::Line(Line::new(current, point)));
                } else {
                    for i in 0..pending.len() {
                        let control = pending[i];
                        let end = if i == pending.len() - 1 {
                            point
                        } else {
                            control.midpoint(pending[i + 1])
                        };
                        segments.push(PathSeg::Quad(QuadBez::new(current, control, end)));
                        current = end;
                    }
                }
            }
            NodeType::Line | NodeType::Move => {
                segments.push(PathSeg::Line(Line::new(current, point)));
            }
        }
        pending.clear();
        current = point;
    }

    segments
}

/// Render a path's segments as a kurbo `BezPath`
pub fn to_bez_path(path: &PathData) -> BezPath {
    let segments = path_segments(path);
    let mut bez = BezPath::new();
    let Some(first) = segments.first() else {
        return bez;
    };
    bez.move_to(first.start());
    for segment in &segments {
        match segment {
            PathSeg::Line(line) => bez.line_to(line.p1),
            PathSeg::Quad(quad) => bez.quad_to(quad.p1, quad.p2),
            PathSeg::Cubic(cubic) => bez.curve_to(cubic.p1, cubic.p2, cubic.p3),
        }
    }
    if path.closed {
        bez.close_path();
    }
    bez
}

fn node_point(node: &NodeData) -> Point {
    Point::new(node.x, node.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64, nodetype: NodeType) -> NodeData {
        NodeData::new(x, y, nodetype)
    }

    fn closed_path(nodes: Vec<NodeData>) -> PathData {
        PathData {
            nodes,
            closed: true,
        }
    }

    #[test]
    fn rectangle_becomes_four_lines() {
        let path = closed_path(vec![
            node(100.0, 0.0, NodeType::Line),
            node(400.0, 0.0, NodeType::Line),
            node(400.0, 700.0, NodeType::Line),
            node(100.0, 700.0, NodeType::Line),
        ]);
        let segments = path_segments(&path);
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| matches!(s, PathSeg::Line(_))));
        // Winding follows node order, ending back at the first node
        match segments[3] {
            PathSeg::Line(line) => {
                assert_eq!(line.p0, Point::new(100.0, 700.0));
                assert_eq!(line.p1, Point::new(100.0, 0.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn leading_offcurves_wrap_to_first_oncurve() {
        // Ring stored with its control points first; the cubic closing
        // the ring runs from (300,0) through both controls to (0,0).
        let path = closed_path(vec![
            node(100.0, 50.0, NodeType::OffCurve),
            node(200.0, 50.0, NodeType::OffCurve),
            node(300.0, 0.0, NodeType::Curve),
            node(0.0, 0.0, NodeType::Line),
        ]);
        let segments = path_segments(&path);
        assert_eq!(segments.len(), 2);
        match segments[1] {
            PathSeg::Cubic(cubic) => {
                assert_eq!(cubic.p0, Point::new(0.0, 0.0));
                assert_eq!(cubic.p1, Point::new(100.0, 50.0));
                assert_eq!(cubic.p2, Point::new(200.0, 50.0));
                assert_eq!(cubic.p3, Point::new(300.0, 0.0));
            }
            _ => unreachable!("expected the wrap segment to be a cubic"),
        }
    }

    #[test]
    fn quadratic_run_splits_on_implied_midpoints() {
        let path = closed_path(vec![
            node(0.0, 0.0, NodeType::Line),
            node(100.0, 100.0, NodeType::OffCurve),
            node(300.0, 100.0, NodeType::OffCurve),
            node(400.0, 0.0, NodeType::QCurve),
        ]);
        let segments = path_segments(&path);
        // quad, quad, then the closing line back to (0,0)
        assert_eq!(segments.len(), 3);
        match (segments[0], segments[1]) {
            (PathSeg::Quad(a), PathSeg::Quad(b)) => {
                assert_eq!(a.p2, Point::new(200.0, 100.0));
                assert_eq!(b.p0, Point::new(200.0, 100.0));
                assert_eq!(b.p2, Point::new(400.0, 0.0));
            }
            _ => unreachable!("expected two quads"),
        }
    }

    #[test]
    fn open_path_has_no_wrap_segment() {
        let path = PathData {
            nodes: vec![
                node(0.0, 0.0, NodeType::Move),
                node(100.0, 0.0, NodeType::Line),
                node(100.0, 100.0, NodeType::Line),
            ],
            closed: false,
        };
        let segments = path_segments(&path);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn degenerate_paths_yield_nothing() {
        assert!(path_segments(&PathData::new(true)).is_empty());
        let single = PathData {
            nodes: vec![node(10.0, 10.0, NodeType::Move)],
            closed: false,
        };
        assert!(path_segments(&single).is_empty());
    }

    #[test]
    fn bez_path_round_trip_of_rectangle() {
        let path = closed_path(vec![
            node(100.0, 0.0, NodeType::Line),
            node(400.0, 0.0, NodeType::Line),
            node(400.0, 700.0, NodeType::Line),
            node(100.0, 700.0, NodeType::Line),
        ]);
        let bez = to_bez_path(&path);
        assert_eq!(bez.segments().count(), 4);
    }
}
