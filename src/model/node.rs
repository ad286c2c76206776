//! The node facade

use crate::data::font_data::{NodeData, NodeType, ShapeData};
use crate::model::{Path, SharedFontData};

/// Live view over one node of a path
#[derive(Clone)]
pub struct Node {
    doc: SharedFontData,
    glyph: usize,
    layer: usize,
    shape: usize,
    index: usize,
}

impl Node {
    pub(crate) fn new(
        doc: SharedFontData,
        glyph: usize,
        layer: usize,
        shape: usize,
        index: usize,
    ) -> Self {
        Self {
            doc,
            glyph,
            layer,
            shape,
            index,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&NodeData) -> R) -> R {
        match &self.doc.borrow().glyphs[self.glyph].layers[self.layer].shapes[self.shape] {
            ShapeData::Path(path) => f(&path.nodes[self.index]),
            _ => panic!("shape is no longer a path"),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut NodeData) -> R) -> R {
        match &mut self.doc.borrow_mut().glyphs[self.glyph].layers[self.layer].shapes[self.shape] {
            ShapeData::Path(path) => f(&mut path.nodes[self.index]),
            _ => panic!("shape is no longer a path"),
        }
    }

    /// Position of this node in the path's node list
    pub fn index(&self) -> usize {
        self.index
    }

    /// The path this node belongs to
    pub fn parent(&self) -> Path {
        Path::new(self.doc.clone(), self.glyph, self.layer, self.shape)
    }

    pub fn x(&self) -> f64 {
        self.read(|n| n.x)
    }

    pub fn set_x(&self, x: f64) {
        self.write(|n| n.x = x);
    }

    pub fn y(&self) -> f64 {
        self.read(|n| n.y)
    }

    pub fn set_y(&self, y: f64) {
        self.write(|n| n.y = y);
    }

    pub fn set_position(&self, x: f64, y: f64) {
        self.write(|n| {
            n.x = x;
            n.y = y;
        });
    }

    pub fn nodetype(&self) -> NodeType {
        self.read(|n| n.nodetype)
    }

    pub fn set_nodetype(&self, nodetype: NodeType) {
        self.write(|n| n.nodetype = nodetype);
    }

    pub fn smooth(&self) -> bool {
        self.read(|n| n.smooth)
    }

    pub fn set_smooth(&self, smooth: bool) {
        self.write(|n| n.smooth = smooth);
    }

    /// Whether this node is on-curve (not a control point)
    pub fn is_on_curve(&self) -> bool {
        self.nodetype().is_on_curve()
    }
}
