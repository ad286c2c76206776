//! Shape facades: the path/component sum and its two concrete views
//!
//! A shape is exactly one of two things, so the boundary is a closed
//! sum type with exhaustive matching rather than dynamic dispatch.
//! `as_path`/`as_component` fail loudly on the wrong variant: silently
//! returning nothing there would hide editor logic errors.

use kurbo::{Affine, PathSeg};

use crate::core::errors::{FontglassError, FontglassResult};
use crate::data::font_data::{ComponentData, NodeData, PathData, ShapeData};
use crate::geometry::path_segments;
use crate::model::{Layer, Node, SharedFontData};

/// Live view over one shape of a layer, variant not yet resolved
#[derive(Clone)]
pub struct Shape {
    doc: SharedFontData,
    glyph: usize,
    layer: usize,
    index: usize,
}

impl Shape {
    pub(crate) fn new(doc: SharedFontData, glyph: usize, layer: usize, index: usize) -> Self {
        Self {
            doc,
            glyph,
            layer,
            index,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&ShapeData) -> R) -> R {
        f(&self.doc.borrow().glyphs[self.glyph].layers[self.layer].shapes[self.index])
    }

    /// Position of this shape in the layer's shape list
    pub fn index(&self) -> usize {
        self.index
    }

    /// The layer this shape belongs to
    pub fn parent(&self) -> Layer {
        Layer::new(self.doc.clone(), self.glyph, self.layer)
    }

    pub fn is_path(&self) -> bool {
        self.read(ShapeData::is_path)
    }

    pub fn is_component(&self) -> bool {
        self.read(ShapeData::is_component)
    }

    /// View this shape as a path
    ///
    /// Fails with [`FontglassError::TypeMismatch`] when it is a
    /// component.
    pub fn as_path(&self) -> FontglassResult<Path> {
        self.read(|shape| match shape {
            ShapeData::Path(_) => Ok(Path::new(
                self.doc.clone(),
                self.glyph,
                self.layer,
                self.index,
            )),
            other => Err(FontglassError::TypeMismatch {
                expected: "path",
                found: other.kind(),
            }),
        })
    }

    /// View this shape as a component
    ///
    /// Fails with [`FontglassError::TypeMismatch`] when it is a path.
    pub fn as_component(&self) -> FontglassResult<Component> {
        self.read(|shape| match shape {
            ShapeData::Component(_) => Ok(Component::new(
                self.doc.clone(),
                self.glyph,
                self.layer,
                self.index,
            )),
            other => Err(FontglassError::TypeMismatch {
                expected: "component",
                found: other.kind(),
            }),
        })
    }
}

/// Live view over a path shape
#[derive(Clone, Debug)]
pub struct Path {
    doc: SharedFontData,
    glyph: usize,
    layer: usize,
    index: usize,
}

impl Path {
    pub(crate) fn new(doc: SharedFontData, glyph: usize, layer: usize, index: usize) -> Self {
        Self {
            doc,
            glyph,
            layer,
            index,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&PathData) -> R) -> R {
        match &self.doc.borrow().glyphs[self.glyph].layers[self.layer].shapes[self.index] {
            ShapeData::Path(path) => f(path),
            // The entry was replaced under a live facade; that use is
            // outside the lifecycle contract.
            _ => panic!("shape is no longer a path"),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut PathData) -> R) -> R {
        match &mut self.doc.borrow_mut().glyphs[self.glyph].layers[self.layer].shapes[self.index] {
            ShapeData::Path(path) => f(path),
            _ => panic!("shape is no longer a path"),
        }
    }

    /// The enclosing shape slot
    pub fn parent(&self) -> Shape {
        Shape::new(self.doc.clone(), self.glyph, self.layer, self.index)
    }

    pub fn closed(&self) -> bool {
        self.read(|p| p.closed)
    }

    pub fn set_closed(&self, closed: bool) {
        self.write(|p| p.closed = closed);
    }

    pub fn node_count(&self) -> usize {
        self.read(|p| p.nodes.len())
    }

    /// Views over every node, in winding order
    pub fn nodes(&self) -> Vec<Node> {
        (0..self.node_count())
            .map(|index| Node::new(self.doc.clone(), self.glyph, self.layer, self.index, index))
            .collect()
    }

    /// Node at the given position
    pub fn node(&self, index: usize) -> Option<Node> {
        if index < self.node_count() {
            Some(Node::new(
                self.doc.clone(),
                self.glyph,
                self.layer,
                self.index,
                index,
            ))
        } else {
            None
        }
    }

    /// Append a node and return a view over it
    pub fn add_node(&self, node: NodeData) -> Node {
        let index = self.write(|p| {
            p.nodes.push(node);
            p.nodes.len() - 1
        });
        Node::new(self.doc.clone(), self.glyph, self.layer, self.index, index)
    }

    /// Remove the node at the given position; out of range is a no-op
    pub fn remove_node(&self, index: usize) {
        self.write(|p| {
            if index < p.nodes.len() {
                p.nodes.remove(index);
            }
        });
    }

    /// This path's node list as ordered Bezier segments
    pub fn segments(&self) -> Vec<PathSeg> {
        self.read(path_segments)
    }

    /// Snapshot of the underlying path data
    pub fn data(&self) -> PathData {
        self.read(PathData::clone)
    }
}

/// Live view over a component shape
#[derive(Clone, Debug)]
pub struct Component {
    doc: SharedFontData,
    glyph: usize,
    layer: usize,
    index: usize,
}

impl Component {
    pub(crate) fn new(doc: SharedFontData, glyph: usize, layer: usize, index: usize) -> Self {
        Self {
            doc,
            glyph,
            layer,
            index,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&ComponentData) -> R) -> R {
        match &self.doc.borrow().glyphs[self.glyph].layers[self.layer].shapes[self.index] {
            ShapeData::Component(component) => f(component),
            _ => panic!("shape is no longer a component"),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut ComponentData) -> R) -> R {
        match &mut self.doc.borrow_mut().glyphs[self.glyph].layers[self.layer].shapes[self.index] {
            ShapeData::Component(component) => f(component),
            _ => panic!("shape is no longer a component"),
        }
    }

    /// The enclosing shape slot
    pub fn parent(&self) -> Shape {
        Shape::new(self.doc.clone(), self.glyph, self.layer, self.index)
    }

    /// Name of the referenced glyph; may be dangling
    pub fn reference(&self) -> String {
        self.read(|c| c.reference.clone())
    }

    pub fn set_reference(&self, reference: impl Into<String>) {
        self.write(|c| c.reference = reference.into());
    }

    /// Placement transform applied to the referenced outline
    pub fn transform(&self) -> Affine {
        self.read(|c| c.transform)
    }

    pub fn set_transform(&self, transform: Affine) {
        self.write(|c| c.transform = transform);
    }
}
