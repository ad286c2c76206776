//! Fontglass
//!
//! A live object model and geometry engine for hierarchical font
//! documents. The document is a single shared, mutable store; typed
//! facades give an editor or scripting surface get/set access to every
//! level of it, and the geometry engine derives what rendering and
//! measurement need: flattened outlines, bounding boxes, and line
//! intersections.
pub mod core;
pub mod data;
pub mod geometry;
pub mod model;

pub use crate::{
    core::errors::{FontglassError, FontglassResult},
    data::font_data::{
        AnchorData, AxisData, ComponentData, FontData, GlyphCategory, GlyphData, GuideData,
        InstanceData, LayerData, MasterData, MasterMetrics, MasterRelation, NamesData, NodeData,
        NodeType, PathData, ShapeData,
    },
    geometry::Intersection,
    model::{
        Anchor, Axis, Component, Font, Glyph, Guide, Instance, Layer, Master, Node, Path, Shape,
    },
};
