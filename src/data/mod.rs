//! Document data structures and plumbing
//!
//! The owned document tree and its JSON read/write. The facade layer in
//! `crate::model` is the editing surface over these structures.

pub mod font_data;
pub mod io;

pub use font_data::{
    AnchorData, AxisData, ComponentData, FontData, GlyphCategory, GlyphData, GuideData,
    InstanceData, KerningData, LayerData, MasterData, MasterMetrics, MasterRelation, NamesData,
    NodeData, NodeType, PathData, ShapeData,
};
pub use io::{load_document, save_document};
