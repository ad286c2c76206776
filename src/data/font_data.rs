//! Owned document tree for a font
//!
//! These are the plain data structures that make up a font document:
//! axes, masters, instances, glyphs, layers, shapes, nodes. The document
//! is a single owned tree with no back-pointers; everything above it
//! (the facade layer in `crate::model`, the geometry engine in
//! `crate::geometry`) addresses entries by position. All structures
//! serialize to and from the document's native JSON form.

use std::collections::BTreeMap;

use kurbo::Affine;
use serde::{Deserialize, Serialize};

/// Point/segment type for a node in a path
///
/// The document accepts both the abbreviated (`"l"`) and the descriptive
/// (`"line"`) spelling on read, and always writes the abbreviated one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// First node of an open contour
    #[serde(rename = "m", alias = "move")]
    Move,
    /// Straight line from the previous on-curve node
    #[serde(rename = "l", alias = "line")]
    Line,
    /// End of a cubic curve segment
    #[serde(rename = "c", alias = "curve")]
    Curve,
    /// End of a quadratic curve segment
    #[serde(rename = "q", alias = "qcurve")]
    QCurve,
    /// Control point
    #[serde(rename = "o", alias = "offcurve")]
    OffCurve,
}

impl NodeType {
    /// Check if this node type is on-curve (not a control point)
    pub fn is_on_curve(&self) -> bool {
        !matches!(self, NodeType::OffCurve)
    }
}

/// A single node in a path
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub nodetype: NodeType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub smooth: bool,
}

impl NodeData {
    pub fn new(x: f64, y: f64, nodetype: NodeType) -> Self {
        Self {
            x,
            y,
            nodetype,
            smooth: false,
        }
    }

    /// Node with the smooth flag set (only meaningful on-curve)
    pub fn smooth(x: f64, y: f64, nodetype: NodeType) -> Self {
        Self {
            x,
            y,
            nodetype,
            smooth: nodetype.is_on_curve(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// An outline path: an ordered node list plus a closed flag
///
/// Node order defines contour winding; nothing here reorders nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub closed: bool,
}

impl PathData {
    pub fn new(closed: bool) -> Self {
        Self {
            nodes: Vec::new(),
            closed,
        }
    }
}

/// A reference to another glyph's outline plus a placement transform
///
/// The reference is a glyph name and may be dangling; consumers skip
/// unresolvable references rather than failing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    pub reference: String,
    #[serde(default = "identity")]
    pub transform: Affine,
}

fn identity() -> Affine {
    Affine::IDENTITY
}

impl ComponentData {
    pub fn new(reference: impl Into<String>, transform: Affine) -> Self {
        Self {
            reference: reference.into(),
            transform,
        }
    }
}

/// A drawable element of a layer: either a path or a component
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeData {
    Path(PathData),
    Component(ComponentData),
}

impl ShapeData {
    pub fn is_path(&self) -> bool {
        matches!(self, ShapeData::Path(_))
    }

    pub fn is_component(&self) -> bool {
        matches!(self, ShapeData::Component(_))
    }

    /// Variant name for error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeData::Path(_) => "path",
            ShapeData::Component(_) => "component",
        }
    }
}

/// A named attachment point on a layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorData {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An alignment guide: a position, an angle, and optional display info
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuideData {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// How a layer relates to the font's masters
///
/// Only `DefaultFor` layers are part of a glyph's editable layer list;
/// associated and detached layers are carried but excluded from default
/// iteration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "master")]
pub enum MasterRelation {
    /// The primary drawing for the given master
    #[serde(rename = "default")]
    DefaultFor(String),
    /// A supporting drawing (e.g. an intermediate or alternate)
    #[serde(rename = "associated")]
    AssociatedWith(String),
    /// Not tied to any master
    #[serde(rename = "detached")]
    #[default]
    Detached,
}

impl MasterRelation {
    /// The master id this relation carries, if any
    pub fn master_id(&self) -> Option<&str> {
        match self {
            MasterRelation::DefaultFor(id) | MasterRelation::AssociatedWith(id) => Some(id),
            MasterRelation::Detached => None,
        }
    }

    /// True for the primary drawing of a master
    pub fn is_default(&self) -> bool {
        matches!(self, MasterRelation::DefaultFor(_))
    }
}

/// One drawing of a glyph
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub master: MasterRelation,
    #[serde(default)]
    pub shapes: Vec<ShapeData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<AnchorData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guides: Vec<GuideData>,
    /// Per-layer design-space override (tag -> design coordinate)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<BTreeMap<String, f64>>,
}

/// Glyph category, as assigned by the designer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphCategory {
    Base,
    Mark,
    Ligature,
    #[default]
    Unknown,
}

/// A named drawable unit of the font
///
/// Names are the lookup key for components and scripting but the
/// document does not enforce their uniqueness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphData {
    pub name: String,
    #[serde(default)]
    pub category: GlyphCategory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codepoints: Vec<char>,
    #[serde(default = "default_true")]
    pub exported: bool,
    #[serde(default)]
    pub layers: Vec<LayerData>,
}

impl Default for GlyphData {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: GlyphCategory::default(),
            codepoints: Vec::new(),
            exported: true,
            layers: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A design-space axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisData {
    pub name: String,
    /// Four-character axis tag, e.g. `"wght"`
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Piecewise-linear mapping from user space to design space,
    /// as (user, design) pairs sorted by user coordinate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub map: Vec<(f64, f64)>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

impl AxisData {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            min: None,
            default: None,
            max: None,
            map: Vec::new(),
            hidden: false,
        }
    }

    /// Convert a user-space coordinate to design space
    ///
    /// Linear interpolation between the surrounding map entries, clamped
    /// at the ends. An empty map is the identity.
    pub fn userspace_to_designspace(&self, user: f64) -> f64 {
        piecewise(self.map.iter().map(|&(u, d)| (u, d)), user)
    }

    /// Convert a design-space coordinate back to user space
    ///
    /// Assumes the map is monotone, as axis maps are.
    pub fn designspace_to_userspace(&self, design: f64) -> f64 {
        piecewise(self.map.iter().map(|&(u, d)| (d, u)), design)
    }
}

fn piecewise(map: impl Iterator<Item = (f64, f64)>, value: f64) -> f64 {
    let entries: Vec<(f64, f64)> = map.collect();
    if entries.is_empty() {
        return value;
    }
    let (first_in, first_out) = entries[0];
    if value <= first_in {
        return first_out;
    }
    for window in entries.windows(2) {
        let (a_in, a_out) = window[0];
        let (b_in, b_out) = window[1];
        if value <= b_in {
            if (b_in - a_in).abs() < f64::EPSILON {
                return b_out;
            }
            let t = (value - a_in) / (b_in - a_in);
            return a_out + t * (b_out - a_out);
        }
    }
    entries[entries.len() - 1].1
}

/// Vertical metrics carried by a master
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascender: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descender: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic_angle: Option<f64>,
}

impl MasterMetrics {
    /// Ascender with a sensible default based on upm
    pub fn ascender_or_default(&self, upm: f64) -> f64 {
        self.ascender.unwrap_or(upm * 0.8)
    }

    /// Descender with a sensible default based on upm
    pub fn descender_or_default(&self, upm: f64) -> f64 {
        self.descender.unwrap_or(-(upm * 0.2))
    }

    /// x-height with a sensible default based on upm
    pub fn x_height_or_default(&self, upm: f64) -> f64 {
        self.x_height.unwrap_or(upm * 0.5)
    }

    /// Cap height with a sensible default based on upm
    pub fn cap_height_or_default(&self, upm: f64) -> f64 {
        self.cap_height.unwrap_or(upm * 0.7)
    }
}

/// Pair kerning, left glyph -> right glyph -> value
pub type KerningData = BTreeMap<String, BTreeMap<String, f64>>;

/// A design-space anchor with its own metrics and kerning
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Axis tag -> design coordinate
    #[serde(default)]
    pub location: BTreeMap<String, f64>,
    #[serde(default)]
    pub metrics: MasterMetrics,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kerning: KerningData,
}

impl MasterData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// The master's design location with axis defaults filled in
    pub fn effective_location(&self, axes: &[AxisData]) -> BTreeMap<String, f64> {
        let mut location = self.location.clone();
        for axis in axes {
            if let Some(default) = axis.default {
                location
                    .entry(axis.tag.clone())
                    .or_insert_with(|| axis.userspace_to_designspace(default));
            }
        }
        location
    }
}

/// A named static variant of the font
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub style_linked_bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub style_linked_italic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_style: Option<String>,
}

/// Font naming fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamesData {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub style_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl NamesData {
    /// Display name combining family and style names
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// The font document root, owning all descendants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontData {
    #[serde(default = "default_upm")]
    pub upm: u16,
    #[serde(default)]
    pub version: (u16, u16),
    #[serde(default)]
    pub names: NamesData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub axes: Vec<AxisData>,
    #[serde(default)]
    pub masters: Vec<MasterData>,
    #[serde(default)]
    pub instances: Vec<InstanceData>,
    #[serde(default)]
    pub glyphs: Vec<GlyphData>,
}

fn default_upm() -> u16 {
    1000
}

impl Default for FontData {
    fn default() -> Self {
        Self {
            upm: default_upm(),
            version: (1, 0),
            names: NamesData::default(),
            features: None,
            date: None,
            axes: Vec::new(),
            masters: Vec::new(),
            instances: Vec::new(),
            glyphs: Vec::new(),
        }
    }
}

impl FontData {
    /// Position of the first glyph with the given name
    pub fn glyph_index(&self, name: &str) -> Option<usize> {
        self.glyphs.iter().position(|g| g.name == name)
    }

    /// Position of the first glyph mapped to the given codepoint
    pub fn glyph_index_by_codepoint(&self, codepoint: char) -> Option<usize> {
        self.glyphs
            .iter()
            .position(|g| g.codepoints.contains(&codepoint))
    }

    /// Position of the axis with the given tag
    pub fn axis_index(&self, tag: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.tag == tag)
    }

    /// Position of the axis with the given name
    pub fn axis_index_by_name(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name == name)
    }

    /// Position of the master with the given id
    pub fn master_index(&self, id: &str) -> Option<usize> {
        self.masters.iter().position(|m| m.id == id)
    }

    /// Find, on the named glyph, the layer carrying the given master id
    ///
    /// Returns (glyph index, layer index), or None when the glyph does
    /// not exist or has no layer with that master id.
    pub fn matching_layer(&self, glyph_name: &str, master_id: &str) -> Option<(usize, usize)> {
        let glyph_index = self.glyph_index(glyph_name)?;
        let layer_index = self.glyphs[glyph_index]
            .layers
            .iter()
            .position(|layer| layer.master.master_id() == Some(master_id))?;
        Some((glyph_index, layer_index))
    }
}
