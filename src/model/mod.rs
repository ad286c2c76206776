//! Typed live views over a font document
//!
//! Facades wrap the shared document and expose get/set accessors over
//! one entry each. They are created lazily on access, hold no data of
//! their own beyond their position in the tree, and any number of them
//! may read and write the same document within a single thread. Two
//! accesses of the same underlying entry yield distinct facade values
//! that mutate the same document.
//!
//! `parent()` is recomputed from the facade's position on every call,
//! never cached: structural edits shift positions, and a stored parent
//! would go stale. Using a facade after its underlying entry has been
//! removed is unspecified.

pub mod anchor;
pub mod font;
pub mod glyph;
pub mod layer;
pub mod master;
pub mod node;
pub mod shape;

pub use anchor::{Anchor, Guide};
pub use font::Font;
pub use glyph::Glyph;
pub use layer::Layer;
pub use master::{Axis, Instance, Master};
pub use node::Node;
pub use shape::{Component, Path, Shape};

use std::cell::RefCell;
use std::rc::Rc;

use crate::data::font_data::FontData;

/// The shared document every facade reads and writes through
pub type SharedFontData = Rc<RefCell<FontData>>;
