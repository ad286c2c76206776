//! Derived geometry over the font document
//!
//! Everything an editor needs to draw and measure a layer: curve
//! segmentation, component flattening, bounding boxes, and line
//! intersection queries. These functions read the document tree
//! directly; the facade layer in `crate::model` wraps them.

pub mod bounds;
pub mod flatten;
pub mod intersections;
pub mod segments;

pub use bounds::layer_bounding_box;
pub use flatten::{flattened_paths, transform_path};
pub use intersections::{line_intersections, Intersection};
pub use segments::{path_segments, to_bez_path};
