//! Command line interface for the document inspector
//!
//! Handles parsing command line arguments and runs the requested query
//! against a font document. Options are documented with examples to
//! help users understand the expected format.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kurbo::Point;
use std::path::PathBuf;

use crate::model::Font;

/// Fontglass CLI arguments
///
/// Examples:
///   fontglass info MyFont.fontglass                 # Font overview
///   fontglass bbox MyFont.fontglass A               # Bounding box of a glyph
///   fontglass bbox MyFont.fontglass A --anchors     # Include anchors
///   fontglass paths MyFont.fontglass Aacute         # Flattened outline as JSON
///   fontglass intersect MyFont.fontglass O 0 350 1000 350
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "fontglass",
    version,
    about = "Inspect font documents: metrics, outlines, and geometry queries",
    long_about = "Fontglass reads a font document (the JSON form of the live object model) and answers the same geometry questions an editor would ask: bounding boxes, flattened outlines, and line intersections."
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print an overview of the document: names, upm, axes, masters,
    /// and glyph count
    Info {
        /// Path to a font document (.fontglass JSON)
        document: PathBuf,
    },
    /// Print a glyph's bounding box and sidebearings
    Bbox {
        /// Path to a font document (.fontglass JSON)
        document: PathBuf,
        /// Glyph name to measure
        glyph: String,
        /// Widen the box by anchor positions
        #[clap(long)]
        anchors: bool,
    },
    /// Print a glyph's flattened outline as JSON
    Paths {
        /// Path to a font document (.fontglass JSON)
        document: PathBuf,
        /// Glyph name to flatten
        glyph: String,
    },
    /// Print every crossing between a line segment and a glyph's outline
    Intersect {
        /// Path to a font document (.fontglass JSON)
        document: PathBuf,
        /// Glyph name to query
        glyph: String,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

/// Run the requested command against the document
pub fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Info { document } => {
            let font = open(&document)?;
            println!("{}", font.display_name());
            let (major, minor) = font.version();
            println!("version {}.{}  upm {}", major, minor, font.upm());
            for axis in font.axes() {
                println!(
                    "axis {} ({}) {:?}..{:?}..{:?}",
                    axis.tag(),
                    axis.name(),
                    axis.min(),
                    axis.default(),
                    axis.max()
                );
            }
            for master in font.masters() {
                println!("master {} ({})", master.id(), master.name());
            }
            println!("{} glyphs", font.glyph_count());
        }
        Command::Bbox {
            document,
            glyph,
            anchors,
        } => {
            let font = open(&document)?;
            let layer = first_layer(&font, &glyph)?;
            let bbox = layer.bounding_box(anchors);
            println!(
                "bbox ({}, {}) .. ({}, {})",
                bbox.min_x(),
                bbox.min_y(),
                bbox.max_x(),
                bbox.max_y()
            );
            println!(
                "width {}  lsb {}  rsb {}",
                layer.width(),
                layer.lsb(),
                layer.rsb()
            );
        }
        Command::Paths { document, glyph } => {
            let font = open(&document)?;
            let layer = first_layer(&font, &glyph)?;
            let paths = layer.flattened_paths();
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
        Command::Intersect {
            document,
            glyph,
            x1,
            y1,
            x2,
            y2,
        } => {
            let font = open(&document)?;
            let layer = first_layer(&font, &glyph)?;
            let hits = layer.intersections_on_line(Point::new(x1, y1), Point::new(x2, y2), true);
            for hit in &hits {
                println!("t {:.6}  ({}, {})", hit.t, hit.point.x, hit.point.y);
            }
            println!("{} crossings", hits.len());
        }
    }
    Ok(())
}

fn open(path: &PathBuf) -> Result<Font> {
    Font::open(path).with_context(|| format!("opening document {}", path.display()))
}

fn first_layer(font: &Font, glyph_name: &str) -> Result<crate::model::Layer> {
    let glyph = font
        .find_glyph(glyph_name)
        .with_context(|| format!("no glyph named {glyph_name:?} in the document"))?;
    glyph
        .layers()
        .into_iter()
        .next()
        .or_else(|| glyph.all_layers().into_iter().next())
        .with_context(|| format!("glyph {glyph_name:?} has no layers"))
}
