//! Whole-document read and write
//!
//! The document's native form is JSON. Format-specific importers and
//! exporters (UFO, Glyphs, binary fonts) live outside this crate; this
//! module only moves the document between disk and memory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{FontglassError, FontglassResult};
use crate::data::font_data::FontData;

/// Load a font document from a JSON file
pub fn load_document(path: &Path) -> FontglassResult<FontData> {
    let contents = fs::read_to_string(path).map_err(|source| FontglassError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document: FontData =
        serde_json::from_str(&contents).map_err(|source| FontglassError::DocumentParse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        glyphs = document.glyphs.len(),
        "loaded font document"
    );
    Ok(document)
}

/// Save a font document as pretty-printed JSON
pub fn save_document(document: &FontData, path: &Path) -> FontglassResult<()> {
    let contents = serde_json::to_string_pretty(document)?;
    fs::write(path, contents).map_err(|source| FontglassError::DocumentWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "saved font document");
    Ok(())
}
