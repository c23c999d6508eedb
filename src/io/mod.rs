//! Mesh file I/O.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | STL | `.stl` | ✓ | ✓ | ASCII and binary |
//!
//! Files are loaded into a [`SceneGraph`] holding a single shape whose
//! geometry is an [`IndexedFaceSet`](crate::mesh::IndexedFaceSet).
//!
//! ```no_run
//! use faceset::io::{load, save, StlEncoding};
//!
//! let scene = load("model.stl").unwrap();
//! save(&scene, "output.stl", StlEncoding::Ascii).unwrap();
//! ```

pub mod stl;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::SceneGraph;

pub use stl::StlEncoding;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// STL (stereolithography) format.
    Stl,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a scene from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneGraph> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Stl => stl::load(path),
    }
}

/// Save a scene to a file with automatic format detection.
///
/// The format is determined by the file extension; `encoding` applies to
/// formats that have both text and binary variants.
pub fn save<P: AsRef<Path>>(scene: &SceneGraph, path: P, encoding: StlEncoding) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Stl => stl::save(scene, path, encoding),
    }
}
