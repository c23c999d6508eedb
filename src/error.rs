//! Error types for faceset.
//!
//! Corner-table queries never fail; these errors come from building scenes
//! and from reading and writing files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while loading, validating, or saving meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input holds no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references a vertex missing from the coordinate buffer.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: i32,
    },

    /// The mesh has faces that are not triangles.
    #[error("mesh is not a triangle mesh")]
    NotTriangleMesh,

    /// Normals are not bound the way the operation requires.
    #[error("expected {expected} normals, found {found}")]
    NormalBinding {
        /// The required binding.
        expected: &'static str,
        /// The binding found.
        found: String,
    },

    /// The scene graph does not have the expected layout.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A keyword other than the expected one was read.
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedToken {
        /// The keyword the parser required.
        expected: &'static str,
        /// The token actually read.
        found: String,
    },

    /// A token that should be a number is not one.
    #[error("invalid number `{token}`")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },

    /// The input ended in the middle of a record.
    #[error("unexpected end of input, expected `{expected}`")]
    UnexpectedEof {
        /// What the parser was waiting for.
        expected: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {source}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<MeshError>,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {source}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<MeshError>,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl MeshError {
    /// Attach the path of the file being loaded.
    pub fn loading<P: Into<PathBuf>>(self, path: P) -> Self {
        MeshError::LoadError {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Attach the path of the file being saved.
    pub fn saving<P: Into<PathBuf>>(self, path: P) -> Self {
        MeshError::SaveError {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
