//! # Faceset
//!
//! Topological queries over polygon meshes stored as a flat index stream, and
//! conversion between that representation and STL.
//!
//! A face is a run of vertex indices closed by a `-1` terminator. The
//! [`CornerTable`](mesh::CornerTable) answers face sizes, face/corner
//! adjacency and cyclic corner traversal by scanning the stream, without
//! building per-face records.
//!
//! ## Features
//!
//! - **Corner table**: total queries that answer `0`/`-1` instead of failing
//! - **Indexed face sets**: flat coordinate and normal buffers beside the stream
//! - **STL**: ASCII reader and writer, binary support through `stl_io`
//!
//! ## Quick Start
//!
//! ```
//! use faceset::prelude::*;
//!
//! let faces = CornerTable::new(6, &[0, 1, 2, -1, 3, 4, 5, -1]);
//!
//! assert_eq!(faces.num_faces(), 2);
//! assert_eq!(faces.face_size(0), 3);
//! assert_eq!(faces.face_vertex(1, 1), 4);
//! assert_eq!(faces.corner_face(4), 1);
//!
//! // walking a face wraps around to its first corner
//! assert_eq!(faces.next_corner(2), 0);
//! ```
//!
//! ## Loading and Saving
//!
//! ```no_run
//! use faceset::prelude::*;
//!
//! let scene = faceset::io::load("model.stl").unwrap();
//! let face_set = scene.single_face_set().unwrap();
//! let faces = face_set.faces();
//!
//! for f in 0..faces.num_faces() as i32 {
//!     let first = face_set.vertex(faces.face_first_corner(f));
//!     println!("face {}: first vertex {:?}", f, first);
//! }
//!
//! faceset::io::save(&scene, "copy.stl", StlEncoding::Binary).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use faceset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::io::StlEncoding;
    pub use crate::mesh::{
        CornerTable, Geometry, IndexedFaceSet, Node, NormalBinding, SceneGraph, Shape, TERMINATOR,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
