//! Core mesh data structures.
//!
//! # Overview
//!
//! The primary type is [`CornerTable`], which answers topological queries over
//! a flat index stream where each face is a run of vertex indices closed by
//! [`TERMINATOR`]. No per-face records are built; faces and corners are
//! identified by their position in the stream.
//!
//! Geometry lives beside the topology in an [`IndexedFaceSet`], which owns the
//! flat coordinate and normal buffers, and face sets are placed in a
//! [`SceneGraph`] for file I/O.
//!
//! ```
//! use faceset::mesh::CornerTable;
//!
//! // a triangle and a quad
//! let faces = CornerTable::new(5, &[0, 1, 2, -1, 2, 1, 3, 4, -1]);
//!
//! assert_eq!(faces.num_faces(), 2);
//! assert_eq!(faces.face_size(1), 4);
//! assert_eq!(faces.face_first_corner(1), 2);
//! ```

mod corners;
mod face_set;
mod scene;

pub use corners::{CornerTable, TERMINATOR};
pub use face_set::{IndexedFaceSet, NormalBinding};
pub use scene::{Appearance, Geometry, Group, Material, Node, PointSet, SceneGraph, Shape};
