//! Indexed face set: flat coordinate and normal buffers plus an index stream.
//!
//! This is the container the STL codec reads into and writes from. Topology
//! queries go through [`CornerTable`]; the face set only resolves vertex and
//! normal indices into its flat `f32` buffers (`index * 3`).

use nalgebra::{Point3, Vector3};

use super::corners::{CornerTable, TERMINATOR};

/// How the normals of an [`IndexedFaceSet`] are bound to the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalBinding {
    /// No normals are stored.
    None,
    /// One normal per vertex.
    PerVertex,
    /// One normal per face.
    PerFace,
}

/// A polygon mesh stored as flat buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedFaceSet {
    /// Object name, written as the STL solid name.
    pub name: String,
    /// Vertex coordinates, three per vertex.
    pub coord: Vec<f32>,
    /// Terminator-delimited vertex indices.
    pub coord_index: Vec<i32>,
    /// Normal components, three per normal.
    pub normal: Vec<f32>,
    /// Whether `normal` holds one entry per vertex instead of per face.
    pub normal_per_vertex: bool,
}

impl Default for IndexedFaceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexedFaceSet {
    /// Create an empty face set with per-vertex normal binding.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            coord: Vec::new(),
            coord_index: Vec::new(),
            normal: Vec::new(),
            normal_per_vertex: true,
        }
    }

    /// Create an empty face set with room for `num_triangles` triangles,
    /// bound for per-face normals.
    pub fn with_triangle_capacity(num_triangles: usize) -> Self {
        Self {
            name: String::new(),
            coord: Vec::with_capacity(num_triangles * 9),
            coord_index: Vec::with_capacity(num_triangles * 4),
            normal: Vec::with_capacity(num_triangles * 3),
            normal_per_vertex: false,
        }
    }

    /// Number of vertices in the coordinate buffer.
    pub fn num_vertices(&self) -> usize {
        self.coord.len() / 3
    }

    /// Build the corner table for this face set.
    pub fn faces(&self) -> CornerTable {
        CornerTable::new(self.num_vertices(), &self.coord_index)
    }

    /// Whether every face is a triangle and no corner dangles.
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces().is_triangle_mesh()
    }

    /// How the stored normals are bound.
    pub fn normal_binding(&self) -> NormalBinding {
        if self.normal.is_empty() {
            NormalBinding::None
        } else if self.normal_per_vertex {
            NormalBinding::PerVertex
        } else {
            NormalBinding::PerFace
        }
    }

    /// Position of vertex `index`, if the coordinate buffer holds it.
    pub fn vertex(&self, index: i32) -> Option<Point3<f32>> {
        triple(&self.coord, index).map(Point3::from)
    }

    /// Normal of `face`, if normals are bound per face and the buffer holds it.
    pub fn face_normal(&self, face: i32) -> Option<Vector3<f32>> {
        if self.normal_binding() != NormalBinding::PerFace {
            return None;
        }
        triple(&self.normal, face).map(Vector3::from)
    }

    /// Append a triangle with its own three vertices and a per-face normal.
    ///
    /// Vertices are not shared with earlier triangles, so the new face refers
    /// to indices `n, n + 1, n + 2` where `n` is the previous vertex count.
    pub fn push_triangle(&mut self, normal: Vector3<f32>, vertices: [Point3<f32>; 3]) {
        self.normal.extend_from_slice(normal.as_slice());
        for p in vertices {
            let index = i32::try_from(self.num_vertices()).unwrap_or(i32::MAX);
            self.coord_index.push(index);
            self.coord.extend_from_slice(&[p.x, p.y, p.z]);
        }
        self.coord_index.push(TERMINATOR);
    }
}

fn triple(buffer: &[f32], index: i32) -> Option<[f32; 3]> {
    let start = usize::try_from(index).ok()?.checked_mul(3)?;
    let xyz = buffer.get(start..start + 3)?;
    Some([xyz[0], xyz[1], xyz[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> IndexedFaceSet {
        let mut ifs = IndexedFaceSet::with_triangle_capacity(1);
        ifs.push_triangle(
            Vector3::new(0.0, 0.0, 1.0),
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        );
        ifs
    }

    #[test]
    fn test_push_triangle() {
        let mut ifs = single_triangle();
        ifs.push_triangle(
            Vector3::new(0.0, 0.0, -1.0),
            [
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.0, 1.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
            ],
        );

        assert_eq!(ifs.num_vertices(), 6);
        assert_eq!(ifs.coord_index, vec![0, 1, 2, -1, 3, 4, 5, -1]);
        assert_eq!(ifs.normal.len(), 6);
        assert!(ifs.is_triangle_mesh());
        assert_eq!(ifs.normal_binding(), NormalBinding::PerFace);

        let faces = ifs.faces();
        assert_eq!(faces.num_faces(), 2);
        assert_eq!(ifs.vertex(faces.face_vertex(1, 1)), Some(Point3::new(0.0, 1.0, 1.0)));
        assert_eq!(ifs.face_normal(1), Some(Vector3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_out_of_range_lookups() {
        let ifs = single_triangle();

        assert_eq!(ifs.vertex(-1), None);
        assert_eq!(ifs.vertex(3), None);
        assert_eq!(ifs.face_normal(1), None);
    }

    #[test]
    fn test_normal_binding() {
        let mut ifs = IndexedFaceSet::new();
        assert_eq!(ifs.normal_binding(), NormalBinding::None);

        ifs.normal = vec![0.0, 0.0, 1.0];
        assert_eq!(ifs.normal_binding(), NormalBinding::PerVertex);
        assert_eq!(ifs.face_normal(0), None);

        ifs.normal_per_vertex = false;
        assert_eq!(ifs.normal_binding(), NormalBinding::PerFace);
    }

    #[test]
    fn test_quad_is_not_triangle_mesh() {
        let mut ifs = IndexedFaceSet::new();
        ifs.coord = vec![0.0; 12];
        ifs.coord_index = vec![0, 1, 2, 3, -1];
        assert!(!ifs.is_triangle_mesh());
    }
}
