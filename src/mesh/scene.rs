//! Minimal scene graph wrapping face sets.
//!
//! Loaders produce a graph with a single [`Shape`] holding an
//! [`IndexedFaceSet`]; savers that only understand that layout check for it
//! with [`SceneGraph::single_face_set`].

use crate::error::{MeshError, Result};

use super::face_set::IndexedFaceSet;

/// Surface material with VRML default values.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Diffuse RGB color.
    pub diffuse_color: [f32; 3],
    /// Ambient intensity in `[0, 1]`.
    pub ambient_intensity: f32,
    /// Specular RGB color.
    pub specular_color: [f32; 3],
    /// Emissive RGB color.
    pub emissive_color: [f32; 3],
    /// Shininess in `[0, 1]`.
    pub shininess: f32,
    /// Transparency in `[0, 1]`.
    pub transparency: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: [0.8, 0.8, 0.8],
            ambient_intensity: 0.2,
            specular_color: [0.0, 0.0, 0.0],
            emissive_color: [0.0, 0.0, 0.0],
            shininess: 0.2,
            transparency: 0.0,
        }
    }
}

/// Appearance of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Appearance {
    /// Optional material.
    pub material: Option<Material>,
}

/// A bare point cloud, stored as flat coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    /// Point coordinates, three per point.
    pub coord: Vec<f32>,
}

/// Geometry attached to a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A polygon mesh.
    FaceSet(IndexedFaceSet),
    /// A point cloud.
    PointSet(PointSet),
}

impl Geometry {
    /// Node type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::FaceSet(_) => "IndexedFaceSet",
            Geometry::PointSet(_) => "PointSet",
        }
    }
}

/// A renderable shape: appearance plus geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    /// Optional appearance.
    pub appearance: Option<Appearance>,
    /// Optional geometry.
    pub geometry: Option<Geometry>,
}

impl Shape {
    /// A shape with default appearance and material around `face_set`.
    pub fn with_face_set(face_set: IndexedFaceSet) -> Self {
        Self {
            appearance: Some(Appearance {
                material: Some(Material::default()),
            }),
            geometry: Some(Geometry::FaceSet(face_set)),
        }
    }
}

/// A grouping node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Child nodes.
    pub children: Vec<Node>,
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A shape leaf.
    Shape(Shape),
    /// A group of nodes.
    Group(Group),
}

impl Node {
    /// Node type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Shape(_) => "Shape",
            Node::Group(_) => "Group",
        }
    }
}

/// Root of a scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    /// Where the scene was loaded from, if anywhere.
    pub url: String,
    children: Vec<Node>,
}

impl SceneGraph {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding one shape around `face_set`.
    pub fn from_face_set(face_set: IndexedFaceSet) -> Self {
        let mut scene = Self::new();
        scene.add_child(Node::Shape(Shape::with_face_set(face_set)));
        scene
    }

    /// Remove all children and the url.
    pub fn clear(&mut self) {
        self.url.clear();
        self.children.clear();
    }

    /// Append a top-level node.
    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Top-level nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The face set of a scene made of exactly one shape with face set geometry.
    pub fn single_face_set(&self) -> Result<&IndexedFaceSet> {
        let [node] = self.children.as_slice() else {
            return Err(MeshError::InvalidScene(format!(
                "expected a single child, found {}",
                self.children.len()
            )));
        };
        let Node::Shape(shape) = node else {
            return Err(MeshError::InvalidScene(format!(
                "expected a Shape child, found {}",
                node.type_name()
            )));
        };
        match &shape.geometry {
            Some(Geometry::FaceSet(ifs)) => Ok(ifs),
            Some(other) => Err(MeshError::InvalidScene(format!(
                "expected IndexedFaceSet geometry, found {}",
                other.type_name()
            ))),
            None => Err(MeshError::InvalidScene("shape has no geometry".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_face_set() {
        let mut ifs = IndexedFaceSet::new();
        ifs.name = "part".to_string();
        let scene = SceneGraph::from_face_set(ifs);

        assert_eq!(scene.children().len(), 1);
        assert_eq!(scene.single_face_set().unwrap().name, "part");
    }

    #[test]
    fn test_rejects_other_layouts() {
        let empty = SceneGraph::new();
        assert!(matches!(empty.single_face_set(), Err(MeshError::InvalidScene(_))));

        let mut two = SceneGraph::from_face_set(IndexedFaceSet::new());
        two.add_child(Node::Shape(Shape::default()));
        assert!(two.single_face_set().is_err());

        let mut group = SceneGraph::new();
        group.add_child(Node::Group(Group::default()));
        assert!(group.single_face_set().is_err());

        let mut bare = SceneGraph::new();
        bare.add_child(Node::Shape(Shape::default()));
        assert!(bare.single_face_set().is_err());

        let mut points = SceneGraph::new();
        points.add_child(Node::Shape(Shape {
            appearance: None,
            geometry: Some(Geometry::PointSet(PointSet::default())),
        }));
        assert!(points.single_face_set().is_err());
    }

    #[test]
    fn test_clear() {
        let mut scene = SceneGraph::from_face_set(IndexedFaceSet::new());
        scene.url = "model.stl".to_string();
        scene.clear();

        assert!(scene.url.is_empty());
        assert!(scene.children().is_empty());
    }
}
