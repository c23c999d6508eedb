//! STL (stereolithography) format support.
//!
//! Each STL facet becomes one triangle of an [`IndexedFaceSet`] with three
//! vertices of its own and a per-face normal:
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! ASCII files are parsed here; binary files are decoded and encoded with
//! `stl_io`. Saving only accepts scenes made of a single shape whose geometry
//! is a triangle mesh with per-face normals, and everything is validated and
//! encoded in memory before the output file is created.

use std::fs;
use std::io::{BufRead, Cursor, Read, Seek, Write};
use std::iter::Peekable;
use std::path::Path;
use std::str::SplitWhitespace;

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{IndexedFaceSet, NormalBinding, SceneGraph};

/// Binary STL header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL.
const TRIANGLE_SIZE: usize = 50;

/// UTF-8 byte order mark some editors put in front of text files.
const BOM: char = '\u{feff}';

/// Encoding used when saving an STL file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlEncoding {
    /// Human-readable `solid ... endsolid` text.
    #[default]
    Ascii,
    /// 80-byte header followed by packed little-endian records.
    Binary,
}

/// Load an STL file into a scene with a single face set.
///
/// ASCII and binary files are told apart from their leading bytes.
///
/// # Example
///
/// ```no_run
/// use faceset::io::stl;
///
/// let scene = stl::load("model.stl").unwrap();
/// let faces = scene.single_face_set().unwrap().faces();
/// println!("{} triangles", faces.num_faces());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneGraph> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| MeshError::from(e).loading(path))?;

    let face_set = if is_ascii(&bytes) {
        log::debug!("reading {} as ASCII STL", path.display());
        read_ascii(bytes.as_slice())
    } else {
        log::debug!("reading {} as binary STL", path.display());
        read_binary(&mut Cursor::new(&bytes))
    }
    .map_err(|e| e.loading(path))?;

    log::info!(
        "loaded {} triangles from {}",
        face_set.normal.len() / 3,
        path.display()
    );

    let mut scene = SceneGraph::from_face_set(face_set);
    scene.url = path.display().to_string();
    Ok(scene)
}

/// Save the single face set of `scene` to an STL file.
///
/// The solid is named after the face set, or after the file stem when the
/// face set has no name. Nothing is written if the scene is rejected.
///
/// # Example
///
/// ```no_run
/// use faceset::io::stl::{self, StlEncoding};
///
/// let scene = stl::load("model.stl").unwrap();
/// stl::save(&scene, "copy.stl", StlEncoding::Ascii).unwrap();
/// ```
pub fn save<P: AsRef<Path>>(scene: &SceneGraph, path: P, encoding: StlEncoding) -> Result<()> {
    let path = path.as_ref();

    let encoded = scene.single_face_set().and_then(|face_set| {
        let name = solid_name(face_set, path);
        let mut buffer = Vec::new();
        match encoding {
            StlEncoding::Ascii => write_ascii(face_set, &name, &mut buffer)?,
            StlEncoding::Binary => write_binary(face_set, &mut buffer)?,
        }
        Ok(buffer)
    });

    let buffer = match encoded {
        Ok(buffer) => buffer,
        Err(e) => {
            log::warn!("refusing to write {}: {}", path.display(), e);
            return Err(e.saving(path));
        }
    };

    fs::write(path, &buffer).map_err(|e| MeshError::from(e).saving(path))?;
    log::info!("wrote {} bytes to {}", buffer.len(), path.display());
    Ok(())
}

/// Parse ASCII STL text into a face set with per-face normals.
///
/// The solid name is every token between `solid` and the first `facet` or
/// `endsolid`, joined by single spaces. Parsing stops at the first token
/// after a facet that is not `facet`, so a trailing `endsolid` is optional.
/// At least one facet is required.
pub fn read_ascii<R: BufRead>(mut reader: R) -> Result<IndexedFaceSet> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut tokens = Tokenizer::new(text.trim_start_matches(BOM));
    tokens.expect("solid")?;

    let mut face_set = IndexedFaceSet::with_triangle_capacity(0);
    face_set.name = tokens.name();

    while tokens.peek_is("facet") {
        tokens.expect("facet")?;
        let (normal, vertices) = parse_facet(&mut tokens)?;
        face_set.push_triangle(normal, vertices);
    }

    if face_set.coord_index.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(face_set)
}

/// Parse the remainder of a facet after its `facet` keyword.
fn parse_facet(tokens: &mut Tokenizer<'_>) -> Result<(Vector3<f32>, [Point3<f32>; 3])> {
    tokens.expect("normal")?;
    let normal = Vector3::from(tokens.triple()?);

    tokens.expect("outer")?;
    tokens.expect("loop")?;

    let mut vertices = [Point3::origin(); 3];
    for vertex in &mut vertices {
        tokens.expect("vertex")?;
        *vertex = Point3::from(tokens.triple()?);
    }

    tokens.expect("endloop")?;
    tokens.expect("endfacet")?;

    Ok((normal, vertices))
}

/// Whitespace-delimited token stream with case-insensitive keywords.
struct Tokenizer<'a> {
    tokens: Peekable<SplitWhitespace<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace().peekable(),
        }
    }

    fn peek_is(&mut self, keyword: &str) -> bool {
        self.tokens
            .peek()
            .is_some_and(|token| token.eq_ignore_ascii_case(keyword))
    }

    /// Tokens up to the first `facet` or `endsolid`, joined by spaces.
    fn name(&mut self) -> String {
        let mut words = Vec::new();
        while !self.peek_is("facet") && !self.peek_is("endsolid") {
            match self.tokens.next() {
                Some(word) => words.push(word),
                None => break,
            }
        }
        words.join(" ")
    }

    fn expect(&mut self, keyword: &'static str) -> Result<()> {
        match self.tokens.next() {
            Some(token) if token.eq_ignore_ascii_case(keyword) => Ok(()),
            Some(token) => Err(MeshError::UnexpectedToken {
                expected: keyword,
                found: token.to_string(),
            }),
            None => Err(MeshError::UnexpectedEof { expected: keyword }),
        }
    }

    fn float(&mut self) -> Result<f32> {
        let token = self
            .tokens
            .next()
            .ok_or(MeshError::UnexpectedEof { expected: "number" })?;
        token.parse().map_err(|_| MeshError::InvalidNumber {
            token: token.to_string(),
        })
    }

    fn triple(&mut self) -> Result<[f32; 3]> {
        Ok([self.float()?, self.float()?, self.float()?])
    }
}

/// Decode a binary (or ASCII) STL stream with `stl_io`.
pub fn read_binary<R: Read + Seek>(reader: &mut R) -> Result<IndexedFaceSet> {
    let triangles = stl_io::create_stl_reader(reader)?;

    let mut face_set = IndexedFaceSet::with_triangle_capacity(triangles.size_hint().0);
    for triangle in triangles {
        let triangle = triangle?;
        let n = triangle.normal;
        let [v0, v1, v2] = triangle.vertices;
        face_set.push_triangle(
            Vector3::new(n[0], n[1], n[2]),
            [
                Point3::new(v0[0], v0[1], v0[2]),
                Point3::new(v1[0], v1[1], v1[2]),
                Point3::new(v2[0], v2[1], v2[2]),
            ],
        );
    }

    if face_set.coord_index.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(face_set)
}

/// Write `face_set` as ASCII STL.
///
/// The face set is validated before the first byte is written.
pub fn write_ascii<W: Write>(face_set: &IndexedFaceSet, name: &str, mut writer: W) -> Result<()> {
    let facets = facets(face_set)?;

    writeln!(writer, "solid {name}")?;
    for (normal, vertices) in &facets {
        writeln!(
            writer,
            "  facet normal {:.6e} {:.6e} {:.6e}",
            normal.x, normal.y, normal.z
        )?;
        writeln!(writer, "    outer loop")?;
        for v in vertices {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;

    Ok(())
}

/// Write `face_set` as binary STL.
///
/// The face set is validated before the first byte is written.
pub fn write_binary<W: Write>(face_set: &IndexedFaceSet, mut writer: W) -> Result<()> {
    let triangles: Vec<stl_io::Triangle> = facets(face_set)?
        .into_iter()
        .map(|(n, [p0, p1, p2])| stl_io::Triangle {
            normal: stl_io::Normal::new([n.x, n.y, n.z]),
            vertices: [
                stl_io::Vertex::new([p0.x, p0.y, p0.z]),
                stl_io::Vertex::new([p1.x, p1.y, p1.z]),
                stl_io::Vertex::new([p2.x, p2.y, p2.z]),
            ],
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter())?;
    Ok(())
}

/// Resolve every face into its normal and corner positions.
///
/// Fails unless the face set is a triangle mesh with a normal per face and
/// every corner resolves into the coordinate buffer.
fn facets(face_set: &IndexedFaceSet) -> Result<Vec<(Vector3<f32>, [Point3<f32>; 3])>> {
    let faces = face_set.faces();
    if !faces.is_triangle_mesh() {
        return Err(MeshError::NotTriangleMesh);
    }
    if faces.num_faces() == 0 {
        return Err(MeshError::EmptyMesh);
    }

    let binding = face_set.normal_binding();
    if binding != NormalBinding::PerFace {
        return Err(MeshError::NormalBinding {
            expected: "per-face",
            found: format!("{binding:?}"),
        });
    }

    let num_faces = faces.num_faces();
    if face_set.normal.len() < num_faces * 3 {
        return Err(MeshError::NormalBinding {
            expected: "per-face",
            found: format!("{} normals for {} faces", face_set.normal.len() / 3, num_faces),
        });
    }

    (0..num_faces)
        .map(|f| {
            let face = i32::try_from(f)
                .map_err(|_| MeshError::InvalidScene(format!("face {f} is not addressable")))?;
            let normal = face_set.face_normal(face).unwrap_or_else(Vector3::zeros);
            let mut vertices = [Point3::origin(); 3];
            for (local, slot) in (0..).zip(vertices.iter_mut()) {
                let vertex = faces.face_vertex(face, local);
                *slot = face_set
                    .vertex(vertex)
                    .ok_or(MeshError::InvalidVertexIndex { face: f, vertex })?;
            }
            Ok((normal, vertices))
        })
        .collect()
}

/// Solid name for `face_set`: its own name, or the stem of `path`.
fn solid_name(face_set: &IndexedFaceSet, path: &Path) -> String {
    if !face_set.name.is_empty() {
        return face_set.name.clone();
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether `bytes` look like ASCII STL rather than binary.
///
/// A leading byte order mark is skipped. Binary headers may also start with
/// `solid`, so a header containing NUL bytes or a length matching the binary
/// record count means binary.
fn is_ascii(bytes: &[u8]) -> bool {
    let header = &bytes[..bytes.len().min(HEADER_SIZE)];
    let starts_with_solid = String::from_utf8_lossy(header)
        .trim_start_matches(BOM)
        .trim_start()
        .get(..5)
        .is_some_and(|s| s.eq_ignore_ascii_case("solid"));
    if !starts_with_solid || header.contains(&0) {
        return false;
    }

    if bytes.len() >= HEADER_SIZE + 4 {
        let mut count = [0u8; 4];
        count.copy_from_slice(&bytes[HEADER_SIZE..HEADER_SIZE + 4]);
        let count = u32::from_le_bytes(count) as usize;
        if count > 0 && bytes.len() == HEADER_SIZE + 4 + count * TRIANGLE_SIZE {
            return false;
        }
    }
    true
}
