//! Corner table over a sentinel-delimited index stream.
//!
//! A polygon mesh is stored as one flat list of vertex indices. The corners of
//! each face are contiguous and every face is closed by [`TERMINATOR`]:
//!
//! ```text
//! [ 0, 1, 2, -1,  3, 4, 5, 6, -1 ]
//!   '-face 0-'    '--face 1---'
//! ```
//!
//! Faces and corners are never materialized. A face is identified by the
//! ordinal of its terminator and a corner by its position in the stream, and
//! every query is answered by scanning the stream.
//!
//! # Sentinel results
//!
//! Queries are total. Out-of-range or otherwise meaningless arguments yield
//! `0` for sizes and [`TERMINATOR`] (`-1`) for index-valued queries; nothing
//! panics and nothing returns an error.
//!
//! # Unterminated streams
//!
//! Corners after the last terminator are dangling: they belong to no face.
//! They are not counted by [`CornerTable::num_faces`], are not reachable
//! through any face ordinal, and [`CornerTable::corner_face`] and
//! [`CornerTable::next_corner`] report them as [`TERMINATOR`].

/// Marker closing a face in the index stream.
pub const TERMINATOR: i32 = -1;

/// Read-only topological queries over a flat, terminator-delimited index stream.
///
/// # Example
///
/// ```
/// use faceset::mesh::CornerTable;
///
/// let faces = CornerTable::new(6, &[0, 1, 2, -1, 3, 4, 5, -1]);
///
/// assert_eq!(faces.num_faces(), 2);
/// assert_eq!(faces.face_vertex(1, 1), 4);
/// assert_eq!(faces.corner_face(4), 1);
/// assert_eq!(faces.next_corner(2), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CornerTable {
    num_vertices: usize,
    coord_index: Vec<i32>,
}

impl CornerTable {
    /// Build a corner table from a vertex count and an index stream.
    ///
    /// The stream is copied. If it holds more non-negative entries than
    /// `num_vertices`, the vertex count is raised to that number; it is never
    /// lowered.
    pub fn new(num_vertices: usize, coord_index: &[i32]) -> Self {
        let referenced = coord_index.iter().filter(|&&i| i >= 0).count();
        if referenced > num_vertices {
            log::debug!(
                "vertex count {} raised to {} referenced corners",
                num_vertices,
                referenced
            );
        }
        if !is_closed(coord_index) {
            log::debug!(
                "index stream of length {} has dangling corners after its last terminator",
                coord_index.len()
            );
        }

        Self {
            num_vertices: num_vertices.max(referenced),
            coord_index: coord_index.to_vec(),
        }
    }

    /// The raw index stream, terminators included.
    pub fn coord_index(&self) -> &[i32] {
        &self.coord_index
    }

    /// Number of vertices, after reconciliation with the stream.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of faces, i.e. the number of terminators in the stream.
    pub fn num_faces(&self) -> usize {
        self.coord_index.iter().filter(|&&i| i == TERMINATOR).count()
    }

    /// Length of the stream. Terminators are counted too.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.coord_index.len()
    }

    /// Number of corners in `face`, or `0` if there is no such face.
    pub fn face_size(&self, face: i32) -> usize {
        self.face_run(face).map_or(0, <[i32]>::len)
    }

    /// Vertex index stored at the first corner of `face`.
    ///
    /// Returns [`TERMINATOR`] if the face does not exist or is empty.
    pub fn face_first_corner(&self, face: i32) -> i32 {
        self.face_run(face)
            .and_then(|run| run.first().copied())
            .unwrap_or(TERMINATOR)
    }

    /// Vertex index stored at local position `local` of `face`.
    ///
    /// Returns [`TERMINATOR`] if either argument is negative or no such corner
    /// exists.
    pub fn face_vertex(&self, face: i32, local: i32) -> i32 {
        let Ok(local) = usize::try_from(local) else {
            return TERMINATOR;
        };
        self.face_run(face)
            .and_then(|run| run.get(local).copied())
            .unwrap_or(TERMINATOR)
    }

    /// The vertex indices of `face`, or an empty slice if there is no such face.
    pub fn face_corners(&self, face: i32) -> &[i32] {
        self.face_run(face).unwrap_or(&[])
    }

    /// Ordinal of the face owning the corner at stream position `corner`.
    ///
    /// Returns [`TERMINATOR`] for positions outside the stream, positions
    /// holding a terminator, and dangling corners.
    pub fn corner_face(&self, corner: i32) -> i32 {
        self.corner_position(corner)
            .map(|c| {
                let face = self.coord_index[..c]
                    .iter()
                    .filter(|&&i| i == TERMINATOR)
                    .count();
                to_signed(face)
            })
            .unwrap_or(TERMINATOR)
    }

    /// Position of the corner following `corner` around its face.
    ///
    /// The last corner of a face wraps to the first one. Returns
    /// [`TERMINATOR`] wherever [`corner_face`](Self::corner_face) would.
    pub fn next_corner(&self, corner: i32) -> i32 {
        let Some(c) = self.corner_position(corner) else {
            return TERMINATOR;
        };

        // A closed corner is always followed by something, at worst its terminator.
        if self.coord_index[c + 1] != TERMINATOR {
            return to_signed(c + 1);
        }

        let start = self.coord_index[..c]
            .iter()
            .rposition(|&i| i == TERMINATOR)
            .map_or(0, |t| t + 1);
        to_signed(start)
    }

    /// Whether the stream is empty or ends with a terminator.
    pub fn is_terminated(&self) -> bool {
        is_closed(&self.coord_index)
    }

    /// Whether every corner belongs to a face and every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        if !self.is_terminated() {
            return false;
        }
        // split() yields one trailing empty run after the final terminator
        let mut runs = self.coord_index.split(|&i| i == TERMINATOR);
        runs.next_back();
        runs.all(|run| run.len() == 3)
    }

    /// The corner run closed by the `face`-th terminator.
    fn face_run(&self, face: i32) -> Option<&[i32]> {
        let face = usize::try_from(face).ok()?;
        let mut runs = self.coord_index.split(|&i| i == TERMINATOR);
        let run = runs.nth(face)?;
        // The last piece split() yields is never followed by a terminator.
        runs.next().map(|_| run)
    }

    /// Validates `corner` as the position of a corner that belongs to a face.
    fn corner_position(&self, corner: i32) -> Option<usize> {
        let c = usize::try_from(corner).ok()?;
        match self.coord_index.get(c) {
            Some(&TERMINATOR) | None => None,
            Some(_) if self.coord_index[c..].contains(&TERMINATOR) => Some(c),
            Some(_) => None,
        }
    }
}

fn is_closed(coord_index: &[i32]) -> bool {
    coord_index.last().map_or(true, |&i| i == TERMINATOR)
}

fn to_signed(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(TERMINATOR)
}
