use crate::error::{GeometryError, Result, TopologyError};
use crate::math::plane_3d::Plane3;
use crate::math::{Point2, Point3, Vector3};

/// Read-only view over a mesh's flat vertex and index buffers.
///
/// Positions are `vertex count × 3` floats, indices are `face count × 3`
/// integers; face `f` owns indices `[3f, 3f + 1, 3f + 2]`. Normal and UV
/// buffers are optional per-vertex attributes. The view is borrowed per call
/// and never mutates the underlying buffers — buffer ownership stays with the
/// host geometry source.
#[derive(Debug, Clone, Copy)]
pub struct MeshBuffers<'a> {
    positions: &'a [f64],
    indices: &'a [u32],
    normals: Option<&'a [f64]>,
    uvs: Option<&'a [f64]>,
}

impl<'a> MeshBuffers<'a> {
    /// Creates a validated view over position and index buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if either buffer length is not a multiple of 3, or
    /// if any index addresses a vertex outside the position buffer.
    pub fn new(positions: &'a [f64], indices: &'a [u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::InvalidIndexBuffer { len: indices.len() }.into());
        }
        if positions.len() % 3 != 0 {
            return Err(GeometryError::InvalidPositionBuffer {
                len: positions.len(),
            }
            .into());
        }

        let vertex_count = u32::try_from(positions.len() / 3).unwrap_or(u32::MAX);
        for &index in indices {
            if index >= vertex_count {
                return Err(GeometryError::IndexOutOfBounds {
                    index,
                    vertex_count,
                }
                .into());
            }
        }

        Ok(Self {
            positions,
            indices,
            normals: None,
            uvs: None,
        })
    }

    /// Attaches a per-vertex normal buffer (3 floats per vertex).
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not match the position buffer.
    pub fn with_normals(mut self, normals: &'a [f64]) -> Result<Self> {
        if normals.len() != self.positions.len() {
            return Err(GeometryError::AttributeLengthMismatch {
                attribute: "normal",
                expected: self.positions.len(),
                actual: normals.len(),
            }
            .into());
        }
        self.normals = Some(normals);
        Ok(self)
    }

    /// Attaches a per-vertex UV buffer (2 floats per vertex).
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not match the vertex count.
    pub fn with_uvs(mut self, uvs: &'a [f64]) -> Result<Self> {
        let expected = self.positions.len() / 3 * 2;
        if uvs.len() != expected {
            return Err(GeometryError::AttributeLengthMismatch {
                attribute: "uv",
                expected,
                actual: uvs.len(),
            }
            .into());
        }
        self.uvs = Some(uvs);
        Ok(self)
    }

    /// Number of vertices in the position buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    /// Number of faces in the index buffer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn face_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// The raw index buffer.
    #[must_use]
    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    /// Whether a per-vertex normal buffer is attached.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Whether a per-vertex UV buffer is attached.
    #[must_use]
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// The three vertex indices of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of range.
    pub fn face(&self, face: u32) -> Result<[u32; 3]> {
        if face >= self.face_count() {
            return Err(TopologyError::FaceOutOfRange {
                face,
                face_count: self.face_count(),
            }
            .into());
        }
        let base = face as usize * 3;
        Ok([
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
        ])
    }

    /// The position of a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range; indices obtained through
    /// [`face`](Self::face) are always valid.
    #[must_use]
    pub fn position(&self, vertex: u32) -> Point3 {
        let base = vertex as usize * 3;
        Point3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    /// The normal of a vertex, when a normal buffer is attached.
    #[must_use]
    pub fn normal(&self, vertex: u32) -> Option<Vector3> {
        let normals = self.normals?;
        let base = vertex as usize * 3;
        Some(Vector3::new(
            normals[base],
            normals[base + 1],
            normals[base + 2],
        ))
    }

    /// The UV coordinates of a vertex, when a UV buffer is attached.
    #[must_use]
    pub fn uv(&self, vertex: u32) -> Option<Point2> {
        let uvs = self.uvs?;
        let base = vertex as usize * 2;
        Some(Point2::new(uvs[base], uvs[base + 1]))
    }

    /// The three corner positions of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of range.
    pub fn face_positions(&self, face: u32) -> Result<[Point3; 3]> {
        let [a, b, c] = self.face(face)?;
        Ok([self.position(a), self.position(b), self.position(c)])
    }

    /// The geometric plane of a face, from its three corner positions.
    ///
    /// Returns `Ok(None)` for a degenerate (zero-area) face, which defines
    /// no plane.
    ///
    /// # Errors
    ///
    /// Returns an error if `face` is out of range.
    pub fn face_plane(&self, face: u32) -> Result<Option<Plane3>> {
        let [a, b, c] = self.face_positions(face)?;
        Ok(Plane3::from_points(&a, &b, &c))
    }
}
