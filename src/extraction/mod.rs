use std::collections::{BTreeSet, HashMap};

use crate::error::Result;
use crate::geometry::MeshBuffers;
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// A self-contained triangle mesh extracted from a subset of a source mesh's
/// faces.
///
/// Positions, normals and UVs are deduplicated copies; indices are local to
/// this geometry. Nothing borrows from the source mesh, so the geometry can
/// outlive it or be disposed independently — the transient highlight path
/// builds one of these per hover target and drops it on every target change.
#[derive(Debug, Clone, Default)]
pub struct SubGeometry {
    /// Deduplicated vertex positions.
    pub positions: Vec<Point3>,
    /// Per-vertex normals: carried over from the source when present,
    /// otherwise computed from the extracted faces.
    pub normals: Vec<Vector3>,
    /// Per-vertex UVs; empty when the source mesh has no UV buffer.
    pub uvs: Vec<Point2>,
    /// Triangles as triples of local vertex indices.
    pub indices: Vec<[u32; 3]>,
}

impl SubGeometry {
    /// Number of deduplicated vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.indices.len()
    }

    /// Whether the geometry holds no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Extracts a minimal self-contained sub-geometry for a set of faces.
///
/// Vertices are deduplicated by original-vertex-index identity, not by
/// position: two source vertices at the same position but different indices
/// stay distinct, matching how the source mesh addresses them. When the
/// source has no normal buffer, fallback normals are computed by
/// accumulating the area-weighted face normals incident to each extracted
/// vertex and normalizing.
///
/// An empty face set yields an empty geometry.
///
/// # Errors
///
/// Returns an error if any face id is out of range.
pub fn extract_sub_geometry<I>(buffers: &MeshBuffers<'_>, faces: I) -> Result<SubGeometry>
where
    I: IntoIterator<Item = u32>,
{
    // Deterministic output: process faces in ascending id order.
    let faces: BTreeSet<u32> = faces.into_iter().collect();

    let mut geometry = SubGeometry::default();
    let mut remap: HashMap<u32, u32> = HashMap::new();

    for &face in &faces {
        let corners = buffers.face(face)?;
        let mut local = [0u32; 3];

        for (slot, &vertex) in local.iter_mut().zip(&corners) {
            *slot = match remap.get(&vertex).copied() {
                Some(index) => index,
                None => {
                    #[allow(clippy::cast_possible_truncation)]
                    let index = geometry.positions.len() as u32;
                    remap.insert(vertex, index);
                    geometry.positions.push(buffers.position(vertex));
                    if let Some(normal) = buffers.normal(vertex) {
                        geometry.normals.push(normal);
                    }
                    if let Some(uv) = buffers.uv(vertex) {
                        geometry.uvs.push(uv);
                    }
                    index
                }
            };
        }

        geometry.indices.push(local);
    }

    if !buffers.has_normals() {
        geometry.normals = fallback_normals(&geometry);
    }

    Ok(geometry)
}

/// Accumulates the unnormalized (area-weighted) face normals incident to
/// each vertex, then normalizes. Vertices touched only by degenerate faces
/// keep a zero normal.
fn fallback_normals(geometry: &SubGeometry) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); geometry.positions.len()];

    for &[a, b, c] in &geometry.indices {
        let pa = geometry.positions[a as usize];
        let pb = geometry.positions[b as usize];
        let pc = geometry.positions[c as usize];
        let face_normal = (pb - pa).cross(&(pc - pa));
        normals[a as usize] += face_normal;
        normals[b as usize] += face_normal;
        normals[c as usize] += face_normal;
    }

    for normal in &mut normals {
        let len = normal.norm();
        if len > TOLERANCE {
            *normal /= len;
        }
    }

    normals
}
