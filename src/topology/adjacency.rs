use std::collections::HashMap;

use crate::error::{GeometryError, Result};

/// An undirected edge between two vertices, canonicalized smaller index first
/// so both windings of a shared edge map to the same key.
type EdgeKey = (u32, u32);

fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Face-adjacency graph of a triangle mesh, built from shared edges.
///
/// Two faces are adjacent when they share an edge. In a closed manifold mesh
/// every edge is shared by exactly two faces and each face has at most three
/// neighbors; boundary edges (one face) contribute no adjacency, and
/// non-manifold edges (more than two faces) link every face sharing the edge
/// pairwise rather than being rejected.
///
/// Building is `O(F)`; the graph is a pure function of the index buffer and
/// is cached per mesh by the [`MeshRegistry`](crate::topology::MeshRegistry).
#[derive(Debug, Clone, Default)]
pub struct FaceAdjacency {
    neighbors: Vec<Vec<u32>>,
}

impl FaceAdjacency {
    /// Builds the adjacency graph from a flat triangle index buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the index count is not a multiple of 3.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(indices: &[u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(GeometryError::InvalidIndexBuffer { len: indices.len() }.into());
        }

        let face_count = indices.len() / 3;
        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); face_count];
        let mut edge_faces: HashMap<EdgeKey, Vec<u32>> = HashMap::new();

        for face in 0..face_count as u32 {
            let base = face as usize * 3;
            let edges = [
                edge_key(indices[base], indices[base + 1]),
                edge_key(indices[base + 1], indices[base + 2]),
                edge_key(indices[base + 2], indices[base]),
            ];

            for edge in edges {
                let owners = edge_faces.entry(edge).or_default();
                for &owner in owners.iter() {
                    // Two triangles can share more than one edge; link them once.
                    if owner != face && !neighbors[face as usize].contains(&owner) {
                        neighbors[face as usize].push(owner);
                        neighbors[owner as usize].push(face);
                    }
                }
                owners.push(face);
            }
        }

        Ok(Self { neighbors })
    }

    /// Number of faces in the graph.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn face_count(&self) -> u32 {
        self.neighbors.len() as u32
    }

    /// The faces sharing an edge with `face`, in discovery order.
    ///
    /// Returns an empty slice for an out-of-range face.
    #[must_use]
    pub fn neighbors(&self, face: u32) -> &[u32] {
        self.neighbors
            .get(face as usize)
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FacetisError;

    // 12 triangles over the 8 corners of a unit cube, 2 per cube face.
    const CUBE_INDICES: [u32; 36] = [
        0, 2, 1, 0, 3, 2, // bottom
        4, 5, 6, 4, 6, 7, // top
        0, 1, 5, 0, 5, 4, // front
        2, 3, 7, 2, 7, 6, // back
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
    ];

    #[test]
    fn adjacency_is_symmetric() {
        let adjacency = FaceAdjacency::build(&CUBE_INDICES).unwrap();
        for face in 0..adjacency.face_count() {
            for &neighbor in adjacency.neighbors(face) {
                assert!(
                    adjacency.neighbors(neighbor).contains(&face),
                    "face {face} lists {neighbor} but not vice versa"
                );
            }
        }
    }

    #[test]
    fn closed_manifold_faces_have_three_neighbors() {
        let adjacency = FaceAdjacency::build(&CUBE_INDICES).unwrap();
        assert_eq!(adjacency.face_count(), 12);
        for face in 0..12 {
            assert_eq!(adjacency.neighbors(face).len(), 3, "face {face}");
        }
    }

    #[test]
    fn boundary_edges_contribute_no_adjacency() {
        // Open strip of two triangles: only the shared diagonal links them.
        let indices = [0u32, 1, 2, 0, 2, 3];
        let adjacency = FaceAdjacency::build(&indices).unwrap();
        assert_eq!(adjacency.neighbors(0), &[1]);
        assert_eq!(adjacency.neighbors(1), &[0]);
    }

    #[test]
    fn isolated_triangle_has_no_neighbors() {
        let indices = [0u32, 1, 2];
        let adjacency = FaceAdjacency::build(&indices).unwrap();
        assert!(adjacency.neighbors(0).is_empty());
    }

    #[test]
    fn non_manifold_fan_links_all_faces() {
        // Three triangles sharing the edge (0, 1).
        let indices = [0u32, 1, 2, 0, 1, 3, 0, 1, 4];
        let adjacency = FaceAdjacency::build(&indices).unwrap();
        for face in 0..3 {
            assert_eq!(adjacency.neighbors(face).len(), 2, "face {face}");
        }
    }

    #[test]
    fn truncated_index_buffer_is_rejected() {
        let indices = [0u32, 1, 2, 3];
        assert!(matches!(
            FaceAdjacency::build(&indices),
            Err(FacetisError::Geometry(GeometryError::InvalidIndexBuffer { len: 4 }))
        ));
    }

    #[test]
    fn out_of_range_face_has_no_neighbors() {
        let adjacency = FaceAdjacency::build(&CUBE_INDICES).unwrap();
        assert!(adjacency.neighbors(99).is_empty());
    }
}
