use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::MeshBuffers;
use crate::math::{DISTANCE_TOLERANCE, NORMAL_TOLERANCE};
use crate::topology::FaceAdjacency;

/// Tolerances for the plane-coincidence predicate.
///
/// A candidate face counts as coplanar with the reference plane when its
/// normal is parallel within the cosine tolerance (`|dot| > 1 − normal`)
/// and its first vertex lies within `distance` of the plane.
#[derive(Debug, Clone, Copy)]
pub struct CoplanarParams {
    /// Cosine tolerance for the normal-parallelism test.
    pub normal_tolerance: f64,
    /// Signed-distance tolerance for the on-plane test.
    pub distance_tolerance: f64,
}

impl Default for CoplanarParams {
    fn default() -> Self {
        Self {
            normal_tolerance: NORMAL_TOLERANCE,
            distance_tolerance: DISTANCE_TOLERANCE,
        }
    }
}

/// Finds the connected, coplanar face region around a seed face.
///
/// Computes the reference plane from the seed face once, then breadth-first
/// searches the adjacency graph; a neighbor joins the region iff it passes
/// the coplanarity predicate against that original seed plane. Keeping the
/// seed plane fixed for the whole search stops the region from drifting
/// across nearly-but-not-quite coplanar curved surfaces, at the cost that a
/// distant accepted face may deviate more than a per-edge test would allow.
///
/// The result always contains the seed and is ordered by face id; no BFS
/// traversal order is exposed. Degenerate neighbor faces define no plane and
/// are skipped.
///
/// # Errors
///
/// Returns an error if `seed` is out of range, or if the seed face itself is
/// degenerate (zero area) and defines no reference plane.
pub fn find_coplanar_region(
    buffers: &MeshBuffers<'_>,
    adjacency: &FaceAdjacency,
    seed: u32,
    params: &CoplanarParams,
) -> Result<BTreeSet<u32>> {
    if seed >= buffers.face_count() {
        return Err(TopologyError::FaceOutOfRange {
            face: seed,
            face_count: buffers.face_count(),
        }
        .into());
    }

    let reference = buffers
        .face_plane(seed)?
        .ok_or(GeometryError::DegenerateFace { face: seed })?;

    let mut region: BTreeSet<u32> = BTreeSet::new();
    let mut visited: HashSet<u32> = HashSet::new();
    let mut queue: VecDeque<u32> = VecDeque::new();

    region.insert(seed);
    visited.insert(seed);
    queue.push_back(seed);

    while let Some(face) = queue.pop_front() {
        for &neighbor in adjacency.neighbors(face) {
            if !visited.insert(neighbor) {
                continue;
            }

            // Candidate plane carries the face normal and its first vertex.
            let Some(candidate) = buffers.face_plane(neighbor)? else {
                continue;
            };
            if !reference.normal_parallel(candidate.normal(), params.normal_tolerance) {
                continue;
            }
            if reference.signed_distance(candidate.origin()).abs() > params.distance_tolerance {
                continue;
            }

            region.insert(neighbor);
            queue.push_back(neighbor);
        }
    }

    Ok(region)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FacetisError;

    // 8 corners of a unit cube.
    const CUBE_POSITIONS: [f64; 24] = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, //
        1.0, 0.0, 1.0, //
        1.0, 1.0, 1.0, //
        0.0, 1.0, 1.0,
    ];

    // 12 triangles, 2 per cube face; faces {0,1} form the bottom.
    const CUBE_INDICES: [u32; 36] = [
        0, 2, 1, 0, 3, 2, // bottom
        4, 5, 6, 4, 6, 7, // top
        0, 1, 5, 0, 5, 4, // front
        2, 3, 7, 2, 7, 6, // back
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
    ];

    fn cube() -> (MeshBuffers<'static>, FaceAdjacency) {
        let buffers = MeshBuffers::new(&CUBE_POSITIONS, &CUBE_INDICES).unwrap();
        let adjacency = FaceAdjacency::build(&CUBE_INDICES).unwrap();
        (buffers, adjacency)
    }

    #[test]
    fn cube_face_region_is_its_two_triangles() {
        let (buffers, adjacency) = cube();
        // Adjacent cube faces meet at 90°, so the region must stop at the
        // bottom face's two triangles whichever one seeds it.
        for seed in [0, 1] {
            let region =
                find_coplanar_region(&buffers, &adjacency, seed, &CoplanarParams::default())
                    .unwrap();
            assert_eq!(region, BTreeSet::from([0, 1]), "seed {seed}");
        }
    }

    #[test]
    fn region_always_contains_the_seed() {
        let (buffers, adjacency) = cube();
        for seed in 0..buffers.face_count() {
            let region =
                find_coplanar_region(&buffers, &adjacency, seed, &CoplanarParams::default())
                    .unwrap();
            assert!(region.contains(&seed), "seed {seed}");
        }
    }

    #[test]
    fn flat_fan_is_one_region() {
        // Four coplanar triangles around a center vertex.
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            -1.0, 0.0, 0.0, //
            0.0, -1.0, 0.0,
        ];
        let indices = [0u32, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1];
        let buffers = MeshBuffers::new(&positions, &indices).unwrap();
        let adjacency = FaceAdjacency::build(&indices).unwrap();

        let region =
            find_coplanar_region(&buffers, &adjacency, 2, &CoplanarParams::default()).unwrap();
        assert_eq!(region, BTreeSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn connectivity_is_required_not_just_coplanarity() {
        // Two coplanar triangles that share no edge.
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            5.0, 0.0, 0.0, //
            6.0, 0.0, 0.0, //
            5.0, 1.0, 0.0,
        ];
        let indices = [0u32, 1, 2, 3, 4, 5];
        let buffers = MeshBuffers::new(&positions, &indices).unwrap();
        let adjacency = FaceAdjacency::build(&indices).unwrap();

        let region =
            find_coplanar_region(&buffers, &adjacency, 0, &CoplanarParams::default()).unwrap();
        assert_eq!(region, BTreeSet::from([0]));
    }

    #[test]
    fn loose_tolerance_crosses_a_shallow_bend() {
        // Second triangle tilted ~0.5° out of the first one's plane.
        let tilt = 0.01;
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, //
            -1.0, 0.0, tilt, //
            -1.0, 1.0, tilt,
        ];
        let indices = [0u32, 1, 2, 0, 2, 3, 0, 3, 5, 0, 5, 4];
        let buffers = MeshBuffers::new(&positions, &indices).unwrap();
        let adjacency = FaceAdjacency::build(&indices).unwrap();

        let strict =
            find_coplanar_region(&buffers, &adjacency, 0, &CoplanarParams::default()).unwrap();
        assert_eq!(strict, BTreeSet::from([0, 1]));

        let loose = CoplanarParams {
            normal_tolerance: 1e-3,
            distance_tolerance: 0.1,
        };
        let region = find_coplanar_region(&buffers, &adjacency, 0, &loose).unwrap();
        assert_eq!(region, BTreeSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn out_of_range_seed_fails() {
        let (buffers, adjacency) = cube();
        let result =
            find_coplanar_region(&buffers, &adjacency, 12, &CoplanarParams::default());
        assert!(matches!(
            result,
            Err(FacetisError::Topology(TopologyError::FaceOutOfRange {
                face: 12,
                face_count: 12,
            }))
        ));
    }

    #[test]
    fn degenerate_seed_fails() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let indices = [0u32, 1, 2];
        let buffers = MeshBuffers::new(&positions, &indices).unwrap();
        let adjacency = FaceAdjacency::build(&indices).unwrap();

        let result = find_coplanar_region(&buffers, &adjacency, 0, &CoplanarParams::default());
        assert!(matches!(
            result,
            Err(FacetisError::Geometry(GeometryError::DegenerateFace { face: 0 }))
        ));
    }

    #[test]
    fn degenerate_neighbor_is_skipped() {
        // A flat quad whose second triangle is collapsed onto an edge.
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.5, 0.5, 0.0, // on the diagonal of face 0
        ];
        let indices = [0u32, 1, 2, 0, 2, 3];
        let buffers = MeshBuffers::new(&positions, &indices).unwrap();
        let adjacency = FaceAdjacency::build(&indices).unwrap();

        // Face 1 is degenerate (vertex 3 lies on the 0-2 edge), so the
        // region is just the seed; no error is raised for the neighbor.
        let region =
            find_coplanar_region(&buffers, &adjacency, 0, &CoplanarParams::default()).unwrap();
        assert_eq!(region, BTreeSet::from([0]));
    }
}
