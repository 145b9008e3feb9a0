use crate::error::{Result, TopologyError};
use crate::extraction::{extract_sub_geometry, SubGeometry};
use crate::geometry::MeshBuffers;
use crate::region::{find_coplanar_region, CoplanarParams};
use crate::topology::{MeshKey, MeshRegistry};

/// Builds a disposable selection visual for the coplanar region around a
/// clicked face.
///
/// The transient path: nothing is recorded in the partition; the caller owns
/// the returned [`SubGeometry`] and disposes it when the selection changes.
pub struct SelectRegion {
    mesh: MeshKey,
    seed: u32,
}

impl SelectRegion {
    /// Creates a new `SelectRegion` operation.
    #[must_use]
    pub fn new(mesh: MeshKey, seed: u32) -> Self {
        Self { mesh, seed }
    }

    /// Executes the operation against the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is not registered or the seed face is
    /// out of range or degenerate.
    pub fn execute(
        &self,
        registry: &MeshRegistry,
        buffers: &MeshBuffers<'_>,
        params: &CoplanarParams,
    ) -> Result<SubGeometry> {
        let adjacency = registry
            .adjacency(self.mesh)
            .ok_or(TopologyError::MeshNotFound)?;
        let faces = find_coplanar_region(buffers, adjacency, self.seed, params)?;
        extract_sub_geometry(buffers, faces)
    }
}
