use crate::error::{Result, TopologyError};
use crate::extraction::{extract_sub_geometry, SubGeometry};
use crate::geometry::MeshBuffers;
use crate::region::{find_coplanar_region, CoplanarParams};
use crate::topology::{MeshKey, MeshRegistry};

/// Tracks the hover-highlight visual across pointer moves.
///
/// Holds at most one highlight geometry at a time. Moving to a new
/// `(mesh, face)` target drops the previous geometry and builds the next;
/// re-reporting the current target returns the existing geometry without
/// rebuilding, so a pointer resting on a face costs nothing per event.
#[derive(Debug, Default)]
pub struct HoverHighlight {
    target: Option<(MeshKey, u32)>,
    geometry: Option<SubGeometry>,
}

impl HoverHighlight {
    /// Creates a tracker with no active highlight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The `(mesh, seed face)` pair currently highlighted, if any.
    #[must_use]
    pub fn target(&self) -> Option<(MeshKey, u32)> {
        self.target
    }

    /// The current highlight geometry, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&SubGeometry> {
        self.geometry.as_ref()
    }

    /// Reports a hover target, rebuilding the highlight when it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is not registered or the seed face is
    /// out of range or degenerate; the previous highlight is dropped either
    /// way, so a failed pick never leaves a stale visual behind.
    pub fn update(
        &mut self,
        registry: &MeshRegistry,
        buffers: &MeshBuffers<'_>,
        mesh: MeshKey,
        seed: u32,
        params: &CoplanarParams,
    ) -> Result<Option<&SubGeometry>> {
        if self.target == Some((mesh, seed)) {
            return Ok(self.geometry.as_ref());
        }

        self.clear();

        let adjacency = registry
            .adjacency(mesh)
            .ok_or(TopologyError::MeshNotFound)?;
        let faces = find_coplanar_region(buffers, adjacency, seed, params)?;
        self.geometry = Some(extract_sub_geometry(buffers, faces)?);
        self.target = Some((mesh, seed));

        Ok(self.geometry.as_ref())
    }

    /// Drops the current highlight, if any.
    pub fn clear(&mut self) {
        self.target = None;
        self.geometry = None;
    }
}
