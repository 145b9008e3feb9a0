use crate::error::{Result, TopologyError};
use crate::geometry::MeshBuffers;
use crate::region::{find_coplanar_region, CoplanarParams, FaceRange};
use crate::topology::{MeshKey, MeshRegistry};

/// Outcome of a material assignment: the durable region it produced and the
/// contiguous ranges a sub-range renderer draws it with.
#[derive(Debug, Clone)]
pub struct MaterialAssignment {
    /// Label of the region that now owns the coplanar face set.
    pub region: String,
    /// Index into the mesh partition's materials-in-use list.
    pub material_index: usize,
    /// Maximal contiguous face-id runs of the region, ascending.
    pub ranges: Vec<FaceRange>,
}

/// Assigns a material to the coplanar region around a picked face.
///
/// The persistent path: the face set becomes (or extends) a named region in
/// the mesh's partition, the material is interned into the materials-in-use
/// list, and the caller receives the contiguous ranges to hand to the
/// rendering sink.
pub struct AssignMaterial {
    mesh: MeshKey,
    seed: u32,
    material: String,
    region: Option<String>,
}

impl AssignMaterial {
    /// Creates a new `AssignMaterial` operation. The region label defaults
    /// to the material name.
    #[must_use]
    pub fn new(mesh: MeshKey, seed: u32, material: impl Into<String>) -> Self {
        Self {
            mesh,
            seed,
            material: material.into(),
            region: None,
        }
    }

    /// Overrides the region label the face set is assigned to.
    #[must_use]
    pub fn with_region_label(mut self, label: impl Into<String>) -> Self {
        self.region = Some(label.into());
        self
    }

    /// Executes the operation against the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is not registered, the seed face is out
    /// of range or degenerate, or the face set cannot be assigned.
    pub fn execute(
        &self,
        registry: &mut MeshRegistry,
        buffers: &MeshBuffers<'_>,
        params: &CoplanarParams,
    ) -> Result<MaterialAssignment> {
        let adjacency = registry
            .adjacency(self.mesh)
            .ok_or(TopologyError::MeshNotFound)?;
        let faces = find_coplanar_region(buffers, adjacency, self.seed, params)?;

        let label = self
            .region
            .clone()
            .unwrap_or_else(|| self.material.clone());

        let partition = registry.partition_mut(self.mesh)?;
        partition.assign(faces.iter().copied(), &label)?;
        let material_index = partition.bind_material(&label, &self.material)?;

        Ok(MaterialAssignment {
            ranges: partition.contiguous_ranges(&label),
            region: label,
            material_index,
        })
    }
}
