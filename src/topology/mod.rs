pub mod adjacency;

pub use adjacency::FaceAdjacency;

use slotmap::SlotMap;

use crate::error::{Result, TopologyError};
use crate::geometry::MeshBuffers;
use crate::region::partition::FacePartition;

slotmap::new_key_type! {
    /// Stable identifier for a mesh registered with the [`MeshRegistry`].
    pub struct MeshKey;
}

/// Per-mesh state owned by the registry.
#[derive(Debug)]
struct MeshRecord {
    face_count: u32,
    adjacency: FaceAdjacency,
    partition: FacePartition,
}

/// Central arena that owns the per-mesh adjacency caches and partitions.
///
/// Meshes are keyed by generational [`MeshKey`]s rather than by host engine
/// objects, decoupling the engine's state from the renderer's object
/// lifetimes. Registering a mesh builds its adjacency graph once (the
/// expensive `O(F)` step) and creates an empty partition; releasing the mesh
/// discards both.
///
/// Read accessors return `Option` so queries against an already-released
/// mesh degrade to "no result"; mutating accessors fail with an error
/// instead, since writes to a missing mesh indicate a stale key.
#[derive(Debug, Default)]
pub struct MeshRegistry {
    meshes: SlotMap<MeshKey, MeshRecord>,
}

impl MeshRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mesh, building and caching its face-adjacency graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the index buffer is malformed.
    pub fn register(&mut self, buffers: &MeshBuffers<'_>) -> Result<MeshKey> {
        let adjacency = FaceAdjacency::build(buffers.indices())?;
        let face_count = buffers.face_count();
        Ok(self.meshes.insert(MeshRecord {
            face_count,
            adjacency,
            partition: FacePartition::new(face_count),
        }))
    }

    /// Releases a mesh, discarding its adjacency cache and partition.
    ///
    /// Returns `false` if the key was already released.
    pub fn release(&mut self, key: MeshKey) -> bool {
        self.meshes.remove(key).is_some()
    }

    /// Whether the key refers to a registered mesh.
    #[must_use]
    pub fn contains(&self, key: MeshKey) -> bool {
        self.meshes.contains_key(key)
    }

    /// Number of registered meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// The registered face count of a mesh.
    #[must_use]
    pub fn face_count(&self, key: MeshKey) -> Option<u32> {
        self.meshes.get(key).map(|record| record.face_count)
    }

    /// The cached adjacency graph of a mesh.
    #[must_use]
    pub fn adjacency(&self, key: MeshKey) -> Option<&FaceAdjacency> {
        self.meshes.get(key).map(|record| &record.adjacency)
    }

    /// The face partition of a mesh.
    #[must_use]
    pub fn partition(&self, key: MeshKey) -> Option<&FacePartition> {
        self.meshes.get(key).map(|record| &record.partition)
    }

    /// Mutable access to the face partition of a mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is not registered.
    pub fn partition_mut(&mut self, key: MeshKey) -> Result<&mut FacePartition> {
        self.meshes
            .get_mut(key)
            .map(|record| &mut record.partition)
            .ok_or_else(|| TopologyError::MeshNotFound.into())
    }
}
