use std::collections::{BTreeSet, HashMap};

use crate::error::{RegionError, Result, TopologyError};

/// A maximal run of consecutive face ids, as `(start, count)`.
///
/// The bridge to persistent multi-region rendering: a renderer that can only
/// address contiguous index sub-ranges draws one sub-range per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRange {
    /// First face id of the run.
    pub start: u32,
    /// Number of consecutive faces in the run.
    pub count: u32,
}

#[derive(Debug, Clone, Default)]
struct RegionData {
    faces: BTreeSet<u32>,
    material: Option<usize>,
}

/// Durable partition of one mesh's faces into named regions.
///
/// Each face belongs to at most one region at a time: assigning a face to a
/// new region implicitly removes it from its prior one, and a region that
/// loses its last face is deleted. Region labels may additionally be bound to
/// an entry in the partition's deduplicated materials-in-use list, which is
/// what the persistent rendering path indexes into.
///
/// The partition lives exactly as long as its mesh: it is created when the
/// mesh is registered and discarded when the mesh is released. Batch
/// operations are atomic — an out-of-range face id fails the whole call with
/// no mutation.
#[derive(Debug, Clone, Default)]
pub struct FacePartition {
    face_count: u32,
    owner: HashMap<u32, String>,
    regions: HashMap<String, RegionData>,
    materials: Vec<String>,
}

impl FacePartition {
    /// Creates an empty partition for a mesh with `face_count` faces.
    #[must_use]
    pub fn new(face_count: u32) -> Self {
        Self {
            face_count,
            ..Self::default()
        }
    }

    /// Number of faces of the mesh this partition covers.
    #[must_use]
    pub fn face_count(&self) -> u32 {
        self.face_count
    }

    /// Number of regions currently present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Assigns faces to a region, creating the region if new.
    ///
    /// Every face is first removed from whatever region currently owns it.
    /// Re-assigning the same faces to the same label is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if any face id is out of range; the partition is left
    /// untouched in that case.
    pub fn assign<I>(&mut self, faces: I, label: &str) -> Result<()>
    where
        I: IntoIterator<Item = u32>,
    {
        let faces = self.validated(faces)?;

        for face in faces {
            match self.owner.get(&face) {
                Some(current) if current.as_str() == label => continue,
                Some(current) => {
                    let current = current.clone();
                    self.remove_from_region(face, &current);
                }
                None => {}
            }
            self.regions.entry(label.to_string()).or_default().faces.insert(face);
            self.owner.insert(face, label.to_string());
        }

        Ok(())
    }

    /// Removes faces from whatever region owns them, regardless of label.
    ///
    /// Faces not owned by any region are skipped. A region that loses its
    /// last face is deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if any face id is out of range; the partition is left
    /// untouched in that case.
    pub fn unassign<I>(&mut self, faces: I) -> Result<()>
    where
        I: IntoIterator<Item = u32>,
    {
        let faces = self.validated(faces)?;

        for face in faces {
            if let Some(label) = self.owner.remove(&face) {
                self.remove_from_region_only(face, &label);
            }
        }

        Ok(())
    }

    /// Removes all regions. The materials-in-use list is append-only and
    /// survives, so previously issued material indices stay valid.
    pub fn clear(&mut self) {
        self.owner.clear();
        self.regions.clear();
    }

    /// The region label owning a face, if any.
    #[must_use]
    pub fn region_of(&self, face: u32) -> Option<&str> {
        self.owner.get(&face).map(String::as_str)
    }

    /// The face ids owned by a region, ascending.
    #[must_use]
    pub fn faces_of(&self, label: &str) -> Option<&BTreeSet<u32>> {
        self.regions.get(label).map(|region| &region.faces)
    }

    /// Iterates over the labels of all current regions.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Maximal runs of consecutive face ids owned by a region, ascending.
    ///
    /// Recomputed on every call from the current face set; returns an empty
    /// list for an unknown label.
    #[must_use]
    pub fn contiguous_ranges(&self, label: &str) -> Vec<FaceRange> {
        let Some(region) = self.regions.get(label) else {
            return Vec::new();
        };

        let mut ranges: Vec<FaceRange> = Vec::new();
        for &face in &region.faces {
            match ranges.last_mut() {
                Some(run) if face == run.start + run.count => run.count += 1,
                _ => ranges.push(FaceRange { start: face, count: 1 }),
            }
        }
        ranges
    }

    /// Binds a region to a material, interning the material name into the
    /// deduplicated materials-in-use list, and returns the material's index.
    ///
    /// # Errors
    ///
    /// Returns an error if no region has the given label.
    pub fn bind_material(&mut self, label: &str, material: &str) -> Result<usize> {
        let index = match self.materials.iter().position(|m| m == material) {
            Some(index) => index,
            None => {
                self.materials.push(material.to_string());
                self.materials.len() - 1
            }
        };

        let region = self.regions.get_mut(label).ok_or_else(|| RegionError::RegionNotFound {
            label: label.to_string(),
        })?;
        region.material = Some(index);
        Ok(index)
    }

    /// The material index bound to a region, if any.
    #[must_use]
    pub fn material_of(&self, label: &str) -> Option<usize> {
        self.regions.get(label).and_then(|region| region.material)
    }

    /// The materials-in-use list, indexed by the values
    /// [`bind_material`](Self::bind_material) returns.
    #[must_use]
    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    /// Collects a batch and checks every id against the face count before any
    /// mutation, so failed calls leave the partition untouched.
    fn validated<I>(&self, faces: I) -> Result<Vec<u32>>
    where
        I: IntoIterator<Item = u32>,
    {
        let faces: Vec<u32> = faces.into_iter().collect();
        for &face in &faces {
            if face >= self.face_count {
                return Err(TopologyError::FaceOutOfRange {
                    face,
                    face_count: self.face_count,
                }
                .into());
            }
        }
        Ok(faces)
    }

    fn remove_from_region(&mut self, face: u32, label: &str) {
        self.owner.remove(&face);
        self.remove_from_region_only(face, label);
    }

    fn remove_from_region_only(&mut self, face: u32, label: &str) {
        if let Some(region) = self.regions.get_mut(label) {
            region.faces.remove(&face);
            if region.faces.is_empty() {
                self.regions.remove(label);
            }
        }
    }
}
