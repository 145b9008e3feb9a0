use thiserror::Error;

/// Top-level error type for the Facetis region engine.
#[derive(Debug, Error)]
pub enum FacetisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Region(#[from] RegionError),
}

/// Errors related to mesh buffer validation and planar computations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("index buffer length {len} is not a multiple of 3")]
    InvalidIndexBuffer { len: usize },

    #[error("position buffer length {len} is not a multiple of 3")]
    InvalidPositionBuffer { len: usize },

    #[error("index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: u32 },

    #[error("{attribute} buffer has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("face {face} is degenerate (zero-area triangle)")]
    DegenerateFace { face: u32 },
}

/// Errors related to face topology and the mesh registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("face {face} is out of range for {face_count} faces")]
    FaceOutOfRange { face: u32, face_count: u32 },

    #[error("mesh not found in registry")]
    MeshNotFound,
}

/// Errors related to region partitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("region '{label}' not found")]
    RegionNotFound { label: String },
}

/// Convenience type alias for results using [`FacetisError`].
pub type Result<T> = std::result::Result<T, FacetisError>;
