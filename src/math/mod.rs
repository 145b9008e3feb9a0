pub mod plane_3d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default cosine tolerance for treating two face normals as parallel.
pub const NORMAL_TOLERANCE: f64 = 1e-5;

/// Default distance tolerance for treating a vertex as lying on a plane.
pub const DISTANCE_TOLERANCE: f64 = 1e-5;
