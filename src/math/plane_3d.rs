use super::{Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space, defined by an origin point and a unit normal.
///
/// Used as the reference plane for coplanar-region searches: the plane of the
/// seed triangle, against which every candidate face is tested.
#[derive(Debug, Clone, Copy)]
pub struct Plane3 {
    origin: Point3,
    normal: Vector3,
}

impl Plane3 {
    /// Builds the plane spanned by three points, with normal `(b-a) × (c-a)`.
    ///
    /// Returns `None` when the points are collinear or coincident (zero-area
    /// triangle), in which case no plane is defined.
    #[must_use]
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let len = normal.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(Self {
            origin: *a,
            normal: normal / len,
        })
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from a point to the plane.
    /// Positive = on the normal side, negative = opposite.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Whether another unit normal is parallel to this plane's normal,
    /// ignoring orientation, within the given cosine tolerance.
    #[must_use]
    pub fn normal_parallel(&self, other: &Vector3, tolerance: f64) -> bool {
        self.normal.dot(other).abs() > 1.0 - tolerance
    }
}
