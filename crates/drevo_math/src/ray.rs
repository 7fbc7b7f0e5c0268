use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays are immutable value types. The direction is not required to be
/// normalized; code that needs a unit direction normalizes on demand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray without validation.
    ///
    /// The direction must be finite and non-zero. Use [`Ray::try_new`] for
    /// input that has not already been checked.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction.length_squared() > 0.0, "zero-length ray direction");
        Self { origin, direction }
    }

    /// Create a new ray, or `None` for a zero-length or non-finite direction
    /// or a non-finite origin.
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let valid = origin.is_finite()
            && direction.is_finite()
            && direction.length_squared() > 0.0;
        valid.then_some(Self { origin, direction })
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
