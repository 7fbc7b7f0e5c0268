//! Primitives and the HitRecord they produce for ray-object intersection.

use crate::error::Result;
use crate::{Material, Sphere};
use drevo_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Borrowed from the primitive that produced it, so it cannot outlive the
/// scene.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Closed set of geometric primitives a scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Primitive {
    /// Convenience constructor for a validated sphere primitive.
    pub fn sphere(center: Vec3, radius: f32, material: Material) -> Result<Self> {
        Sphere::new(center, radius, material).map(Primitive::Sphere)
    }

    /// Test if a ray hits this primitive strictly inside `ray_t`.
    #[inline]
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_primitive_dispatch() {
        let primitive =
            Primitive::sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Material::diffuse(Color::ONE)).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = primitive.hit(&ray, Interval::forward(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-6);
        assert!(ray.direction().dot(rec.normal) < 0.0);
        assert_eq!(*rec.material, Material::diffuse(Color::ONE));
    }

    #[test]
    fn test_primitive_rejects_degenerate_sphere() {
        assert!(Primitive::sphere(Vec3::ZERO, 0.0, Material::diffuse(Color::ONE)).is_err());
    }
}
