//! Sphere primitive for ray tracing.

use crate::error::{RenderError, Result};
use crate::hittable::HitRecord;
use crate::Material;
use drevo_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails for a non-positive or non-finite radius, or a non-finite center.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidGeometry(format!(
                "sphere radius must be positive and finite, got {radius}"
            )));
        }
        if !center.is_finite() {
            return Err(RenderError::InvalidGeometry(format!(
                "sphere center must be finite, got {center}"
            )));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Nearest intersection strictly inside `ray_t`, if any.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn unit_sphere_at(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::diffuse(Color::new(0.5, 0.5, 0.5))).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::forward(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::forward(0.001)).is_none());
    }

    #[test]
    fn test_tangent_ray_is_a_miss() {
        // Discriminant is exactly zero
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::forward(0.001)).is_none());
    }

    #[test]
    fn test_smaller_root_wins() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let rec = sphere.hit(&ray, Interval::forward(0.001)).unwrap();
        // Unnormalized direction: the near surface is at z = -4, t = 2
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_inside_sphere_uses_far_root() {
        let sphere = unit_sphere_at(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::forward(0.001)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-6);
        // Outward normal even though the ray comes from inside
        assert!((rec.normal - Vec3::X).length() < 1e-6);
        assert!(ray.direction().dot(rec.normal) > 0.0);
    }

    #[test]
    fn test_interval_is_exclusive() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Both roots (0.5 and 1.5) outside the range
        assert!(sphere.hit(&ray, Interval::new(0.6, 1.4)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.hit(&ray, Interval::new(0.6, 2.0)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_normal_is_unit_and_outward() {
        let center = Vec3::new(1.0, -2.0, -6.0);
        let sphere = unit_sphere_at(center, 2.5);
        let origin = Vec3::new(0.0, 0.0, 3.0);

        for dir in [
            center - origin,
            center - origin + Vec3::new(1.5, 0.0, 0.0),
            center - origin + Vec3::new(0.0, -1.0, 0.7),
        ] {
            let ray = Ray::new(origin, dir);
            let rec = sphere.hit(&ray, Interval::forward(0.001)).unwrap();
            assert!((rec.normal.length() - 1.0).abs() < 1e-4);
            assert!(rec.normal.dot(rec.p - center) > 0.0);
        }
    }

    #[test]
    fn test_rejects_degenerate_radius() {
        let mat = Material::diffuse(Color::ONE);
        assert!(Sphere::new(Vec3::ZERO, 0.0, mat).is_err());
        assert!(Sphere::new(Vec3::ZERO, -1.0, mat).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::INFINITY, mat).is_err());
        assert!(Sphere::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, mat).is_err());
    }
}
