//! The scene: an owned list of primitives with a closest-hit query.

use crate::hittable::{HitRecord, Primitive};
use drevo_math::{Interval, Ray};

/// A collection of primitives.
///
/// Intersection is a linear scan. The scene is built once and then only read,
/// so it can be shared by reference across render workers.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Builder-style variant of [`Scene::add`].
    pub fn with(mut self, primitive: impl Into<Primitive>) -> Self {
        self.add(primitive);
        self
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Closest hit among all primitives strictly inside `ray_t`.
    ///
    /// Each test is bounded by the nearest hit found so far, so a surface
    /// behind a nearer one is never returned.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for primitive in &self.primitives {
            let interval = closest.map_or(ray_t, |rec| ray_t.with_max(rec.t));
            if let Some(rec) = primitive.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, Sphere};
    use drevo_math::Vec3;

    fn sphere(z: f32, albedo: Color) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, Material::diffuse(albedo)).unwrap()
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.is_empty());
        assert!(scene.hit(&ray, Interval::forward(0.001)).is_none());
    }

    #[test]
    fn test_closest_hit_wins_regardless_of_order() {
        let near = Color::new(1.0, 0.0, 0.0);
        let far = Color::new(0.0, 0.0, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let front_first = Scene::new().with(sphere(-2.0, near)).with(sphere(-5.0, far));
        let back_first = Scene::new().with(sphere(-5.0, far)).with(sphere(-2.0, near));

        for scene in [front_first, back_first] {
            let rec = scene.hit(&ray, Interval::forward(0.001)).unwrap();
            assert!((rec.t - 1.5).abs() < 1e-5);
            assert_eq!(*rec.material, Material::diffuse(near));
        }
    }

    #[test]
    fn test_hit_respects_upper_bound() {
        let scene = Scene::new().with(sphere(-5.0, Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.hit(&ray, Interval::new(0.001, 4.0)).is_none());
        assert!(scene.hit(&ray, Interval::new(0.001, 4.6)).is_some());
    }

    #[test]
    fn test_collect_into_scene() {
        let scene: Scene = (0..3)
            .map(|i| Primitive::Sphere(sphere(-(i as f32) - 1.0, Color::ONE)))
            .collect();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.primitives().len(), 3);
    }
}
