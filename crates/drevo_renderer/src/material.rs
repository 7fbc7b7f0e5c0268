//! Surface materials and how they scatter light.

use crate::error::{RenderError, Result};
use crate::hittable::HitRecord;
use crate::random::{gen_f32, random_in_unit_sphere, random_unit_vector};
use drevo_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the scattered light that survives, per channel
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// Closed set of surface materials.
///
/// Each variant wraps a struct with private fields so its invariants are
/// established by the constructor and cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Diffuse(Lambertian),
    Reflective(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Matte surface with the given albedo.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse(Lambertian::new(albedo))
    }

    /// Metallic surface. Roughness is clamped to [0, 1].
    pub fn reflective(albedo: Color, roughness: f32) -> Self {
        Material::Reflective(Metal::new(albedo, roughness))
    }

    /// Clear refractive medium such as glass (1.5) or diamond (2.4).
    pub fn dielectric(ior: f32) -> Result<Self> {
        Dielectric::new(ior).map(Material::Dielectric)
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Diffuse(m) => Some(m.scatter(rec, rng)),
            Material::Reflective(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    roughness: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `roughness`: 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, roughness: f32) -> Self {
        let roughness = if roughness.is_nan() { 0.0 } else { roughness.clamp(0.0, 1.0) };
        Self { albedo, roughness }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.roughness * random_in_unit_sphere(rng);

        // A direction below the surface means the ray is absorbed
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Result<Self> {
        if !(ior.is_finite() && ior > 0.0) {
            return Err(RenderError::InvalidMaterial(format!(
                "refractive index must be positive and finite, got {ior}"
            )));
        }
        Ok(Self { ior })
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let direction = ray_in.direction();
        let cos_incident = direction.dot(rec.normal) / direction.length();
        let exiting = cos_incident > 0.0;

        let (outward_normal, refraction_ratio) = if exiting {
            (-rec.normal, self.ior)
        } else {
            (rec.normal, 1.0 / self.ior)
        };

        let reflected = reflect(direction, rec.normal);
        let scattered_dir = match refract(direction, outward_normal, refraction_ratio) {
            Some(refracted) => {
                // Inside the medium Schlick wants the transmitted angle
                let cosine = if exiting {
                    (1.0 - self.ior * self.ior * (1.0 - cos_incident * cos_incident)).sqrt()
                } else {
                    -cos_incident
                };
                if gen_f32(rng) < schlick(cosine, self.ior) {
                    reflected
                } else {
                    refracted
                }
            }
            // Total internal reflection
            None => reflected,
        };

        ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, scattered_dir),
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Schlick's approximation for reflectance.
#[inline]
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with Snell's law.
///
/// `n` must face the side `v` arrives from. Returns `None` on total internal
/// reflection, i.e. when the refraction discriminant is not positive.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}
