//! Camera for ray generation.

use crate::error::{RenderError, Result};
use crate::random::random_in_unit_disk;
use drevo_math::{Ray, Vec3};
use rand::RngCore;

/// Camera placement and lens settings, validated into a [`Camera`] by
/// [`CameraSettings::build`].
#[derive(Debug, Clone)]
pub struct CameraSettings {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32, // Image width / height
    aperture: f32,     // Lens diameter, 0 for a pinhole
    focus_dist: f32,   // Distance from camera to plane of perfect focus
}

impl CameraSettings {
    /// Create camera settings with default values: a pinhole at the origin
    /// looking down -Z with a 90 degree field of view.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the aspect ratio from an image resolution.
    pub fn with_resolution(self, width: u32, height: u32) -> Self {
        self.with_aspect_ratio(width as f32 / height as f32)
    }

    /// Validate the settings and compute the camera's viewport.
    pub fn build(&self) -> Result<Camera> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidCamera(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidCamera(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(RenderError::InvalidCamera(format!(
                "focus distance must be positive, got {}",
                self.focus_dist
            )));
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return Err(RenderError::InvalidCamera(format!(
                "aperture must be non-negative, got {}",
                self.aperture
            )));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() < 1e-12 {
            return Err(RenderError::InvalidCamera(
                "look_from and look_at must differ".to_string(),
            ));
        }

        // Calculate camera basis vectors
        let w = view.normalize();
        let side = self.vup.cross(w);
        if side.length_squared() < 1e-12 {
            return Err(RenderError::InvalidCamera(
                "up vector must not be parallel to the view direction".to_string(),
            ));
        }
        let u = side.normalize();
        let v = w.cross(u);

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        let origin = self.look_from;
        let lower_left = origin
            - half_width * self.focus_dist * u
            - half_height * self.focus_dist * v
            - self.focus_dist * w;

        Ok(Camera {
            origin,
            lower_left,
            horizontal: 2.0 * half_width * self.focus_dist * u,
            vertical: 2.0 * half_height * self.focus_dist * v,
            u,
            v,
            lens_radius: self.aperture / 2.0,
        })
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Generate a ray through normalized image coordinates.
    ///
    /// `(0, 0)` is the lower-left corner of the image plane and `(1, 1)` the
    /// upper-right. With a non-zero aperture the origin is jittered over the
    /// lens for depth of field.
    pub fn ray_for(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.origin + offset;
        let target = self.lower_left + s * self.horizontal + t * self.vertical;
        Ray::new(origin, target - origin)
    }
}
