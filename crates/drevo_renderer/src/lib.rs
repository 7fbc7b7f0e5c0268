//! DREVO Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a scene of spheres with diffuse,
//! reflective and dielectric materials. Pixels are rendered in parallel on a
//! fixed worker pool, each worker owning a contiguous batch of pixel jobs.
//!
//! # Example
//!
//! ```no_run
//! use drevo_renderer::{render, scenes, RenderConfig};
//!
//! # fn main() -> drevo_renderer::Result<()> {
//! let scene = scenes::single_sphere()?;
//! let camera = scenes::single_sphere_camera(200, 100)?;
//! let config = RenderConfig::default().with_resolution(200, 100);
//!
//! let image = render(&scene, &camera, &config)?;
//! image.save("sphere.ppm")?;
//! # Ok(())
//! # }
//! ```

mod camera;
mod error;
mod estimate;
mod hittable;
mod image_buffer;
mod material;
mod random;
mod renderer;
mod scene;
mod scheduler;
pub mod scenes;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{RenderError, Result};
pub use estimate::{estimate_render_time, threading_speedup, RenderEstimate, WORKER_EFFICIENCY};
pub use hittable::{HitRecord, Primitive};
pub use image_buffer::{ImageBuffer, Rgb8};
pub use material::{
    reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use random::stream_rng;
pub use renderer::{
    checked_ray, color_to_rgb8, default_worker_count, linear_to_gamma, radiance, render_pixel,
    sample_pixel, Background, RenderConfig, T_EPSILON,
};
pub use scene::Scene;
pub use scheduler::{partition, pixel_jobs, render, PixelJob};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from drevo_math
pub use drevo_math::{Interval, Ray, Vec3};
