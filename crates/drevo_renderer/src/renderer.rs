//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a strict bounce limit
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization

use crate::image_buffer::Rgb8;
use crate::random::gen_f32;
use crate::scheduler::PixelJob;
use crate::{Camera, Color, RenderError, Result, Scene};
use drevo_math::{Interval, Ray, Vec3};
use rand::RngCore;

/// Minimum ray parameter accepted as a hit. Keeps scattered rays from
/// re-hitting the surface they start on.
pub const T_EPSILON: f32 = 0.001;

/// Background gradient used when a ray escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    /// Color looking straight down
    pub ground: Color,
    /// Color looking straight up
    pub sky: Color,
}

impl Background {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLUE: Color = Color::new(0.5, 0.7, 1.0);
    pub const RED: Color = Color::new(153.0 / 255.0, 0.0, 0.0);

    /// White horizon fading to a pale blue sky.
    pub const BLUE_SKY: Background = Background {
        ground: Self::WHITE,
        sky: Self::BLUE,
    };

    /// White horizon fading to a deep red sky.
    pub const RED_SKY: Background = Background {
        ground: Self::WHITE,
        sky: Self::RED,
    };

    /// Gradient color for an escaped ray.
    pub fn color(&self, ray: &Ray) -> Color {
        let unit_direction = ray.direction().normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        self.ground.lerp(self.sky, a)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::BLUE_SKY
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Number of render workers
    pub workers: usize,
    /// Shuffle pixel jobs before partitioning them across workers
    pub shuffle: bool,
    /// Base seed for all random streams; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Background gradient for escaped rays
    pub background: Background,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 25,
            max_depth: 25,
            workers: default_worker_count(),
            shuffle: false,
            seed: None,
            background: Background::default(),
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject zero-valued settings before any work starts.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("width", self.width as usize),
            ("height", self.height as usize),
            ("samples per pixel", self.samples_per_pixel as usize),
            ("max depth", self.max_depth as usize),
            ("worker count", self.workers),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(RenderError::InvalidConfig(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

/// Hardware concurrency minus one, never less than one.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Build a ray from unchecked input, rejecting a degenerate direction.
pub fn checked_ray(origin: Vec3, direction: Vec3) -> Result<Ray> {
    Ray::try_new(origin, direction).ok_or_else(|| {
        RenderError::InvalidGeometry(format!(
            "ray needs a finite origin and a finite non-zero direction, got {origin} -> {direction}"
        ))
    })
}

/// Compute the radiance carried back along a ray.
///
/// `depth` counts the bounces taken so far. A hit at `depth == max_depth`
/// returns black without scattering, which bounds the recursion.
pub fn radiance(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = scene.hit(ray, Interval::forward(T_EPSILON)) else {
        return config.background.color(ray);
    };

    if depth >= config.max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * radiance(&result.scattered, scene, depth + 1, config, rng)
        }
        // Absorbed
        None => Color::ZERO,
    }
}

/// Average the radiance of `samples_per_pixel` jittered rays through a pixel.
///
/// Rows count from the top of the image, the camera's `t` from the bottom.
pub fn sample_pixel(
    camera: &Camera,
    scene: &Scene,
    job: PixelJob,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.width as f32;
    let height = config.height as f32;
    let scanline = (config.height - 1 - job.row) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (job.col as f32 + gen_f32(rng)) / width;
        let t = (scanline + gen_f32(rng)) / height;
        let ray = camera.ray_for(s, t, rng);
        pixel_color += radiance(&ray, scene, 0, config, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Render a single pixel to its final 8-bit value.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    job: PixelJob,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Rgb8 {
    color_to_rgb8(sample_pixel(camera, scene, job, config, rng))
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Scaling by 255.99 keeps a channel of exactly 1.0 at 255; the float to
/// integer cast truncates and saturates.
pub fn color_to_rgb8(color: Color) -> Rgb8 {
    let quantize = |c: f32| (linear_to_gamma(c) * 255.99) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}
