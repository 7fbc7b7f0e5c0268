//! Render time estimation from a small single-threaded pre-pass.

use crate::error::{RenderError, Result};
use crate::random::stream_rng;
use crate::renderer::render_pixel;
use crate::scheduler::pixel_jobs;
use crate::{Camera, RenderConfig, Scene};
use std::fmt;
use std::time::{Duration, Instant};

/// Measured speedup each extra worker contributes on a typical machine.
pub const WORKER_EFFICIENCY: f32 = 0.8;

/// Stream index for the pre-pass, clear of worker and shuffle streams.
const ESTIMATE_STREAM: u64 = 0x4553_5449_4d41_5445;

/// Extrapolated render time. Advisory only.
#[derive(Debug, Clone, Copy)]
pub struct RenderEstimate {
    /// Pixels actually rendered by the pre-pass
    pub sampled_pixels: usize,
    /// Pixels in the full image
    pub total_pixels: usize,
    /// Time the pre-pass took
    pub sample_time: Duration,
    /// Extrapolated time to render everything on one thread
    pub single_thread: Duration,
    /// `single_thread` divided by the expected threading speedup
    pub parallel: Duration,
}

impl RenderEstimate {
    /// Average cost of one pixel in the pre-pass.
    pub fn per_pixel(&self) -> Duration {
        self.sample_time.div_f64(self.sampled_pixels.max(1) as f64)
    }
}

impl fmt::Display for RenderEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "~{:.1?} ({:.1?} single-threaded, from {} of {} pixels in {:.1?})",
            self.parallel, self.single_thread, self.sampled_pixels, self.total_pixels, self.sample_time
        )
    }
}

/// Expected speedup of `workers` threads over one.
pub fn threading_speedup(workers: usize) -> f32 {
    (workers as f32 * WORKER_EFFICIENCY).max(1.0)
}

/// Render `fraction` of the image's pixels, spread uniformly over the image,
/// on the calling thread and extrapolate the full render time.
///
/// The rendered pixels are thrown away.
pub fn estimate_render_time(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    fraction: f32,
) -> Result<RenderEstimate> {
    config.validate()?;
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(RenderError::InvalidConfig(format!(
            "estimate fraction must be in (0, 1], got {fraction}"
        )));
    }

    let jobs = pixel_jobs(config.width, config.height);
    let total_pixels = jobs.len();
    let sample_count = ((total_pixels as f32 * fraction).round() as usize).clamp(1, total_pixels);
    let stride = total_pixels / sample_count;

    let mut rng = stream_rng(config.seed, ESTIMATE_STREAM);
    let start = Instant::now();
    for job in jobs.iter().step_by(stride).take(sample_count) {
        std::hint::black_box(render_pixel(camera, scene, *job, config, &mut rng));
    }
    let sample_time = start.elapsed();

    let single_thread = sample_time.mul_f64(total_pixels as f64 / sample_count as f64);
    let parallel = single_thread.div_f32(threading_speedup(config.workers));

    let estimate = RenderEstimate {
        sampled_pixels: sample_count,
        total_pixels,
        sample_time,
        single_thread,
        parallel,
    };
    log::info!("Estimated render time {estimate}");
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes;

    fn setup() -> (Scene, Camera, RenderConfig) {
        let scene = scenes::single_sphere().unwrap();
        let camera = scenes::single_sphere_camera(20, 10).unwrap();
        let config = RenderConfig::default()
            .with_resolution(20, 10)
            .with_quality(2, 2)
            .with_workers(4)
            .with_seed(8);
        (scene, camera, config)
    }

    #[test]
    fn test_samples_requested_fraction() {
        let (scene, camera, config) = setup();

        let estimate = estimate_render_time(&scene, &camera, &config, 0.1).unwrap();
        assert_eq!(estimate.total_pixels, 200);
        assert_eq!(estimate.sampled_pixels, 20);

        let tiny = estimate_render_time(&scene, &camera, &config, 1e-6).unwrap();
        assert_eq!(tiny.sampled_pixels, 1);

        let full = estimate_render_time(&scene, &camera, &config, 1.0).unwrap();
        assert_eq!(full.sampled_pixels, 200);
    }

    #[test]
    fn test_parallel_estimate_is_faster() {
        let (scene, camera, config) = setup();
        let estimate = estimate_render_time(&scene, &camera, &config, 0.5).unwrap();

        assert!(estimate.single_thread >= estimate.sample_time);
        assert!(estimate.parallel <= estimate.single_thread);
    }

    #[test]
    fn test_per_pixel_handles_large_counts() {
        let estimate = RenderEstimate {
            sampled_pixels: 1 << 33,
            total_pixels: 1 << 34,
            sample_time: Duration::from_secs(1 << 13),
            single_thread: Duration::ZERO,
            parallel: Duration::ZERO,
        };
        // 2^13 s / 2^33 pixels = 953.67 ns
        let nanos = estimate.per_pixel().as_nanos();
        assert!((953..=954).contains(&nanos), "{nanos} ns");

        let empty = RenderEstimate {
            sampled_pixels: 0,
            ..estimate
        };
        assert_eq!(empty.per_pixel(), empty.sample_time);
    }

    #[test]
    fn test_threading_speedup() {
        assert_eq!(threading_speedup(1), 1.0);
        assert_eq!(threading_speedup(0), 1.0);
        assert!((threading_speedup(10) - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let (scene, camera, config) = setup();
        assert!(estimate_render_time(&scene, &camera, &config, 0.0).is_err());
        assert!(estimate_render_time(&scene, &camera, &config, 1.5).is_err());
        assert!(estimate_render_time(&scene, &camera, &config, f32::NAN).is_err());
    }
}
