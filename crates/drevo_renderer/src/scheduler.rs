//! Static partitioning of pixel jobs across a fixed worker pool.
//!
//! Every pixel is one job. The job list is cut into one contiguous batch per
//! worker and each worker writes into its own disjoint slice of the result
//! buffer, so no locks or atomics are involved. The pool scope joins every
//! worker before the image is assembled.

use crate::error::Result;
use crate::image_buffer::{try_alloc_pixels, ImageBuffer, Rgb8};
use crate::random::stream_rng;
use crate::renderer::render_pixel;
use crate::{Camera, RenderConfig, Scene};
use rand::seq::SliceRandom;
use std::ops::Range;
use std::time::Instant;

/// Stream index for the job shuffle, kept clear of worker stream indices.
const SHUFFLE_STREAM: u64 = 0x5348_5546_464c_4500;

/// One output pixel to compute. Rows count from the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelJob {
    pub col: u32,
    pub row: u32,
}

/// All pixel jobs of an image in row-major order, top row first.
pub fn pixel_jobs(width: u32, height: u32) -> Vec<PixelJob> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| PixelJob { col, row }))
        .collect()
}

/// Split `job_count` jobs into `workers` contiguous ranges.
///
/// Every range but the last holds `job_count / workers` jobs; the last one
/// absorbs the remainder. A worker count of zero is treated as one.
pub fn partition(job_count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let per_worker = job_count / workers;

    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i == workers - 1 {
                job_count
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}

/// Cut a slice into the consecutive sub-slices named by `ranges`.
///
/// The ranges must be contiguous and start at zero, as produced by
/// [`partition`].
fn split_by_ranges<'a, T>(mut rest: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut batches = Vec::with_capacity(ranges.len());
    let mut offset = 0;

    for range in ranges {
        debug_assert_eq!(range.start, offset, "ranges must be contiguous");
        let (batch, tail) = std::mem::take(&mut rest).split_at_mut(range.end - offset);
        batches.push(batch);
        rest = tail;
        offset = range.end;
    }

    batches
}

/// Render the full image on a pool of `config.workers` threads.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> Result<ImageBuffer> {
    config.validate()?;

    let mut jobs = pixel_jobs(config.width, config.height);

    if config.shuffle {
        let mut rng = stream_rng(config.seed, SHUFFLE_STREAM);
        jobs.shuffle(&mut rng);
    }

    let workers = if config.workers > jobs.len() {
        log::warn!(
            "{} workers requested for {} pixels, using {}",
            config.workers,
            jobs.len(),
            jobs.len()
        );
        jobs.len()
    } else {
        config.workers
    };

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} primitives on {} workers",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        scene.len(),
        workers
    );

    // Results are stored in job order; each worker owns one contiguous slice
    let mut results = try_alloc_pixels(config.width, config.height)?;
    let ranges = partition(jobs.len(), workers);
    let batches = split_by_ranges(&mut results, &ranges);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("drevo-worker-{i}"))
        .build()?;

    let start = Instant::now();
    pool.scope(|s| {
        for (worker, (range, batch)) in ranges.iter().zip(batches).enumerate() {
            let jobs = &jobs[range.clone()];
            s.spawn(move |_| render_batch(worker, jobs, batch, scene, camera, config));
        }
    });
    log::info!("Rendered {} pixels in {:?}", jobs.len(), start.elapsed());

    into_row_major(&mut jobs, &mut results, config.width);
    ImageBuffer::from_pixels(config.width, config.height, results)
}

/// Reorder job-ordered results into row-major pixel order in place.
///
/// `jobs` must be a permutation of every pixel of an image `width` wide.
/// Each swap moves one result to its final slot, so this is linear in the
/// number of pixels.
fn into_row_major(jobs: &mut [PixelJob], pixels: &mut [Rgb8], width: u32) {
    debug_assert_eq!(jobs.len(), pixels.len());
    for i in 0..jobs.len() {
        loop {
            let target = jobs[i].row as usize * width as usize + jobs[i].col as usize;
            if target == i {
                break;
            }
            jobs.swap(i, target);
            pixels.swap(i, target);
        }
    }
}

/// Render one worker's batch with the worker's private random stream.
fn render_batch(
    worker: usize,
    jobs: &[PixelJob],
    out: &mut [Rgb8],
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) {
    debug_assert_eq!(jobs.len(), out.len());
    log::debug!("Worker {worker} starting batch of {} pixels", jobs.len());

    let start = Instant::now();
    let mut rng = stream_rng(config.seed, worker as u64);
    for (job, slot) in jobs.iter().zip(out.iter_mut()) {
        *slot = render_pixel(camera, scene, *job, config, &mut rng);
    }

    log::debug!("Worker {worker} finished in {:?}", start.elapsed());
}
