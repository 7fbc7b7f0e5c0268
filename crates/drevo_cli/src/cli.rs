//! Command line arguments.

use clap::{ArgAction, Parser, ValueEnum};
use drevo_renderer::{default_worker_count, Background, RenderConfig};
use std::path::PathBuf;

pub const DEFAULT_MAX_DEPTH: u32 = 25;
pub const DEFAULT_NUM_SAMPLES: u32 = 25;

/// DREVO Ray Tracer
#[derive(Parser, Debug)]
#[command(
    name = "drevo",
    version,
    about = "DREVO Ray Tracer: a multi-threaded CPU path tracer",
    disable_help_flag = true,
    after_help = "EXAMPLES:\n  \
                  drevo -w 400 -h 225 -o render.ppm\n  \
                  drevo -w 1280 -h 720 -s 100 -d 50 --shuffle -o render.png\n  \
                  drevo -w 200 -h 100 --scene single --seed 7 -o sphere.ppm"
)]
pub struct Cli {
    /// Width of the image in pixels
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Height of the image in pixels
    #[arg(short = 'h', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// How many bounces to allow for each ray of light
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: u32,

    /// Number of rays to sample per pixel, for antialiasing purposes
    #[arg(short = 's', long, default_value_t = DEFAULT_NUM_SAMPLES, value_parser = clap::value_parser!(u32).range(1..))]
    pub sampling: u32,

    /// Output image path (.ppm or .png)
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Worker threads [default: hardware threads - 1]
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Shuffle pixels before splitting them across threads
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for scene generation and sampling; renders are reproducible with a seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = ScenePreset::Random)]
    pub scene: ScenePreset,

    /// Sky color of the background gradient
    #[arg(long, value_enum, default_value_t = SkyPreset::Blue)]
    pub sky: SkyPreset,

    /// Estimate render time from this fraction of pixels before rendering
    #[arg(long, value_name = "FRACTION")]
    pub estimate: Option<f32>,

    /// Display this help menu
    #[allow(dead_code)]
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// Small spheres resting on the ground around three large ones
    Random,
    /// Like `random`, with the small spheres floating above the ground
    Floating,
    /// A single matte sphere in front of the camera
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SkyPreset {
    /// White horizon fading to pale blue
    Blue,
    /// White horizon fading to deep red
    Red,
}

impl From<SkyPreset> for Background {
    fn from(sky: SkyPreset) -> Self {
        match sky {
            SkyPreset::Blue => Background::BLUE_SKY,
            SkyPreset::Red => Background::RED_SKY,
        }
    }
}

impl Cli {
    /// Renderer settings described by these arguments.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.sampling,
            max_depth: self.depth,
            workers: self
                .threads
                .map_or_else(default_worker_count, |n| n as usize),
            shuffle: self.shuffle,
            seed: self.seed,
            background: self.sky.into(),
        }
    }
}
