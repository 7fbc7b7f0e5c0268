//! Error types for scene construction and rendering.

use thiserror::Error;

/// Errors surfaced by the renderer.
///
/// Bad geometry, materials, cameras and configuration are rejected when they
/// are constructed, so nothing in here is ever produced mid-trace.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Failed to allocate image buffer of {width}x{height} pixels")]
    Allocation { width: u32, height: u32 },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
