//! Pixel storage and image file output.
//!
//! Pixels are stored row-major (`row * width + col`) with row 0 at the top of
//! the picture. Serialization writes row 0 first, so the stored layout and the
//! file layout always agree.

use crate::error::{RenderError, Result};
use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 8-bit RGB triple.
pub type Rgb8 = [u8; 3];

/// Fixed-size grid of 8-bit pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl ImageBuffer {
    /// Allocate a black image.
    ///
    /// Allocation failure is reported rather than aborting the process.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixels = try_alloc_pixels(width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap row-major pixels already sized to `width * height`.
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb8>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(RenderError::InvalidConfig(format!(
                "{} pixels given for a {width}x{height} image",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Get the pixel at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Rgb8 {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn set(&mut self, row: u32, col: u32, rgb: Rgb8) {
        let index = self.index(row, col);
        self.pixels[index] = rgb;
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        row as usize * self.width as usize + col as usize
    }

    /// Write the image as a plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write!(writer, "P3\n{} {}\n255\n", self.width, self.height)?;
        for [r, g, b] in &self.pixels {
            writeln!(writer, "{r} {g} {b}")?;
        }
        Ok(())
    }

    /// Convert to an `image` crate buffer for encoding.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let raw: Vec<u8> = self.pixels.iter().flatten().copied().collect();
        RgbImage::from_raw(self.width, self.height, raw).ok_or_else(|| {
            ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
                .into()
        })
    }

    /// Save to disk. `.png` paths are PNG encoded, anything else is PPM.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            self.to_rgb_image()?.save(path)?;
        } else {
            let mut writer = BufWriter::new(File::create(path)?);
            self.write_ppm(&mut writer)?;
            writer.flush()?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Allocate `width * height` black pixels without aborting on failure.
pub(crate) fn try_alloc_pixels(width: u32, height: u32) -> Result<Vec<Rgb8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or(RenderError::Allocation { width, height })?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| RenderError::Allocation { width, height })?;
    pixels.resize(len, [0, 0, 0]);
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppm_string(image: &ImageBuffer) -> String {
        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_pixel_ppm() {
        let mut image = ImageBuffer::new(1, 1).unwrap();
        image.set(0, 0, [255, 128, 0]);
        assert_eq!(ppm_string(&image), "P3\n1 1\n255\n255 128 0\n");
    }

    #[test]
    fn test_ppm_row_order_is_top_down() {
        let mut image = ImageBuffer::new(2, 2).unwrap();
        image.set(0, 0, [1, 1, 1]);
        image.set(0, 1, [2, 2, 2]);
        image.set(1, 0, [3, 3, 3]);
        image.set(1, 1, [4, 4, 4]);

        assert_eq!(
            ppm_string(&image),
            "P3\n2 2\n255\n1 1 1\n2 2 2\n3 3 3\n4 4 4\n"
        );
    }

    #[test]
    fn test_row_major_addressing() {
        let mut image = ImageBuffer::new(3, 2).unwrap();
        image.set(1, 2, [9, 8, 7]);

        assert_eq!(image.get(1, 2), [9, 8, 7]);
        assert_eq!(image.pixels()[5], [9, 8, 7]);
        assert_eq!(image.pixels().iter().filter(|p| **p != [0, 0, 0]).count(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_column_past_width_panics() {
        let mut image = ImageBuffer::new(2, 2).unwrap();
        image.set(0, 2, [9, 9, 9]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_row_past_height_panics() {
        let image = ImageBuffer::new(2, 2).unwrap();
        image.get(2, 0);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        let image = ImageBuffer::from_pixels(2, 1, vec![[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(image.get(0, 1), [4, 5, 6]);
        assert!(ImageBuffer::from_pixels(2, 2, vec![[0, 0, 0]; 3]).is_err());
    }

    #[test]
    fn test_to_rgb_image() {
        let mut image = ImageBuffer::new(2, 1).unwrap();
        image.set(0, 1, [10, 20, 30]);

        let rgb = image.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        // Far more memory than any machine has
        let result = ImageBuffer::new(u32::MAX, u32::MAX);
        assert!(matches!(result, Err(RenderError::Allocation { .. })));
    }
}
