//! Grayscale image conversion
//!
//! Maps one frame of grayscale samples onto 8-bit gray by min/max
//! normalisation, inverting for MONOCHROME1 (min value = white).

use super::normalization::{find_min_max, normalize_to_u8, range_of};
use super::rgb::to_image;
use anyhow::Result;
use image::RgbImage;

/// Grayscale frame rendered as RGB, with the value range that was stretched
#[derive(Debug, Clone)]
pub struct GrayscaleFrame {
    pub image: RgbImage,
    pub min: f32,
    pub max: f32,
}

pub fn convert_grayscale(samples: &[f32], rows: usize, cols: usize, invert: bool) -> Result<GrayscaleFrame> {
    let pixel_count = rows * cols;
    if samples.len() != pixel_count {
        anyhow::bail!(
            "Invalid grayscale frame size: expected {pixel_count} samples, got {}",
            samples.len()
        );
    }

    // First pass: value range of the frame
    let (min, max) = find_min_max(samples);
    let range = range_of(min, max);

    // Second pass: normalize pixels to 0-255 range
    let rgb_pixels: Vec<u8> = samples
        .iter()
        .flat_map(|&value| {
            let gray = normalize_to_u8(value, min, range);
            let gray = if invert { 255u8.saturating_sub(gray) } else { gray };
            [gray, gray, gray]
        })
        .collect();

    let image = to_image(rgb_pixels, rows, cols)?;

    Ok(GrayscaleFrame { image, min, max })
}
