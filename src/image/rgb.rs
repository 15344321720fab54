use super::normalization::{find_min_max, normalize_to_u8, range_of};
use anyhow::{Context, Result};
use image::{ImageBuffer, RgbImage};

/// Convert one frame of interleaved colour samples to an RGB image
///
/// Values already within 0..=255 are used as-is; wider data (16-bit
/// colour) is min/max normalised per channel. A fourth sample is dropped.
///
/// # Errors
///
/// Returns an error if the sample count does not match the frame size or
/// image buffer creation fails
pub fn convert_rgb(samples: &[f32], rows: usize, cols: usize, samples_per_pixel: usize) -> Result<RgbImage> {
    let pixel_count = rows * cols;
    if samples_per_pixel < 3 || samples.len() != pixel_count * samples_per_pixel {
        anyhow::bail!(
            "Invalid RGB pixel data size: expected {} samples, got {}",
            pixel_count * samples_per_pixel.max(3),
            samples.len()
        );
    }

    let (min, max) = find_min_max(samples);
    let rgb_pixels = if min >= 0.0 && max <= 255.0 {
        samples
            .chunks_exact(samples_per_pixel)
            .flat_map(|px| [px[0] as u8, px[1] as u8, px[2] as u8])
            .collect()
    } else {
        normalize_channels(samples, samples_per_pixel)
    };

    to_image(rgb_pixels, rows, cols)
}

fn normalize_channels(samples: &[f32], samples_per_pixel: usize) -> Vec<u8> {
    let mut bounds = [(f32::INFINITY, f32::NEG_INFINITY); 3];
    for px in samples.chunks_exact(samples_per_pixel) {
        for (channel, bound) in bounds.iter_mut().enumerate() {
            bound.0 = bound.0.min(px[channel]);
            bound.1 = bound.1.max(px[channel]);
        }
    }
    let ranges = bounds.map(|(min, max)| range_of(min, max));

    samples
        .chunks_exact(samples_per_pixel)
        .flat_map(|px| {
            [0, 1, 2].map(|c| normalize_to_u8(px[c], bounds[c].0, ranges[c]))
        })
        .collect()
}

pub(super) fn to_image(rgb_pixels: Vec<u8>, rows: usize, cols: usize) -> Result<RgbImage> {
    let width = u32::try_from(cols).context("Image too wide")?;
    let height = u32::try_from(rows).context("Image too tall")?;
    ImageBuffer::from_raw(width, height, rgb_pixels).context("Failed to create RGB image buffer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_8bit_values_pass_through() {
        let samples = [255.0, 0.0, 0.0, 0.0, 128.0, 64.0];
        let image = convert_rgb(&samples, 1, 2, 3).unwrap();

        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 128, 64]);
    }

    #[test]
    fn test_wide_values_are_normalized_per_channel() {
        let samples = [0.0, 1000.0, 10.0, 4000.0, 2000.0, 20.0];
        let image = convert_rgb(&samples, 1, 2, 3).unwrap();

        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_alpha_sample_is_dropped() {
        let samples = [1.0, 2.0, 3.0, 255.0];
        let image = convert_rgb(&samples, 1, 1, 4).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3]);
    }

    #[test]
    fn test_size_mismatch() {
        assert!(convert_rgb(&[1.0, 2.0], 1, 1, 3).is_err());
        assert!(convert_rgb(&[1.0, 2.0], 1, 1, 2).is_err());
    }
}
