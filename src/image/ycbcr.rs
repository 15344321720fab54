use super::rgb::to_image;
use anyhow::Result;
use image::RgbImage;

/// Convert interleaved full-resolution YCbCr samples to RGB
pub fn convert_ycbcr(samples: &[f32], rows: usize, cols: usize) -> Result<RgbImage> {
    let pixel_count = rows * cols;
    if samples.len() != pixel_count * 3 {
        anyhow::bail!(
            "Invalid YCbCr pixel data size: expected {} samples, got {}",
            pixel_count * 3,
            samples.len()
        );
    }

    let rgb_pixels: Vec<u8> = samples
        .chunks_exact(3)
        .flat_map(|ycbcr| {
            let y = ycbcr[0];
            let cb = ycbcr[1] - 128.0_f32;
            let cr = ycbcr[2] - 128.0_f32;

            let r = cr.mul_add(1.402_f32, y);
            let g = cb.mul_add(-0.344_136_f32, cr.mul_add(-0.714_136_f32, y));
            let b = cb.mul_add(1.772_f32, y);

            [
                r.clamp(0.0, 255.0) as u8,
                g.clamp(0.0, 255.0) as u8,
                b.clamp(0.0, 255.0) as u8,
            ]
        })
        .collect();

    to_image(rgb_pixels, rows, cols)
}
