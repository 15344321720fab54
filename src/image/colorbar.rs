use image::{Rgb, RgbImage};

/// Append a vertical gray gradient to the right of `image`
///
/// The top of the bar is the brightest value, so with `invert` (MONOCHROME1)
/// it starts black.
#[must_use]
pub fn with_colorbar(image: &RgbImage, invert: bool) -> RgbImage {
    let (width, height) = image.dimensions();
    let bar_width = (width / 12).max(2);
    let gap = (width / 40).max(1);

    let mut canvas = RgbImage::new(width + gap + bar_width, height);
    image::imageops::replace(&mut canvas, image, 0, 0);

    let span = height.saturating_sub(1).max(1) as f32;
    for y in 0..height {
        let level = ((span - y as f32) / span * 255.0_f32) as u8;
        let level = if invert { 255 - level } else { level };
        for x in width + gap..width + gap + bar_width {
            canvas.put_pixel(x, y, Rgb([level, level, level]));
        }
    }

    canvas
}
