mod colorbar;
mod grayscale;
mod normalization;
mod rgb;
mod ycbcr;

pub use colorbar::with_colorbar;
pub use grayscale::{GrayscaleFrame, convert_grayscale};
pub use rgb::convert_rgb;
pub use ycbcr::convert_ycbcr;

use crate::dicom::PixelArray;
use anyhow::Result;
use image::RgbImage;
use std::fmt;

/// How a pixel array is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// `[rows, cols]`, grayscale with colour bar
    Grayscale2d,
    /// `[rows, cols, samples]`
    Color2d,
    /// `[frames, rows, cols]`, browsed slice by slice
    Volume3d,
    Unsupported,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grayscale2d => write!(f, "2D grayscale"),
            Self::Color2d => write!(f, "2D colour"),
            Self::Volume3d => write!(f, "3D volume"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Decide the kind of image from samples per pixel, NumberOfFrames and the squeezed shape
pub fn classify(samples_per_pixel: u16, number_of_frames: Option<u32>, shape: &[usize]) -> ImageKind {
    if samples_per_pixel > 1 {
        if shape.len() == 3 {
            return ImageKind::Color2d;
        }
        log::warn!("Unexpected shape {shape:?} for image with {samples_per_pixel} samples per pixel");
        return ImageKind::Unsupported;
    }

    match shape {
        [_, _] => ImageKind::Grayscale2d,
        [frames, _, _] => {
            if let Some(n) = number_of_frames
                && n as usize != *frames
            {
                log::warn!("NumberOfFrames ({n}) doesn't match pixel array shape {shape:?}");
            }
            ImageKind::Volume3d
        }
        _ => {
            log::warn!("Unexpected shape {shape:?} for pixel array");
            ImageKind::Unsupported
        }
    }
}

/// `classify` applied to a decoded pixel array
pub fn classify_array(array: &PixelArray) -> ImageKind {
    classify(array.samples_per_pixel, array.number_of_frames_tag, &array.shape)
}

/// Render one frame of `array` as an RGB image
///
/// Returns the stretched value range alongside for grayscale data.
///
/// # Errors
///
/// Fails for unsupported kinds, out-of-range frames or inconsistent sizes.
pub fn convert_frame(array: &PixelArray, kind: ImageKind, frame: usize) -> Result<(RgbImage, Option<(f32, f32)>)> {
    let (rows, cols) = array.frame_dimensions();
    let samples = array
        .frame(frame)
        .ok_or_else(|| anyhow::anyhow!("Frame {frame} out of range ({} frame(s))", array.frame_count()))?;

    match kind {
        ImageKind::Grayscale2d | ImageKind::Volume3d => {
            let gray = convert_grayscale(samples, rows, cols, array.is_monochrome1())?;
            Ok((gray.image, Some((gray.min, gray.max))))
        }
        ImageKind::Color2d if array.is_ycbcr() => Ok((convert_ycbcr(samples, rows, cols)?, None)),
        ImageKind::Color2d => Ok((
            convert_rgb(samples, rows, cols, usize::from(array.samples_per_pixel))?,
            None,
        )),
        ImageKind::Unsupported => anyhow::bail!("Unsupported pixel array shape {:?}", array.shape),
    }
}
