//! Pixel array extraction
//!
//! Decoding (including decompression) is left to `dicom-pixeldata`; this
//! module only reshapes the decoded samples into a squeezed
//! `[frames?, rows, cols, samples?]` array of `f32`.
//!
//! `to_vec_frame` only understands interleaved full-resolution samples, so
//! planar colour and native 4:2:2 chroma are read from the raw frame bytes
//! and brought into that layout here.

use super::error::InspectError;
use super::{DicomFile, parser};
use dicom_pixeldata::{DecodedPixelData, PixelDecoder, PlanarConfiguration};

/// Decoded pixel samples with their squeezed shape
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    /// Frame axis only when frames > 1, sample axis only when samples > 1
    pub shape: Vec<usize>,
    /// Samples in row-major order, colour samples interleaved
    pub data: Vec<f32>,
    pub samples_per_pixel: u16,
    /// NumberOfFrames as written in the file, if present
    pub number_of_frames_tag: Option<u32>,
    pub photometric_interpretation: String,
}

impl PixelArray {
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Rows and columns of a single frame
    #[must_use]
    pub fn frame_dimensions(&self) -> (usize, usize) {
        let spatial: &[usize] = match (self.ndim(), self.samples_per_pixel > 1) {
            (2, false) => &self.shape[..],
            (3, false) => &self.shape[1..],
            (3, true) => &self.shape[..2],
            (4, true) => &self.shape[1..3],
            _ => &[],
        };
        match spatial {
            [rows, cols] => (*rows, *cols),
            _ => (0, 0),
        }
    }

    /// Number of frames (1 when the frame axis was squeezed out)
    #[must_use]
    pub fn frame_count(&self) -> usize {
        let has_frame_axis = match self.samples_per_pixel {
            1 => self.ndim() == 3,
            _ => self.ndim() == 4,
        };
        if has_frame_axis { self.shape[0] } else { 1 }
    }

    /// Samples belonging to one frame
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        if index >= self.frame_count() {
            return None;
        }
        let (rows, cols) = self.frame_dimensions();
        let len = rows * cols * usize::from(self.samples_per_pixel);
        self.data.get(index * len..(index + 1) * len)
    }

    #[must_use]
    pub fn is_monochrome1(&self) -> bool {
        self.photometric_interpretation == "MONOCHROME1"
    }

    #[must_use]
    pub fn is_ycbcr(&self) -> bool {
        self.photometric_interpretation.starts_with("YBR_FULL")
    }
}

/// Decode the Pixel Data of an opened file into a `PixelArray`
///
/// # Errors
///
/// `NoPixelData` when the element is absent, `PixelDecode` when the
/// decoder rejects it.
pub fn extract_pixel_array(obj: &DicomFile) -> Result<PixelArray, InspectError> {
    if !parser::has_pixel_data(obj) {
        return Err(InspectError::NoPixelData);
    }

    let decoded = obj
        .decode_pixel_data()
        .map_err(|e| InspectError::PixelDecode(e.to_string()))?;

    let frames = decoded.number_of_frames() as usize;
    let rows = decoded.rows() as usize;
    let cols = decoded.columns() as usize;
    let samples = usize::from(decoded.samples_per_pixel());
    let pixels_per_frame = rows * cols;

    if frames == 0 || pixels_per_frame == 0 {
        return Err(InspectError::PixelDecode(format!(
            "empty pixel data ({frames} frame(s) of {cols}x{rows})"
        )));
    }

    let layout = sample_layout(&decoded, frames * pixels_per_frame * samples);
    log::debug!("{layout:?} sample layout");

    let mut data = Vec::with_capacity(frames * pixels_per_frame * samples);
    for frame in 0..frames {
        let values = match layout {
            SampleLayout::Interleaved => decoded
                .to_vec_frame::<f32>(frame as u32)
                .map_err(|e| InspectError::PixelDecode(e.to_string()))?,
            SampleLayout::Planar => {
                let raw = raw_frame(&decoded, frame, pixels_per_frame * samples)?;
                interleave_planes(&raw, pixels_per_frame, samples)
            }
            SampleLayout::Subsampled422 => {
                let raw = raw_frame(&decoded, frame, pixels_per_frame * 2)?;
                upsample_422(&raw)
            }
        };

        if values.len() < pixels_per_frame * samples {
            return Err(InspectError::PixelDecode(format!(
                "frame {frame} has {} samples, expected {}",
                values.len(),
                pixels_per_frame * samples
            )));
        }

        data.extend_from_slice(&values[..pixels_per_frame * samples]);
    }

    let photometric_interpretation = decoded.photometric_interpretation().as_str().to_string();

    Ok(PixelArray {
        shape: squeezed_shape(frames, rows, cols, samples),
        data,
        samples_per_pixel: decoded.samples_per_pixel(),
        number_of_frames_tag: parser::extract_number_of_frames(obj),
        photometric_interpretation,
    })
}

/// Drop the singleton frame and sample axes
#[must_use]
pub fn squeezed_shape(frames: usize, rows: usize, cols: usize, samples: usize) -> Vec<usize> {
    let mut shape = Vec::with_capacity(4);
    if frames > 1 {
        shape.push(frames);
    }
    shape.push(rows);
    shape.push(cols);
    if samples > 1 {
        shape.push(samples);
    }
    shape
}

/// How the decoded bytes of a frame are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleLayout {
    Interleaved,
    /// PlanarConfiguration 1
    Planar,
    /// Native YBR_FULL_422, two luma samples per chroma pair
    Subsampled422,
}

fn sample_layout(decoded: &DecodedPixelData<'_>, full_sample_count: usize) -> SampleLayout {
    if decoded.samples_per_pixel() < 2 {
        return SampleLayout::Interleaved;
    }

    let bytes_per_sample = usize::from(decoded.bits_allocated().div_ceil(8));
    let subsampled = decoded.photometric_interpretation().as_str() == "YBR_FULL_422"
        && decoded.data().len() < full_sample_count * bytes_per_sample;

    if subsampled {
        SampleLayout::Subsampled422
    } else if matches!(decoded.planar_configuration(), PlanarConfiguration::PixelFirst) {
        SampleLayout::Planar
    } else {
        SampleLayout::Interleaved
    }
}

/// `sample_count` stored samples of one frame, straight from the decoded bytes
fn raw_frame(decoded: &DecodedPixelData<'_>, frame: usize, sample_count: usize) -> Result<Vec<f32>, InspectError> {
    let bits_allocated = decoded.bits_allocated();
    let bytes_per_sample = match bits_allocated {
        8 => 1,
        16 => 2,
        other => {
            return Err(InspectError::PixelDecode(format!(
                "unsupported BitsAllocated {other} for colour data"
            )));
        }
    };

    let len = sample_count * bytes_per_sample;
    let bytes = decoded
        .data()
        .get(frame * len..(frame + 1) * len)
        .ok_or_else(|| InspectError::PixelDecode(format!("frame {frame} is truncated")))?;

    Ok(samples_from_bytes(bytes, bits_allocated))
}

/// Unsigned little endian samples of 8 or 16 bits
fn samples_from_bytes(bytes: &[u8], bits_allocated: u16) -> Vec<f32> {
    if bits_allocated == 16 {
        bytes
            .chunks_exact(2)
            .map(|b| f32::from(u16::from_le_bytes([b[0], b[1]])))
            .collect()
    } else {
        bytes.iter().map(|&b| f32::from(b)).collect()
    }
}

/// `Y1 Y2 Cb Cr` → `Y1 Cb Cr Y2 Cb Cr`
fn upsample_422(values: &[f32]) -> Vec<f32> {
    values
        .chunks_exact(4)
        .flat_map(|c| [c[0], c[2], c[3], c[1], c[2], c[3]])
        .collect()
}

/// `RRR..GGG..BBB..` → `RGBRGB..`
fn interleave_planes(values: &[f32], pixel_count: usize, samples: usize) -> Vec<f32> {
    let mut interleaved = vec![0.0_f32; pixel_count * samples];

    for i in 0..pixel_count {
        for s in 0..samples {
            interleaved[i * samples + s] = values[s * pixel_count + i];
        }
    }

    interleaved
}
