use thiserror::Error;

/// Per-file failures the driver distinguishes
#[derive(Debug, Error)]
pub enum InspectError {
    /// Path does not exist
    #[error("file not found")]
    NotFound,

    /// Path exists but could not be read as a DICOM file
    #[error("not a valid DICOM file: {0}")]
    InvalidDicom(String),

    /// Valid DICOM file without a Pixel Data element
    #[error("no pixel data")]
    NoPixelData,

    /// Pixel Data is present but could not be decoded
    #[error("failed to decode pixel data: {0}")]
    PixelDecode(String),
}

impl InspectError {
    /// Load errors count against the exit code; pixel errors only exclude the file from display
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::NotFound | Self::InvalidDicom(_))
    }
}
