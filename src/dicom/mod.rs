//! DICOM file loading and pixel array extraction
//!
//! Parsing is delegated to the `dicom` crates. This module decides which
//! failures count as "not found" versus "not DICOM", and exposes the few
//! tags the rest of the tool needs.

mod error;
pub mod parser;
mod pixel_data;

pub use error::InspectError;
pub use pixel_data::{PixelArray, extract_pixel_array};

use dicom::object::{FileDicomObject, InMemDicomObject, StandardDataDictionary, open_file};
use std::io::ErrorKind;
use std::path::Path;

pub type DicomFile = FileDicomObject<InMemDicomObject<StandardDataDictionary>>;

/// Open and parse a DICOM file
///
/// The whole dataset, including Pixel Data, is read into memory and the
/// file handle is closed before returning.
///
/// # Errors
///
/// `NotFound` if the path does not exist, `InvalidDicom` for anything the
/// reader rejects.
pub fn open_dicom_file(file_path: &Path) -> Result<DicomFile, InspectError> {
    match std::fs::metadata(file_path) {
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(InspectError::NotFound),
        Err(e) => return Err(InspectError::InvalidDicom(e.to_string())),
        Ok(meta) if meta.is_dir() => {
            return Err(InspectError::InvalidDicom("is a directory".to_string()));
        }
        Ok(_) => {}
    }

    open_file(file_path).map_err(|e| InspectError::InvalidDicom(e.to_string()))
}
