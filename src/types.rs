//! Domain-specific types for DICOM metadata

use std::fmt;

/// DICOM transfer syntax (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    pub uid: String,
    pub name: String,
}

impl TransferSyntax {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

/// SOP Class (UID, name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SOPClass {
    pub uid: String,
    pub name: String,
}

impl SOPClass {
    #[must_use]
    pub fn new(uid: String, name: String) -> Self {
        Self { uid, name }
    }
}

impl fmt::Display for SOPClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{name} ({uid})", name = self.name, uid = self.uid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: u16,
    pub cols: u16,
}

impl Dimensions {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{cols}x{rows}", cols = self.cols, rows = self.rows)
    }
}

/// One-line description of a loaded file, used for debug logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub sop_class: Option<SOPClass>,
    pub transfer_syntax: TransferSyntax,
    pub modality: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub number_of_frames: Option<u32>,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sop_class {
            Some(sc) => write!(f, "{sc}")?,
            None => write!(f, "unknown SOP class")?,
        }
        if let Some(modality) = &self.modality {
            write!(f, ", {modality}")?;
        }
        if let Some(dims) = self.dimensions {
            write!(f, ", {dims}")?;
            if let Some(frames) = self.number_of_frames {
                write!(f, "x{frames}")?;
            }
        }
        write!(f, ", {}", self.transfer_syntax)
    }
}
