use super::DicomFile;
use crate::types::{Dimensions, FileSummary, SOPClass, TransferSyntax};
use dicom::core::dictionary::UidDictionary;
use dicom::dictionary_std::sop_class;
use dicom::dictionary_std::tags;
use dicom::encoding::TransferSyntaxIndex;
use dicom::transfer_syntax::TransferSyntaxRegistry;

pub fn extract_dimensions(obj: &DicomFile) -> Option<Dimensions> {
    let rows = obj.get(tags::ROWS).and_then(|e| e.to_int::<u16>().ok())?;
    let cols = obj.get(tags::COLUMNS).and_then(|e| e.to_int::<u16>().ok())?;
    Some(Dimensions::new(rows, cols))
}

/// NumberOfFrames as written in the file, if at all
#[inline]
pub fn extract_number_of_frames(obj: &DicomFile) -> Option<u32> {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
}

pub fn extract_modality(obj: &DicomFile) -> Option<String> {
    obj.get(tags::MODALITY)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn extract_transfer_syntax(obj: &DicomFile) -> TransferSyntax {
    let uid = obj.meta().transfer_syntax().to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}

pub fn extract_sop_class(obj: &DicomFile) -> Option<SOPClass> {
    obj.get(tags::SOP_CLASS_UID)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|uid| {
            let uid = uid.trim_end_matches('\0').trim();
            sop_class::StandardSopClassDictionary
                .by_uid(uid)
                .map(|entry| SOPClass::new(uid.to_string(), entry.name.to_string()))
        })
}

#[inline]
pub fn has_pixel_data(obj: &DicomFile) -> bool {
    obj.get(tags::PIXEL_DATA).is_some()
}

pub fn summarize(obj: &DicomFile) -> FileSummary {
    FileSummary {
        sop_class: extract_sop_class(obj),
        transfer_syntax: extract_transfer_syntax(obj),
        modality: extract_modality(obj),
        dimensions: extract_dimensions(obj),
        number_of_frames: extract_number_of_frames(obj),
    }
}
