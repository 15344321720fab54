//! Small DICOM files generated on the fly for tests

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::tags;
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use std::path::{Path, PathBuf};

const SECONDARY_CAPTURE: &str = "1.2.840.10008.5.1.4.1.1.7";

#[derive(Debug, Clone)]
pub struct TestImage {
    pub rows: u16,
    pub cols: u16,
    pub frames: u32,
    pub samples: u16,
    pub photometric: &'static str,
    /// PlanarConfiguration 1 (`RRR..GGG..BBB..`)
    pub planar: bool,
    pub with_pixels: bool,
}

impl TestImage {
    pub fn grayscale(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            frames: 1,
            samples: 1,
            photometric: "MONOCHROME2",
            planar: false,
            with_pixels: true,
        }
    }

    pub fn volume(frames: u32, rows: u16, cols: u16) -> Self {
        Self {
            frames,
            ..Self::grayscale(rows, cols)
        }
    }

    pub fn rgb(rows: u16, cols: u16) -> Self {
        Self {
            samples: 3,
            photometric: "RGB",
            ..Self::grayscale(rows, cols)
        }
    }

    pub fn planar_rgb(rows: u16, cols: u16) -> Self {
        Self {
            planar: true,
            ..Self::rgb(rows, cols)
        }
    }

    /// Native 4:2:2 data: each pair of pixels is stored as `Y1 Y2 Cb Cr`
    pub fn ybr_full_422(rows: u16, cols: u16) -> Self {
        Self {
            photometric: "YBR_FULL_422",
            ..Self::rgb(rows, cols)
        }
    }

    pub fn without_pixels() -> Self {
        Self {
            with_pixels: false,
            ..Self::grayscale(2, 2)
        }
    }

    /// Number of stored samples, after chroma subsampling
    pub fn sample_count(&self) -> usize {
        let pixels = usize::from(self.rows) * usize::from(self.cols) * self.frames as usize;
        if self.photometric == "YBR_FULL_422" {
            pixels * 2
        } else {
            pixels * usize::from(self.samples)
        }
    }
}

/// Write an 8-bit Explicit VR Little Endian file whose pixel values count up from 0
pub fn write_dicom(dir: &Path, name: &str, image: &TestImage) -> PathBuf {
    let path = dir.join(name);
    let sop_instance_uid = format!("1.2.826.0.1.3680043.2.1125.{}", name.len());

    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(SECONDARY_CAPTURE)));
    obj.put(DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(sop_instance_uid.as_str())));
    obj.put(DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("OT")));
    obj.put(DataElement::new(tags::PATIENT_NAME, VR::PN, PrimitiveValue::from("Test^Patient")));
    obj.put(DataElement::new(tags::PATIENT_ID, VR::LO, PrimitiveValue::from("PAT123")));

    if image.with_pixels {
        obj.put(DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(image.samples)));
        obj.put(DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from(image.photometric)));
        if image.samples > 1 {
            obj.put(DataElement::new(tags::PLANAR_CONFIGURATION, VR::US, PrimitiveValue::from(u16::from(image.planar))));
        }
        if image.frames > 1 {
            obj.put(DataElement::new(
                tags::NUMBER_OF_FRAMES,
                VR::IS,
                PrimitiveValue::from(image.frames.to_string().as_str()),
            ));
        }
        obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(image.rows)));
        obj.put(DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(image.cols)));
        obj.put(DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(8_u16)));
        obj.put(DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(8_u16)));
        obj.put(DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(7_u16)));
        obj.put(DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16)));

        let mut pixels: Vec<u8> = (0..image.sample_count()).map(|i| (i % 251) as u8).collect();
        // even-length element values
        if pixels.len() % 2 == 1 {
            pixels.push(0);
        }
        obj.put(DataElement::new(tags::PIXEL_DATA, VR::OB, PrimitiveValue::from(pixels)));
    }

    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
                .media_storage_sop_class_uid(SECONDARY_CAPTURE)
                .media_storage_sop_instance_uid(sop_instance_uid.as_str()),
        )
        .expect("build file meta");
    file_obj.write_to_file(&path).expect("write test dicom");

    path
}

/// A file that exists but is not DICOM
pub fn write_text_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "This is not a DICOM file").expect("write text file");
    path
}
