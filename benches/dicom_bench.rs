use criterion::{Criterion, criterion_group, criterion_main};
use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::tags;
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dicominfo::dicom as inspect;
use dicominfo::display_metadata::print_metadata;
use dicominfo::figure::{Figure, Panel};
use std::hint::black_box;
use std::io;
use std::path::{Path, PathBuf};

const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
const FRAMES: u32 = 16;
const SIZE: u16 = 256;

/// 16-bit multi-frame CT-like volume
fn write_volume(dir: &Path) -> PathBuf {
    let path = dir.join("volume.dcm");
    let instance_uid = "1.2.826.0.1.3680043.2.1125.42";

    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(CT_IMAGE_STORAGE)));
    obj.put(DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(instance_uid)));
    obj.put(DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("CT")));
    obj.put(DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)));
    obj.put(DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from("MONOCHROME2")));
    obj.put(DataElement::new(tags::NUMBER_OF_FRAMES, VR::IS, PrimitiveValue::from(FRAMES.to_string().as_str())));
    obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(SIZE)));
    obj.put(DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(SIZE)));
    obj.put(DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
    obj.put(DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(12_u16)));
    obj.put(DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(11_u16)));
    obj.put(DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16)));

    let count = usize::from(SIZE) * usize::from(SIZE) * FRAMES as usize;
    let pixels: Vec<u16> = (0..count).map(|i| (i % 4096) as u16).collect();
    obj.put(DataElement::new(tags::PIXEL_DATA, VR::OW, PrimitiveValue::U16(pixels.into())));

    obj.with_meta(
        FileMetaTableBuilder::new()
            .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
            .media_storage_sop_class_uid(CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid(instance_uid),
    )
    .unwrap()
    .write_to_file(&path)
    .unwrap();

    path
}

// ============================================================================
// METADATA MODE
// ============================================================================

/// Open and dump every attribute, as `dicom-info FILE` does
fn bench_metadata_dump(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_volume(dir.path());

    c.bench_function("open_and_dump", |b| {
        b.iter(|| {
            let obj = inspect::open_dicom_file(black_box(&path)).unwrap();
            print_metadata(&mut io::sink(), &path, &obj).unwrap();
        });
    });
}

// ============================================================================
// DISPLAY MODE
// ============================================================================

fn bench_pixel_extraction(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_volume(dir.path());
    let obj = inspect::open_dicom_file(&path).unwrap();

    c.bench_function("extract_pixel_array", |b| {
        b.iter(|| inspect::extract_pixel_array(black_box(&obj)).unwrap());
    });
}

/// Composition of one figure row, excluding the terminal itself
fn bench_figure_render(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_volume(dir.path());
    let obj = inspect::open_dicom_file(&path).unwrap();
    let array = inspect::extract_pixel_array(&obj).unwrap();
    let figure = Figure::new(vec![Panel::new(&path, array)], None);

    c.bench_function("render_volume_slice", |b| {
        b.iter(|| black_box(figure.render_rows(256).unwrap()));
    });
}

criterion_group!(benches, bench_metadata_dump, bench_pixel_extraction, bench_figure_render);

criterion_main!(benches);
