use crate::dicom::DicomFile;
use dicom_dump::{ColorMode, DumpOptions};
use std::io::{self, Write};
use std::path::Path;

/// Print a banner naming the file followed by every attribute in it
///
/// # Errors
///
/// Fails only when writing to `out` fails.
pub fn print_metadata<W: Write>(out: &mut W, file_path: &Path, obj: &DicomFile) -> io::Result<()> {
    print_banner(out, file_path)?;

    DumpOptions::new()
        .color_mode(ColorMode::Never)
        .dump_file_to(&mut *out, obj)?;

    out.flush()
}

fn print_banner<W: Write>(out: &mut W, file_path: &Path) -> io::Result<()> {
    writeln!(out, "{stars} {path} {stars}", stars = "*".repeat(5), path = file_path.display())
}
