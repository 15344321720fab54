//! The per-file loop behind `dicom-info`

use crate::cli::Args;
use crate::dicom::{self, PixelArray};
use crate::display::Renderer;
use crate::display_metadata::print_metadata;
use crate::figure::{Figure, Panel};
use anyhow::Context;
use std::io::{self, Write};
use std::path::Path;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Process every file in `args` and return the exit code
///
/// Metadata goes to `out`, per-file errors to `err`. In display mode the
/// collected pixel arrays are handed to `renderer` once all files are read.
pub fn run<O, E, R>(args: &Args, out: &mut O, err: &mut E, renderer: &mut R) -> i32
where
    O: Write,
    E: Write,
    R: Renderer + ?Sized,
{
    let mut any_failed = false;
    let mut panels = Vec::new();

    for file_path in &args.files {
        match process_file(file_path, args, out) {
            Ok(Some(array)) => panels.push(Panel::new(file_path, array)),
            Ok(None) => {}
            Err(e) => {
                report(err, &format!("{}: {e:#}", file_path.display()));
                any_failed = true;
                // output is gone, every further file would fail the same way
                if e.is::<io::Error>() {
                    break;
                }
            }
        }
    }

    if args.display {
        if panels.is_empty() {
            report(err, "No DICOM files with pixel data found.");
            any_failed = true;
        } else if let Err(e) = renderer.render(Figure::new(panels, args.columns)) {
            report(err, &format!("{e:#}"));
            any_failed = true;
        }
    }

    if any_failed { EXIT_FAILURE } else { EXIT_SUCCESS }
}

/// Load one file; in display mode return its pixel array if it has one
fn process_file<O: Write>(file_path: &Path, args: &Args, out: &mut O) -> anyhow::Result<Option<PixelArray>> {
    let obj = dicom::open_dicom_file(file_path)?;
    log::debug!("{}: {}", file_path.display(), dicom::parser::summarize(&obj));

    if !args.display {
        if !args.quiet {
            print_metadata(out, file_path, &obj).context("Failed to write metadata")?;
        }
        return Ok(None);
    }

    match dicom::extract_pixel_array(&obj) {
        Ok(array) => Ok(Some(array)),
        Err(e) if e.is_load_error() => Err(e.into()),
        Err(e) => {
            log::warn!("{}: {e}", file_path.display());
            Ok(None)
        }
    }
}

fn report<E: Write>(err: &mut E, message: &str) {
    // nowhere left to report a broken stderr
    let _ = writeln!(err, "Error: {message}");
}
