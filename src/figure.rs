//! Subplot layout for display mode
//!
//! A `Figure` is a row-major grid of `Panel`s, one per file with pixel data.
//! Rendering to the terminal happens in `display`; everything here is plain
//! image composition so it can be tested without a terminal.

use crate::dicom::PixelArray;
use crate::image::{ImageKind, classify_array, convert_frame, with_colorbar};
use anyhow::Result;
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::Path;

/// One subplot: a file's pixel array plus its current slice
#[derive(Debug, Clone)]
pub struct Panel {
    pub name: String,
    pub array: PixelArray,
    pub kind: ImageKind,
    slice: usize,
}

impl Panel {
    #[must_use]
    pub fn new(file_path: &Path, array: PixelArray) -> Self {
        let name = file_path
            .file_name()
            .map_or_else(|| file_path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let kind = classify_array(&array);
        log::debug!("{name}: {kind} {:?}", array.shape);

        Self { name, array, kind, slice: 0 }
    }

    #[must_use]
    pub fn slice(&self) -> usize {
        self.slice
    }

    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.array.frame_count()
    }

    #[must_use]
    pub fn is_volume(&self) -> bool {
        self.kind == ImageKind::Volume3d
    }

    /// Move the slider by `delta`, clamped to the volume. Returns whether it moved.
    pub fn step(&mut self, delta: isize) -> bool {
        let target = self.slice.saturating_add_signed(delta);
        self.set_slice(target)
    }

    /// Jump to `index`, clamped to the volume. Returns whether it moved.
    pub fn set_slice(&mut self, index: usize) -> bool {
        let clamped = index.min(self.slice_count().saturating_sub(1));
        let moved = clamped != self.slice;
        self.slice = clamped;
        moved
    }

    /// Image for the current slice and the title to print above it
    ///
    /// # Errors
    ///
    /// Propagates pixel conversion failures.
    pub fn render(&self) -> Result<(RgbImage, String)> {
        let (image, range) = convert_frame(&self.array, self.kind, self.slice)?;

        Ok(match (self.kind, range) {
            (ImageKind::Grayscale2d, Some((min, max))) => (
                with_colorbar(&image, self.array.is_monochrome1()),
                format!("{} [{} .. {}]", self.name, format_value(min), format_value(max)),
            ),
            (ImageKind::Volume3d, _) => (
                image,
                format!("{} slice {}/{}", self.name, self.slice + 1, self.slice_count()),
            ),
            _ => (image, self.name.clone()),
        })
    }
}

fn format_value(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// `(rows, cols)` of the grid for `n` panels
///
/// Without an explicit limit the column count is `floor(sqrt(n))`.
#[must_use]
pub fn grid_shape(n: usize, max_cols: Option<usize>) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let max_cols = max_cols.unwrap_or_else(|| (n as f64).sqrt() as usize).max(1);
    let cols = n.min(max_cols);
    let rows = (n - 1) / cols + 1;
    (rows, cols)
}

/// One grid row ready for the terminal
#[derive(Debug, Clone)]
pub struct FigureRow {
    pub titles: Vec<String>,
    pub image: RgbImage,
}

#[derive(Debug, Clone)]
pub struct Figure {
    panels: Vec<Panel>,
    rows: usize,
    cols: usize,
}

impl Figure {
    /// Lay out `panels`; unsupported arrays are reported and left out
    #[must_use]
    pub fn new(panels: Vec<Panel>, max_cols: Option<usize>) -> Self {
        let panels: Vec<Panel> = panels
            .into_iter()
            .filter(|p| {
                if p.kind == ImageKind::Unsupported {
                    log::warn!("Skipping {}: unsupported pixel array", p.name);
                    false
                } else {
                    true
                }
            })
            .collect();
        let (rows, cols) = grid_shape(panels.len(), max_cols);

        Self { panels, rows, cols }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    /// Indices of panels that have a slice slider
    #[must_use]
    pub fn volume_indices(&self) -> Vec<usize> {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_volume())
            .map(|(i, _)| i)
            .collect()
    }

    /// Compose every grid row, each panel scaled to fit a `tile` x `tile` pixel box
    ///
    /// # Errors
    ///
    /// Propagates pixel conversion failures.
    pub fn render_rows(&self, tile: u32) -> Result<Vec<FigureRow>> {
        if self.cols == 0 {
            return Ok(Vec::new());
        }

        self.panels
            .chunks(self.cols)
            .map(|row| self.compose_row(row, tile))
            .collect()
    }

    fn compose_row(&self, row: &[Panel], tile: u32) -> Result<FigureRow> {
        let mut titles = Vec::with_capacity(row.len());
        let mut tiles = Vec::with_capacity(row.len());
        for panel in row {
            let (image, title) = panel.render()?;
            tiles.push(fit_to_tile(&image, tile));
            titles.push(title);
        }

        let height = tiles.iter().map(RgbImage::height).max().unwrap_or(0);
        let width = tile * self.cols as u32;
        let mut canvas = RgbImage::new(width, height);
        for (i, image) in tiles.iter().enumerate() {
            imageops::replace(&mut canvas, image, i64::from(tile) * i as i64, 0);
        }

        Ok(FigureRow { titles, image: canvas })
    }
}

/// Scale `image` to fit inside a square box, keeping its aspect ratio
fn fit_to_tile(image: &RgbImage, tile: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let scale = (f64::from(tile) / f64::from(width)).min(f64::from(tile) / f64::from(height));
    let new_width = ((f64::from(width) * scale).round() as u32).clamp(1, tile);
    let new_height = ((f64::from(height) * scale).round() as u32).clamp(1, tile);
    // small images are blown up, keep their pixels sharp
    let filter = if scale > 1.0 { FilterType::Nearest } else { FilterType::Triangle };

    imageops::resize(image, new_width, new_height, filter)
}

/// Titles padded into fixed-width cells, one cell per grid column
#[must_use]
pub fn title_line(titles: &[String], cell_width: usize) -> String {
    let cell_width = cell_width.max(1);
    titles
        .iter()
        .map(|title| {
            let truncated: String = title.chars().take(cell_width.saturating_sub(1)).collect();
            format!("{truncated:<cell_width$}")
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}
