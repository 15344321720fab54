use clap::Parser;
use std::path::PathBuf;

/// Print DICOM file information
#[derive(Parser, Debug, Clone)]
#[command(name = "dicom-info", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the DICOM file(s)
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Display DICOM images instead of printing metadata
    #[arg(short, long)]
    pub display: bool,

    /// Maximum number of columns for image display
    #[arg(short, long, value_parser = parse_columns, allow_negative_numbers = true)]
    pub columns: Option<usize>,

    /// Output width in terminal columns
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Output height in terminal rows
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress metadata output (exit codes only)
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_columns(value: &str) -> Result<usize, String> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_err(|e| e.to_string()),
        Ok(_) => Err("--columns must be a positive integer".to_string()),
        Err(e) => Err(format!("--columns must be a positive integer ({e})")),
    }
}
