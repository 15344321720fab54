pub mod cli;
pub mod dicom;
pub mod display;
pub mod display_metadata;
pub mod driver;
pub mod figure;
pub mod image;
pub mod logging;
pub mod types;

#[cfg(test)]
mod test_files;

// Re-export commonly used functions
pub use display_metadata::print_metadata;
pub use driver::run;
