//! Pipeline conversions module
//!
//! This module contains orchestration logic: one TIFF to one JPEG, and a
//! directory of TIFFs to a directory of JPEGs.

mod tiff_to_jpeg;
mod batch;

#[cfg(test)]
mod tests;

pub use tiff_to_jpeg::TiffToJpegPipeline;
pub use batch::{BatchConverter, BatchSummary, is_tiff_path, output_path_for};
