//! JPEG writing module
//!
//! This module provides JPEG encoding and the run-wide conversion settings.

mod writer;
mod standard_jpeg_writer;
pub mod types;

pub use writer::JpegWriter;
pub use standard_jpeg_writer::StandardJpegWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder};
