//! TIFF reading module
//!
//! This module decodes single- and multi-channel integer TIFFs into raw sample grids.

mod reader;
mod standard_tiff_reader;
pub mod types;

pub use reader::TiffImageReader;
pub use standard_tiff_reader::StandardTiffReader;
pub use types::RawImage;
