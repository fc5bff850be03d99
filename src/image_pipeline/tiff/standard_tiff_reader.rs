//! TIFF reader implementation using the tiff library.
//!
//! Depth cameras write their frames as 16-bit grayscale TIFFs; amplitude and
//! intensity channels sometimes arrive as 8-bit or multi-sample files. This
//! reader accepts all of those and widens them into a common `u16` sample grid.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::reader::TiffImageReader;
use crate::image_pipeline::tiff::types::RawImage;

/// TIFF reader backed by the `tiff` crate decoder.
///
/// Supported layouts:
/// - Gray, GrayA, RGB, RGBA
/// - 8 or 16 bits per sample (8-bit samples are widened, not rescaled)
pub struct StandardTiffReader;

impl TiffImageReader for StandardTiffReader {
    /// Decodes the first image of a TIFF file.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw bytes of the TIFF file
    ///
    /// # Returns
    ///
    /// * `Ok(RawImage)` - Decoded samples with shape information
    /// * `Err(ConversionError)` - The bytes are not a TIFF this reader understands
    fn read_tiff(&self, data: &[u8]) -> Result<RawImage> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let channels = match color_type {
            ColorType::Gray(8 | 16) => 1,
            ColorType::GrayA(8 | 16) => 2,
            ColorType::RGB(8 | 16) => 3,
            ColorType::RGBA(8 | 16) => 4,
            other => {
                return Err(ConversionError::UnsupportedFormat(format!("{:?}", other)));
            }
        };

        debug!("Decoded header: {}x{}, {:?}", width, height, color_type);

        let samples: Vec<u16> = match decoder
            .read_image()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?
        {
            DecodingResult::U16(values) => values,
            DecodingResult::U8(values) => values.into_iter().map(u16::from).collect(),
            _ => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{:?} sample type",
                    color_type
                )));
            }
        };

        RawImage::new(width as usize, height as usize, channels, samples)
    }
}
