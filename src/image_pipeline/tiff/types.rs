//! Raw TIFF image data types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Decoded TIFF samples, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples per pixel (1 for depth/amplitude frames)
    pub channels: usize,
    /// Interleaved samples, row-major, `width * height * channels` long
    pub data: Vec<u16>,
}

impl RawImage {
    /// Wraps a sample buffer, rejecting empty frames and buffers whose length
    /// does not match the declared shape.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u16>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel convenience constructor.
    pub fn gray(width: usize, height: usize, data: Vec<u16>) -> Result<Self> {
        Self::new(width, height, 1, data)
    }
}
