//! Normalization types

use image::{DynamicImage, ImageBuffer};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// What kind of sensor frame an image holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageClassification {
    /// Per-pixel distance; smaller values are nearer
    Depth,
    /// Per-pixel return strength
    Amplitude,
    /// Anything else
    Generic,
}

/// Normalization methods for non-depth frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationMethod {
    /// Min-max stretch to [0, 255]
    Linear,
    /// Histogram equalization of the top 8 bits (single-channel only)
    HistEq,
}

/// Run-wide normalization parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationConfig {
    pub method: NormalizationMethod,
    /// Inclusive lower bound of valid depth samples
    pub depth_clip_min: i32,
    /// Inclusive upper bound of valid depth samples
    pub depth_clip_max: i32,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            method: NormalizationMethod::Linear,
            depth_clip_min: 0,
            depth_clip_max: u16::MAX as i32,
        }
    }
}

impl NormalizationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.depth_clip_min >= self.depth_clip_max {
            return Err(ConversionError::InvalidConfig(format!(
                "depth clip min ({}) must be below depth clip max ({})",
                self.depth_clip_min, self.depth_clip_max
            )));
        }
        Ok(())
    }
}

/// 8-bit output of the normalizer, same shape as its input.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized8BitImage {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Normalized8BitImage {
    /// Hands the buffer over to the `image` crate for resizing and encoding.
    pub fn into_dynamic(self) -> Result<DynamicImage> {
        let (width, height) = (self.width, self.height);
        let invalid = || ConversionError::InvalidDimensions(width, height);
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;

        let image = match self.channels {
            1 => ImageBuffer::from_raw(w, h, self.data).map(DynamicImage::ImageLuma8),
            2 => ImageBuffer::from_raw(w, h, self.data).map(DynamicImage::ImageLumaA8),
            3 => ImageBuffer::from_raw(w, h, self.data).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::from_raw(w, h, self.data).map(DynamicImage::ImageRgba8),
            n => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{} channels",
                    n
                )));
            }
        };
        image.ok_or_else(invalid)
    }
}
