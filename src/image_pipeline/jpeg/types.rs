//! TIFF to JPEG conversion configuration types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::geometry::Rotation;
use crate::image_pipeline::normalize::types::{NormalizationConfig, NormalizationMethod};

/// Configuration for TIFF to JPEG conversion, fixed for a whole batch
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// JPEG quality, 0 (smallest) to 100 (best)
    pub jpeg_quality: u8,
    /// Output size relative to input; 1.0 skips resizing
    pub scale_factor: f64,
    /// Whether to rotate the output
    pub rotate: bool,
    /// Clockwise rotation in degrees: 90, 180 or 270
    pub rotation_angle: u32,
    /// Normalization method and depth clip bounds
    pub normalization: NormalizationConfig,
    /// Whether to reject zero-sized images before normalizing
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            scale_factor: 1.0,
            rotate: true,
            rotation_angle: 180,
            normalization: NormalizationConfig::default(),
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    /// Rejects settings that would make every output meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality > 100 {
            return Err(ConversionError::InvalidConfig(format!(
                "JPEG quality must be within 0..=100, got {}",
                self.jpeg_quality
            )));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(ConversionError::InvalidConfig(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        Rotation::try_from(self.rotation_angle)?;
        self.normalization.validate()
    }

    /// The rotation to apply, if enabled.
    pub fn rotation(&self) -> Result<Option<Rotation>> {
        if !self.rotate {
            return Ok(None);
        }
        Rotation::try_from(self.rotation_angle).map(Some)
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    jpeg_quality: Option<u8>,
    scale_factor: Option<f64>,
    rotate: Option<bool>,
    rotation_angle: Option<u32>,
    method: Option<NormalizationMethod>,
    depth_clip: Option<(i32, i32)>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }
    
    pub fn scale_factor(mut self, scale: f64) -> Self {
        self.scale_factor = Some(scale);
        self
    }
    
    pub fn rotate(mut self, enable: bool) -> Self {
        self.rotate = Some(enable);
        self
    }
    
    pub fn rotation_angle(mut self, degrees: u32) -> Self {
        self.rotation_angle = Some(degrees);
        self
    }
    
    pub fn normalization_method(mut self, method: NormalizationMethod) -> Self {
        self.method = Some(method);
        self
    }
    
    pub fn depth_clip(mut self, min: i32, max: i32) -> Self {
        self.depth_clip = Some((min, max));
        self
    }
    
    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }
    
    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        let (depth_clip_min, depth_clip_max) = self.depth_clip.unwrap_or((
            default.normalization.depth_clip_min,
            default.normalization.depth_clip_max,
        ));
        ConversionConfig {
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            scale_factor: self.scale_factor.unwrap_or(default.scale_factor),
            rotate: self.rotate.unwrap_or(default.rotate),
            rotation_angle: self.rotation_angle.unwrap_or(default.rotation_angle),
            normalization: NormalizationConfig {
                method: self.method.unwrap_or(default.normalization.method),
                depth_clip_min,
                depth_clip_max,
            },
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
