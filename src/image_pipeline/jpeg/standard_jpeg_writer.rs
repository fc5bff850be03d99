use std::io::Write;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::jpeg::types::ConversionConfig;
use crate::image_pipeline::jpeg::writer::JpegWriter;

pub struct StandardJpegWriter;

impl JpegWriter for StandardJpegWriter {
    fn write_jpeg(&self, image: &DynamicImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding JPEG image: {}x{} at quality {}", image.width(), image.height(), config.jpeg_quality);
        
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality);
        
        // JPEG has no alpha channel
        let encoded = match image {
            DynamicImage::ImageLuma8(gray) => gray.write_with_encoder(encoder),
            DynamicImage::ImageRgb8(rgb) => rgb.write_with_encoder(encoder),
            DynamicImage::ImageLumaA8(_) => image.to_luma8().write_with_encoder(encoder),
            _ => image.to_rgb8().write_with_encoder(encoder),
        };
        encoded.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        
        output.write_all(&buffer)?;
        
        debug!("JPEG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
