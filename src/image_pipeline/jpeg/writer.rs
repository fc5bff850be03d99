use std::io::Write;
use image::DynamicImage;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::jpeg::types::ConversionConfig;

pub trait JpegWriter {
    fn write_jpeg(&self, image: &DynamicImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
